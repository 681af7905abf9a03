use serde::{Deserialize, Serialize};

use crate::bridge::{Contract, Payload};

/// Launch preferences chosen by the player.
///
/// `ram` joined the record after `nickname`. Files written before that still
/// load and get the default.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    pub nickname: String,
    /// Memory for the game, passed through untouched (megabytes by convention).
    pub ram: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialOptions {
    pub nickname: Option<String>,
    pub ram: Option<i64>,
}

impl Contract for PartialOptions {
    fn from_payload(payload: &Payload) -> Self {
        PartialOptions {
            nickname: payload.field("nickname"),
            ram: payload.integer("ram"),
        }
    }
}

impl From<PartialOptions> for Options {
    fn from(partial: PartialOptions) -> Self {
        Options {
            nickname: partial.nickname.unwrap_or_default(),
            ram: partial.ram.unwrap_or_default(),
        }
    }
}

impl Contract for Options {
    fn from_payload(payload: &Payload) -> Self {
        PartialOptions::from_payload(payload).into()
    }
}
