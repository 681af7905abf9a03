use serde::{Deserialize, Serialize};

use crate::bridge::{Contract, Payload};

/// Describes the currently published modpack.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ModpackManifest {
    pub version: String,
    pub url: String,
    /// Launch command template, one token per element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

impl ModpackManifest {
    pub fn has_command(&self) -> bool {
        self.command.as_ref().is_some_and(|command| !command.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialManifest {
    pub version: Option<String>,
    pub url: Option<String>,
    pub command: Option<Vec<String>>,
}

impl Contract for PartialManifest {
    fn from_payload(payload: &Payload) -> Self {
        PartialManifest {
            version: payload.field("version"),
            url: payload.field("url"),
            command: payload.field("command"),
        }
    }
}

impl From<PartialManifest> for ModpackManifest {
    fn from(partial: PartialManifest) -> Self {
        ModpackManifest {
            version: partial.version.unwrap_or_default(),
            url: partial.url.unwrap_or_default(),
            command: partial.command,
        }
    }
}

impl Contract for ModpackManifest {
    fn from_payload(payload: &Payload) -> Self {
        PartialManifest::from_payload(payload).into()
    }
}
