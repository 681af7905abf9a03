use serde::{Deserialize, Serialize};

pub mod bridge;
pub mod models;

pub use bridge::{Contract, ContractError, Payload, Source};
pub use models::{
    manifest::{ModpackManifest, PartialManifest},
    options::{Options, PartialOptions},
};

pub trait StrConversion {
    fn from_str(value: &str) -> Self;
    fn as_str(&self) -> &'static str;
}

/// Outcome of comparing the installed modpack against the published one.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ModpackStatus {
    UpToDate,
    Installed,
    Updated,
}

impl std::fmt::Display for ModpackStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}
impl StrConversion for ModpackStatus {
    fn from_str(value: &str) -> Self {
        match value {
            "Installed" => Self::Installed,
            "Updated" => Self::Updated,
            _ => Self::UpToDate,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::UpToDate => "UpToDate",
            Self::Installed => "Installed",
            Self::Updated => "Updated",
        }
    }
}
