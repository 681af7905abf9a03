use std::path::PathBuf;

use packlaunch_core::ContractError;

#[derive(thiserror::Error, Debug)]
pub enum LauncherError {
    #[error("i/o error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("download of {url} failed with HTTP {status}")]
    DownloadFailed { url: String, status: u16 },
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error("could not serialize {0}: {1}")]
    Serialize(&'static str, serde_json::Error),
    #[error("no user config directory available")]
    NoConfigDir,
    #[error("modpack is not installed (missing {0:?})")]
    NotInstalled(PathBuf),
    #[error("manifest has no command template")]
    NoCommandTemplate,
    #[error("failed to start game: {0}")]
    Spawn(std::io::Error),
}

pub type Result<T> = std::result::Result<T, LauncherError>;

pub trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| LauncherError::Io {
            path: path.into(),
            source,
        })
    }
}
