use std::{
    env::var,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{IoContext, LauncherError, Result};

pub const APP_DIR: &str = "packlaunch";
pub const CONFIG_FILE: &str = "packlaunch.toml";
pub const DEFAULT_MANIFEST_URL: &str = "https://archive.hicz.net/geccopack/manifest.json";
pub const DEFAULT_MODPACK_NAME: &str = "geccopack";

#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq)]
pub struct ConfigFile {
    pub manifest_url: Option<String>,
    pub modpack_name: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub java_path: Option<PathBuf>,
}

impl ConfigFile {
    /// A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(ConfigFile::default())
            }
            Err(err) => Err(err).at(path),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub manifest_url: String,
    pub modpack_name: String,
    pub data_dir: PathBuf,
    /// Overrides the bundled runtime for `{{java}}`.
    pub java_path: Option<PathBuf>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .or_else(|| var("PACKLAUNCH_CONFIG_PATH").ok().map(PathBuf::from))
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE)));

        let file = match config_path {
            Some(path) => ConfigFile::read(&path)?,
            None => ConfigFile::default(),
        };

        Self::resolve(file, |key| var(key).ok())
    }

    /// Environment beats the config file, which beats the defaults.
    pub fn resolve<F>(file: ConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match env("PACKLAUNCH_DATA_DIR").map(PathBuf::from).or(file.data_dir) {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or(LauncherError::NoConfigDir)?
                .join(APP_DIR),
        };

        Ok(Config {
            manifest_url: env("PACKLAUNCH_MANIFEST_URL")
                .or(file.manifest_url)
                .unwrap_or_else(|| DEFAULT_MANIFEST_URL.to_string()),
            modpack_name: env("PACKLAUNCH_MODPACK_NAME")
                .or(file.modpack_name)
                .unwrap_or_else(|| DEFAULT_MODPACK_NAME.to_string()),
            data_dir,
            java_path: env("PACKLAUNCH_JAVA").map(PathBuf::from).or(file.java_path),
        })
    }
}
