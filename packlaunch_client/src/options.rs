use log::debug;
use packlaunch_core::{Contract, Options};

use crate::{
    error::{IoContext, LauncherError, Result},
    paths::LauncherPaths,
};

pub fn save_options(paths: &LauncherPaths, options: &Options) -> Result<()> {
    std::fs::create_dir_all(&paths.root).at(&paths.root)?;

    let data = serde_json::to_vec(options).map_err(|err| LauncherError::Serialize("options", err))?;
    let path = paths.options_file();
    std::fs::write(&path, data).at(&path)?;
    debug!("Saved options to {}", path.display());

    Ok(())
}

/// Never-saved options load as blank.
pub fn load_options(paths: &LauncherPaths) -> Result<Options> {
    let path = paths.options_file();
    match std::fs::read(&path) {
        Ok(data) => Ok(Options::construct(data.as_slice())?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Options::blank()),
        Err(err) => Err(err).at(&path),
    }
}

#[cfg(test)]
mod tests {
    use packlaunch_core::ContractError;

    use super::*;

    fn temp_paths() -> (tempfile::TempDir, LauncherPaths) {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = LauncherPaths::new(temp.path().join("launcher"), "testpack");
        (temp, paths)
    }

    #[test]
    fn missing_file_is_blank() {
        let (_temp, paths) = temp_paths();
        assert_eq!(load_options(&paths).unwrap(), Options::default());
    }

    #[test]
    fn save_then_load() {
        let (_temp, paths) = temp_paths();
        let options = Options {
            nickname: "Steve".to_string(),
            ram: 4096,
        };
        save_options(&paths, &options).unwrap();

        let raw = std::fs::read_to_string(paths.options_file()).unwrap();
        assert_eq!(raw, r#"{"nickname":"Steve","ram":4096}"#);
        assert_eq!(load_options(&paths).unwrap(), options);
    }

    #[test]
    fn nickname_only_file_still_loads() {
        let (_temp, paths) = temp_paths();
        std::fs::create_dir_all(&paths.root).unwrap();
        std::fs::write(paths.options_file(), r#"{"nickname":"Alex"}"#).unwrap();

        let options = load_options(&paths).unwrap();
        assert_eq!(options.nickname, "Alex");
        assert_eq!(options.ram, 0);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let (_temp, paths) = temp_paths();
        std::fs::create_dir_all(&paths.root).unwrap();
        std::fs::write(paths.options_file(), "nickname=Alex").unwrap();

        assert!(matches!(
            load_options(&paths),
            Err(LauncherError::Contract(ContractError::MalformedPayload(_)))
        ));
    }
}
