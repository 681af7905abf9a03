use std::path::{Path, PathBuf};

use crate::config::Config;

const OPTIONS_FILE: &str = "options.json";
const MANIFEST_FILE: &str = "manifest.json";
const ARCHIVE_FILE: &str = "modpack.zip.part";
const RUNTIME_NAME: &str = "java-runtime-gamma";

#[derive(Clone, Debug)]
pub struct LauncherPaths {
    pub root: PathBuf,
    pub modpack_dir: PathBuf,
}

impl LauncherPaths {
    pub fn new(root: impl Into<PathBuf>, modpack_name: &str) -> Self {
        let root = root.into();
        let modpack_dir = root.join(modpack_name);
        LauncherPaths { root, modpack_dir }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_dir, &config.modpack_name)
    }

    pub fn options_file(&self) -> PathBuf {
        self.root.join(OPTIONS_FILE)
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.modpack_dir.join(MANIFEST_FILE)
    }

    pub fn archive_file(&self) -> PathBuf {
        self.modpack_dir.join(ARCHIVE_FILE)
    }

    /// Java shipped inside the modpack under `runtime/`.
    pub fn bundled_java(&self) -> PathBuf {
        bundled_java_in(&self.modpack_dir, runtime_platform())
    }
}

fn bundled_java_in(modpack_dir: &Path, platform: &str) -> PathBuf {
    let binary = if platform.starts_with("windows") {
        "java.exe"
    } else {
        "java"
    };
    modpack_dir
        .join("runtime")
        .join(RUNTIME_NAME)
        .join(platform)
        .join(RUNTIME_NAME)
        .join("bin")
        .join(binary)
}

/// Platform directory names used by Mojang's runtime layout.
pub fn runtime_platform() -> &'static str {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("windows", "x86") => "windows-x86",
        ("windows", "aarch64") => "windows-arm64",
        ("windows", _) => "windows-x64",
        ("macos", "aarch64") => "mac-os-arm64",
        ("macos", _) => "mac-os",
        ("linux", "x86") => "linux-i386",
        _ => "linux",
    }
}
