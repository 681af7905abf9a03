use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use colored::Colorize;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use packlaunch_core::{Contract, ModpackManifest, ModpackStatus};
use reqwest::Client;

use crate::{
    error::{IoContext, LauncherError, Result},
    paths::LauncherPaths,
};

const APP_USER_AGENT: &str = concat!("packlaunch/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<Client> {
    Ok(Client::builder().user_agent(APP_USER_AGENT).build()?)
}

/// The installed manifest, if there is a readable one.
pub fn read_local_manifest(paths: &LauncherPaths) -> Option<ModpackManifest> {
    let path = paths.manifest_file();
    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            debug!("No local manifest at {}: {}", path.display(), err);
            return None;
        }
    };
    match ModpackManifest::construct(data.as_slice()) {
        Ok(manifest) => Some(manifest),
        Err(err) => {
            warn!("Ignoring local manifest {}: {}", path.display(), err);
            None
        }
    }
}

pub async fn fetch_manifest(client: &Client, url: &str) -> Result<ModpackManifest> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LauncherError::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let text = response.text().await?;
    Ok(ModpackManifest::construct(text)?)
}

/// Nothing installed compares as the empty version.
pub fn needs_update(local: Option<&ModpackManifest>, remote: &ModpackManifest) -> bool {
    let local_version = local.map(|m| m.version.as_str()).unwrap_or_default();
    local_version != remote.version
}

pub async fn check_modpack(
    client: &Client,
    paths: &LauncherPaths,
    manifest_url: &str,
) -> Result<ModpackStatus> {
    let local = read_local_manifest(paths);
    let remote = fetch_manifest(client, manifest_url).await?;

    if !needs_update(local.as_ref(), &remote) {
        info!("Modpack {} is up to date", remote.version.green());
        return Ok(ModpackStatus::UpToDate);
    }

    match &local {
        Some(local) => info!(
            "Updating modpack {} -> {}",
            local.version.yellow(),
            remote.version.green()
        ),
        None => info!("Installing modpack {}", remote.version.green()),
    }
    update_modpack(client, paths, &remote).await?;

    Ok(if local.is_some() {
        ModpackStatus::Updated
    } else {
        ModpackStatus::Installed
    })
}

/// Downloads and unpacks the archive, then records the manifest.
///
/// `manifest.json` is only written once the archive is in place, so an
/// interrupted update is retried by the next check.
pub async fn update_modpack(
    client: &Client,
    paths: &LauncherPaths,
    manifest: &ModpackManifest,
) -> Result<()> {
    std::fs::create_dir_all(&paths.modpack_dir).at(&paths.modpack_dir)?;

    let archive = paths.archive_file();
    let unpacked = match download_file(client, &manifest.url, &archive).await {
        Ok(()) => extract_archive(&archive, &paths.modpack_dir),
        Err(err) => Err(err),
    };
    if archive.exists() {
        if let Err(err) = std::fs::remove_file(&archive) {
            warn!("Could not remove {}: {}", archive.display(), err);
        }
    }
    let count = unpacked?;
    info!("[{}] Unpacked {} files", "+".green(), count);

    let data = serde_json::to_vec(manifest)
        .map_err(|err| LauncherError::Serialize("manifest", err))?;
    let manifest_path = paths.manifest_file();
    std::fs::write(&manifest_path, data).at(&manifest_path)?;

    Ok(())
}

pub async fn download_file(client: &Client, url: &str, path: &Path) -> Result<()> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LauncherError::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let total_size = response.content_length();

    let bar = if let Some(size) = total_size {
        let bar = ProgressBar::new(size);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:.cyan/blue}] {bytes}/{total_bytes}",
        ) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    } else {
        ProgressBar::new_spinner()
    };

    let mut file = File::create(path).at(path)?;
    let mut bar_progress: u64 = 0;
    bar.set_position(bar_progress);
    bar.tick();

    let mut file_stream = response.bytes_stream();

    while let Some(chunk) = file_stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).at(path)?;
        bar_progress += chunk.len() as u64;
        bar.set_position(bar_progress);
        bar.tick();
    }
    file.flush().at(path)?;

    bar.finish();

    Ok(())
}

/// Unpacks a zip archive into `dest` and returns the number of files written.
/// Entries that would escape `dest` are skipped.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path).at(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut written = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let relative: PathBuf = match entry.enclosed_name() {
            Some(path) => path,
            None => {
                warn!("Skipping unsafe archive entry {}", entry.name());
                continue;
            }
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path).at(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).at(parent)?;
        }
        let mut out_file = File::create(&out_path).at(&out_path)?;
        std::io::copy(&mut entry, &mut out_file).at(&out_path)?;
        written += 1;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode))
                    .at(&out_path)?;
            }
        }
    }

    Ok(written)
}
