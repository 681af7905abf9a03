use std::{path::Path, process::Stdio};

use colored::Colorize;
use log::{info, warn};
use packlaunch_core::{Contract, ModpackManifest};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
    task::JoinHandle,
};

use crate::{
    error::{IoContext, LauncherError, Result},
    paths::LauncherPaths,
};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Values substituted into the manifest's command template.
#[derive(Debug, Clone)]
pub struct LaunchVars<'a> {
    pub nickname: &'a str,
    pub ram: i64,
    pub game_dir: &'a Path,
    pub java: &'a Path,
}

/// Replaces `{{nick}}`, `{{ram}}`, `{{mcdir}}` and `{{java}}` in every token.
pub fn render_command(template: &[String], vars: &LaunchVars) -> Vec<String> {
    let ram = vars.ram.to_string();
    let game_dir = vars.game_dir.to_string_lossy();
    let java = vars.java.to_string_lossy();

    template
        .iter()
        .map(|token| {
            token
                .replace("{{nick}}", vars.nickname)
                .replace("{{ram}}", &ram)
                .replace("{{mcdir}}", &game_dir)
                .replace("{{java}}", &java)
        })
        .collect()
}

fn installed_manifest(paths: &LauncherPaths) -> Result<ModpackManifest> {
    let path = paths.manifest_file();
    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(LauncherError::NotInstalled(path))
        }
        Err(err) => return Err(err).at(&path),
    };
    Ok(ModpackManifest::construct(data.as_slice())?)
}

/// Starts the game from the installed manifest's command template.
///
/// With `attach` the launcher stays around, forwards the game's output to the
/// log and reports the exit status. Otherwise it returns once the process has
/// started.
pub async fn launch_game(
    paths: &LauncherPaths,
    nickname: &str,
    ram: i64,
    java_override: Option<&Path>,
    attach: bool,
) -> Result<()> {
    let manifest = installed_manifest(paths)?;
    if !manifest.has_command() {
        return Err(LauncherError::NoCommandTemplate);
    }
    let template = manifest.command.as_deref().unwrap_or_default();

    let bundled_java = paths.bundled_java();
    let vars = LaunchVars {
        nickname,
        ram,
        game_dir: &paths.modpack_dir,
        java: java_override.unwrap_or(bundled_java.as_path()),
    };
    let args = render_command(template, &vars);
    let (exe, exec_args) = match args.split_first() {
        Some(split) => split,
        None => return Err(LauncherError::NoCommandTemplate),
    };

    let mut command = Command::new(exe);
    command
        .args(exec_args)
        .current_dir(&paths.modpack_dir)
        .stdin(Stdio::null());
    #[cfg(windows)]
    command.creation_flags(CREATE_NO_WINDOW);

    if !attach {
        command.stdout(Stdio::null()).stderr(Stdio::null());
        let child = command.spawn().map_err(LauncherError::Spawn)?;
        info!(
            "Launched {} as {} (pid {})",
            manifest.version.green(),
            nickname.blue(),
            child.id().unwrap_or_default()
        );
        return Ok(());
    }

    command.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = command.spawn().map_err(LauncherError::Spawn)?;
    info!("Launched {} as {}", manifest.version.green(), nickname.blue());

    let stdout = child.stdout.take().map(|out| tokio::spawn(stream_lines(out)));
    let stderr = child.stderr.take().map(|err| tokio::spawn(stream_lines(err)));

    let status = child.wait().await.map_err(LauncherError::Spawn)?;
    join_forwarders([stdout, stderr].into_iter().flatten()).await;

    if status.success() {
        info!("Game exited");
    } else {
        warn!("Game exited with {}", status);
    }

    Ok(())
}

/// Waits for the output forwarders and returns how many of them failed.
async fn join_forwarders<I>(tasks: I) -> usize
where
    I: IntoIterator<Item = JoinHandle<()>>,
{
    let mut failed = 0;
    for task in tasks {
        if let Err(err) = task.await {
            warn!("Game output forwarding stopped: {}", err);
            failed += 1;
        }
    }
    failed
}

async fn stream_lines<R>(reader: R)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        info!("{}", line);
    }
}
