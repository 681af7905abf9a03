use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{error, info};
use packlaunch_core::Options;

use crate::{config::Config, paths::LauncherPaths};

mod config;
mod error;
mod launch;
mod modpack;
mod options;
mod paths;

/// Memory used when neither the command line nor saved options set one.
const DEFAULT_RAM: i64 = 4096;

/// Keep your modpack up to date and start the game!
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a packlaunch.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the launcher version
    Version,
    /// Show or change saved launch options
    #[command(subcommand)]
    Options(OptionsCommand),
    /// Install the modpack, or update it if a new version is published
    Check,
    /// Download and unpack the published modpack even if it is current
    Update,
    /// Start the game
    Launch(LaunchArgs),
}

#[derive(Subcommand)]
enum OptionsCommand {
    /// Print the saved options
    Show,
    /// Change the saved options
    Set {
        #[arg(short, long)]
        nickname: Option<String>,
        /// Memory for the game in megabytes
        #[arg(short, long)]
        ram: Option<i64>,
    },
}

#[derive(clap::Args)]
struct LaunchArgs {
    /// Offline nickname, defaults to the saved one
    #[arg(short, long)]
    nickname: Option<String>,

    /// Memory for the game in megabytes, defaults to the saved value
    #[arg(short, long)]
    ram: Option<i64>,

    /// Wait for the game and forward its output
    #[arg(short, long)]
    attach: bool,

    /// Launch the installed modpack without checking for updates
    #[arg(long)]
    skip_check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    pretty_env_logger::init();

    let args = Args::parse();

    if let Err(err) = run(args).await {
        error!("{} {}", "Error:".bright_red(), err);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    if let Commands::Version = args.commands {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    let paths = LauncherPaths::from_config(&config);

    match args.commands {
        Commands::Version => {}
        Commands::Options(OptionsCommand::Show) => {
            let saved = options::load_options(&paths)?;
            println!("nickname: {}", saved.nickname);
            println!("ram: {}", saved.ram);
        }
        Commands::Options(OptionsCommand::Set { nickname, ram }) => {
            let mut saved = options::load_options(&paths)?;
            if let Some(nickname) = nickname {
                saved.nickname = nickname;
            }
            if let Some(ram) = ram {
                saved.ram = ram;
            }
            options::save_options(&paths, &saved)?;
            info!("Options saved to {}", paths.options_file().display());
        }
        Commands::Check => {
            let client = modpack::http_client()?;
            let status = modpack::check_modpack(&client, &paths, &config.manifest_url).await?;
            info!("Modpack check: {}", status.to_string().green());
        }
        Commands::Update => {
            let client = modpack::http_client()?;
            let manifest = modpack::fetch_manifest(&client, &config.manifest_url).await?;
            info!("Reinstalling modpack {}", manifest.version.green());
            modpack::update_modpack(&client, &paths, &manifest).await?;
            info!("{}", "Modpack installed.".green());
        }
        Commands::Launch(launch_args) => launch_command(&config, &paths, launch_args).await?,
    }

    Ok(())
}

async fn launch_command(config: &Config, paths: &LauncherPaths, args: LaunchArgs) -> anyhow::Result<()> {
    let saved = options::load_options(paths)?;
    let chosen = resolve_launch_options(&saved, args.nickname, args.ram)
        .ok_or_else(|| anyhow::anyhow!("No nickname set, pass --nickname or run `options set`"))?;
    if chosen != saved {
        options::save_options(paths, &chosen)?;
    }

    if !args.skip_check {
        let client = modpack::http_client()?;
        modpack::check_modpack(&client, paths, &config.manifest_url).await?;
    }

    launch::launch_game(
        paths,
        &chosen.nickname,
        chosen.ram,
        config.java_path.as_deref(),
        args.attach,
    )
    .await?;

    Ok(())
}

/// Command line values win over saved ones. `None` when there is no nickname.
fn resolve_launch_options(
    saved: &Options,
    nickname: Option<String>,
    ram: Option<i64>,
) -> Option<Options> {
    let nickname = nickname
        .filter(|n| !n.is_empty())
        .or_else(|| Some(saved.nickname.clone()).filter(|n| !n.is_empty()))?;
    let ram = ram
        .or_else(|| Some(saved.ram).filter(|r| *r != 0))
        .unwrap_or(DEFAULT_RAM);

    Some(Options { nickname, ram })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn launch_flags_parse() {
        let args = Args::parse_from(["packlaunch", "launch", "-n", "Steve", "--ram", "6144", "--attach"]);
        match args.commands {
            Commands::Launch(launch) => {
                assert_eq!(launch.nickname.as_deref(), Some("Steve"));
                assert_eq!(launch.ram, Some(6144));
                assert!(launch.attach);
                assert!(!launch.skip_check);
            }
            _ => panic!("expected launch"),
        }
    }

    #[test]
    fn launch_options_fall_back_to_saved() {
        let saved = Options {
            nickname: "Alex".to_string(),
            ram: 3072,
        };
        assert_eq!(resolve_launch_options(&saved, None, None), Some(saved.clone()));
        assert_eq!(
            resolve_launch_options(&saved, Some("Steve".to_string()), None),
            Some(Options {
                nickname: "Steve".to_string(),
                ram: 3072
            })
        );
    }

    #[test]
    fn launch_options_need_a_nickname() {
        assert_eq!(resolve_launch_options(&Options::default(), None, Some(1024)), None);
        assert_eq!(
            resolve_launch_options(&Options::default(), Some("Steve".to_string()), None),
            Some(Options {
                nickname: "Steve".to_string(),
                ram: DEFAULT_RAM
            })
        );
    }
}
