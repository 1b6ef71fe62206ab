use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use newteam::cli::{Commands, Credentials};
use newteam::connector::api::{Container, ContainerConfig, Router, Settings};

#[derive(Parser)]
#[command(name = "newteam")]
#[command(author, version, about = "Football squad management", long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides storage.data_dir from the settings file
    #[arg(short, long, global = true)]
    data_dir: Option<String>,

    /// Keep members and users in memory for this run only
    #[arg(long, global = true)]
    memory_storage: bool,

    #[arg(short, long, global = true, env = "NEWTEAM_USER")]
    user: Option<String>,

    #[arg(short, long, global = true, env = "NEWTEAM_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::load(cli.config.as_deref())?;
    let data_dir = cli.data_dir.as_deref().map(expand_tilde);
    let config = ContainerConfig::from_settings(&settings, data_dir.as_deref(), cli.memory_storage);
    debug!("Data dir: {}", config.data_dir.display());

    let container = Container::new(config).await?;
    let router = Router::new(&container);

    let credentials = Credentials::new(cli.user, cli.password);
    let output = router.route(cli.command, &credentials).await?;
    println!("{}", output);

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "newteam",
            "list",
            "--role",
            "players",
            "--sort",
            "salary",
            "--desc",
            "--user",
            "admin",
            "--password",
            "secret",
            "--memory-storage",
        ])
        .expect("valid command line");

        assert!(cli.memory_storage);
        assert_eq!(cli.user.as_deref(), Some("admin"));
        assert!(matches!(cli.command, Commands::List { desc: true, .. }));
    }

    #[test]
    fn add_player_requires_position() {
        let res = Cli::try_parse_from([
            "newteam",
            "add-player",
            "--first-name",
            "Ada",
            "--last-name",
            "Hegerberg",
            "--birth-date",
            "1995-07-10",
            "--joined-on",
            "2014-01-01",
            "--salary",
            "1000",
            "--country",
            "Noruega",
            "--number",
            "14",
            "--height",
            "1.77",
            "--weight",
            "64",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("data"), "data");
    }
}
