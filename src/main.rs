use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use studyloop::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "studyloop")]
#[command(about = "Learning streaks, badges, and lesson content validation")]
#[command(version)]
struct Cli {
    /// Path to the project (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .studyloop/config.toml, then ~/.studyloop/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate lesson module files (exits with status 1 if any module is invalid)
    Validate {
        /// Module files, directories, or glob patterns
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a single piece of content
    Check {
        /// Content type: html, text, or code
        #[arg(long = "type", short = 't')]
        content_type: String,

        /// File to read (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a learning activity for a user
    Activity {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Activity time as RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Show a user's streak
    Streak {
        /// User identifier
        #[arg(long)]
        user: String,
    },

    /// List badges, optionally marking the ones a user holds
    Badges {
        /// User identifier
        #[arg(long)]
        user: Option<String>,
    },

    /// Initialize a new .studyloop/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, so --json output stays clean)
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Determine the working directory
    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = cli.config;

    match cli.command {
        Commands::Validate { paths, json } => {
            let config = load_config(config_path.as_deref(), &work_dir)?;
            let all_valid = cli::validate::validate_command(&config, &paths, json).await?;
            if !all_valid {
                std::process::exit(1);
            }
        }
        Commands::Check {
            content_type,
            file,
            json,
        } => {
            let config = load_config(config_path.as_deref(), &work_dir)?;
            let valid = cli::check::check_command(&config, &content_type, file, json).await?;
            if !valid {
                std::process::exit(1);
            }
        }
        Commands::Activity { user, at } => {
            let config = load_config(config_path.as_deref(), &work_dir)?;
            cli::activity::activity_command(&config, &user, at).await?;
        }
        Commands::Streak { user } => {
            let config = load_config(config_path.as_deref(), &work_dir)?;
            cli::streak::streak_command(&config, &user).await?;
        }
        Commands::Badges { user } => {
            let config = load_config(config_path.as_deref(), &work_dir)?;
            cli::badges::badges_command(&config, user).await?;
        }
        Commands::Init { force } => {
            cli::init::init_command(&work_dir, config_path, force).await?;
        }
    }

    Ok(())
}

/// Explicit --config wins; otherwise project config, then global, then defaults
fn load_config(path: Option<&Path>, work_dir: &Path) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_dir(work_dir),
    }
}
