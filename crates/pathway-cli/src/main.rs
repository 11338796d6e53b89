mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pathway",
    about = "Learning-path onboarding — answer five steps, get a personalized roadmap",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ~/.pathway/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the onboarding wizard, resuming an incomplete session
    Start {
        /// Ignore any saved session and begin at step 1
        #[arg(long)]
        fresh: bool,
    },

    /// Show the persisted onboarding session
    Status,

    /// Update preferences (weekly hours, skipped skills) outside the wizard
    Preferences {
        /// New weekly time budget in hours (5–20)
        #[arg(long)]
        hours: Option<u8>,

        /// Skill id to mark as already known (repeatable)
        #[arg(long = "skip")]
        skips: Vec<String>,

        /// Clear all skipped skills
        #[arg(long)]
        clear_skips: bool,
    },

    /// Discard all onboarding answers and overwrite the saved session
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Start { fresh } => cmd::start::run(&config, fresh).await,
            Commands::Status => cmd::status::run(&config, cli.json).await,
            Commands::Preferences { hours, skips, clear_skips } => {
                cmd::preferences::run(&config, hours, &skips, clear_skips, cli.json).await
            }
            Commands::Reset { yes } => cmd::reset::run(&config, yes).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
