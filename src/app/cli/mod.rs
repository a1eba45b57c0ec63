//! CLI Adapter.

mod features;
mod init;
mod run;
mod trial;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "COPYFORGE_LOG";

#[derive(Parser)]
#[command(name = "copyforge")]
#[command(version)]
#[command(about = "Marketing copy generators backed by a generative model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .copyforge/config.toml with defaults
    Init,
    /// List available features
    #[clap(visible_alias = "ls")]
    List,
    /// Show a feature's inputs and result shape
    Show {
        /// Feature identifier
        feature: String,
    },
    /// Run a feature
    #[clap(visible_alias = "r")]
    Run(run::RunArgs),
    /// Inspect or reset the free trial
    Trial {
        #[command(subcommand)]
        command: trial::TrialCommands,
    },
}

/// Exit code for a run refused by the trial gate.
pub const EXIT_UPGRADE_REQUIRED: i32 = 2;

/// Entry point for the CLI.
pub fn run() {
    init_logging();
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Init => init::run_init().map(|_| 0),
        Commands::List => features::run_list().map(|_| 0),
        Commands::Show { feature } => features::run_show(&feature).map(|_| 0),
        Commands::Run(args) => run::run_feature(args),
        Commands::Trial { command } => trial::run_trial(command).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
