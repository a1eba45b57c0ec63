//! Trial command implementation.

use clap::Subcommand;

use crate::domain::{AppError, TrialState};

#[derive(Subcommand)]
pub enum TrialCommands {
    /// Show whether the free run is still available
    Status,
    /// Make the free run available again
    Reset,
}

pub fn run_trial(command: TrialCommands) -> Result<(), AppError> {
    match command {
        TrialCommands::Status => {
            let status = crate::app::api::trial_status()?;
            if status.subscribed {
                println!("✅ Subscribed: runs are not limited");
            } else {
                match status.trial {
                    TrialState::Available => println!("✅ Free trial available (1 run)"),
                    TrialState::Consumed { at } => {
                        println!("⚠️  Free trial used on {}", at.format("%Y-%m-%d %H:%M UTC"))
                    }
                }
            }
        }
        TrialCommands::Reset => {
            crate::app::api::trial_reset()?;
            println!("✅ Free trial reset");
        }
    }
    Ok(())
}
