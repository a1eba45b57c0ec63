//! Run command implementation.

use std::io::{ErrorKind, IsTerminal};

use clap::Args;
use dialoguer::{Error as DialoguerError, Input, Select};

use crate::app::api::{InputInfo, RunOptions, RunResult};
use crate::domain::AppError;

use super::EXIT_UPGRADE_REQUIRED;

#[derive(Args)]
pub struct RunArgs {
    /// Feature identifier (see `copyforge list`)
    feature: String,
    /// Input value as name=value; repeat for each input
    #[arg(short = 'i', long = "input", value_name = "NAME=VALUE", value_parser = parse_input_pair)]
    inputs: Vec<(String, String)>,
    /// Print the normalized result as JSON
    #[arg(long)]
    json: bool,
    /// Answer from the offline backend (every field uses its fallback)
    #[arg(long, conflicts_with = "prompt_preview")]
    mock: bool,
    /// Show the assembled prompt without executing
    #[arg(long, conflicts_with = "mock")]
    prompt_preview: bool,
}

fn parse_input_pair(raw: &str) -> Result<(String, String), String> {
    let (name, value) =
        raw.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("input name is empty in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn run_feature(args: RunArgs) -> Result<i32, AppError> {
    let Some(inputs) = resolve_inputs(&args.feature, args.inputs)? else {
        return Ok(0);
    };

    if args.prompt_preview {
        let prompt = crate::app::api::preview_prompt(&args.feature, inputs)?;
        println!("{}", prompt);
        return Ok(0);
    }

    let options = RunOptions { feature: args.feature, inputs, mock: args.mock };
    match crate::app::api::run(options)? {
        RunResult::Rendered { feature, value } => {
            if args.json {
                let json = serde_json::to_string_pretty(&value).map_err(|e| {
                    AppError::ParseError { what: "result".to_string(), details: e.to_string() }
                })?;
                println!("{}", json);
            } else {
                print!("{}", crate::app::api::render_result(&feature, &value)?);
            }
            Ok(0)
        }
        RunResult::UpgradeRequested { upgrade_url } => {
            eprintln!("⚠️  Your free run has been used.");
            eprintln!("  Upgrade to keep generating: {}", upgrade_url);
            Ok(EXIT_UPGRADE_REQUIRED)
        }
    }
}

/// Prompt for any declared input not given with `-i` when attached to a terminal.
///
/// Returns `None` when the user cancels.
fn resolve_inputs(
    feature: &str,
    mut provided: Vec<(String, String)>,
) -> Result<Option<Vec<(String, String)>>, AppError> {
    if !std::io::stdin().is_terminal() {
        return Ok(Some(provided));
    }

    let detail = crate::app::api::describe(feature)?;
    for input in &detail.inputs {
        if provided.iter().any(|(name, _)| name == &input.name) {
            continue;
        }
        let Some(value) = prompt_input(input)? else {
            return Ok(None);
        };
        provided.push((input.name.clone(), value));
    }
    Ok(Some(provided))
}

fn prompt_input(input: &InputInfo) -> Result<Option<String>, AppError> {
    if !input.choices.is_empty() {
        let selection = Select::new()
            .with_prompt(&input.label)
            .items(&input.choices)
            .default(0)
            .interact_opt()
            .map_err(|err| {
                AppError::Validation(format!("Failed to select {}: {}", input.name, err))
            })?;
        return Ok(selection.map(|index| input.choices[index].clone()));
    }

    match Input::<String>::new().with_prompt(&input.label).interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Validation(format!("Failed to read {}: {}", input.name, err))),
    }
}
