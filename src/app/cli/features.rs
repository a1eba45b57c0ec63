//! List and show command implementations.

use crate::domain::AppError;

pub fn run_list() -> Result<(), AppError> {
    let features = crate::app::api::features()?;
    println!("Available features:");
    for feature in features {
        println!("  {} - {}", feature.id, feature.summary);
    }
    Ok(())
}

pub fn run_show(id: &str) -> Result<(), AppError> {
    let detail = crate::app::api::describe(id)?;
    println!("{} ({})", detail.title, detail.id);
    println!("{}", detail.summary);

    println!("\nInputs:");
    for input in &detail.inputs {
        if input.choices.is_empty() {
            println!("  • {} - {}", input.name, input.label);
        } else {
            println!("  • {} - {} [{}]", input.name, input.label, input.choices.join(", "));
        }
    }

    let shape = serde_json::to_string_pretty(&detail.shape).map_err(|e| AppError::ParseError {
        what: "result shape".to_string(),
        details: e.to_string(),
    })?;
    println!("\nResult shape:");
    println!("{}", shape);
    Ok(())
}
