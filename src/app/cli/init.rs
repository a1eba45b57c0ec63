//! Init command implementation.

use crate::domain::AppError;

pub fn run_init() -> Result<(), AppError> {
    crate::app::api::init()?;
    println!("✅ Created .copyforge/config.toml");
    println!("  Set GEMINI_API_KEY before running features, or pass --mock to try them offline.");
    Ok(())
}
