pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
mod context;
pub mod panel;
pub mod render;

pub use context::AppContext;
