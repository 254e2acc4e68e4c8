pub mod cli;
pub mod config;
pub mod display;
pub mod errors;

// Re-export main public types
pub use errors::{CliError, ConfigError, Result};
pub use rbxthumb_api::{RobloxClient, ThumbnailProvider};

// Re-export for CLI usage
pub use config::Config;
