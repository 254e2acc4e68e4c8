use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API error: {0}")]
    Api(#[from] rbxthumb_api::ApiError),

    #[error("{0}")]
    Core(#[from] rbxthumb_core::CoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Config directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("TOML parsing error: {0}")]
    TomlError(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
