use thiserror::Error;

/// Core domain errors - no I/O dependencies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown {kind} value: {value:?}")]
    InvalidWireValue { kind: &'static str, value: String },
}

impl From<std::convert::Infallible> for CoreError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
