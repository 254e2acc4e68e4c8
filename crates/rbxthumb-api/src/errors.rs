use thiserror::Error;

/// API-specific errors for rbxthumb-api
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Core(#[from] rbxthumb_core::CoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// True for caller mistakes caught before any request was sent
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ApiError::Core(rbxthumb_core::CoreError::InvalidArgument(_))
        )
    }

    /// Status code of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(http) => http.status(),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// The server answered 408
    #[error("Request timeout: {message}")]
    Timeout { message: String },

    /// No response arrived within the configured client timeout
    #[error("Request timed out before the server responded")]
    ClientTimeout,

    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl HttpError {
    /// Status code sent by the server, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::RateLimited { .. } => Some(429),
            HttpError::ServiceUnavailable { .. } => Some(503),
            HttpError::Timeout { .. } => Some(408),
            HttpError::ClientTimeout => None,
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Response body of the failed request, when the server sent one
    pub fn message(&self) -> Option<&str> {
        match self {
            HttpError::RateLimited { message }
            | HttpError::ServiceUnavailable { message }
            | HttpError::Timeout { message }
            | HttpError::Status { message, .. } => Some(message),
            HttpError::ClientTimeout | HttpError::Request(_) => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, HttpError::RateLimited { .. })
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
