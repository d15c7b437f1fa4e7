use thiserror::Error;

#[derive(Error, Debug)]
pub enum HacklineError {
    /// The request target could not be assembled. Not retryable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport failure with an underlying cause.
    #[error("Request failed: {0}")]
    Domain(String),

    /// Transport failure with no discernible cause.
    #[error("Unknown transport error")]
    Unknown,

    /// The top-level JSON envelope could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The HTML document could not be parsed.
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// A newer search superseded this one.
    #[error("Cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HacklineError {
    /// Whether repeating the same call could succeed without upstream changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::Unknown)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// A failed transport call: `Domain` when there is a cause to report,
    /// `Unknown` when there is none.
    fn transport(message: String, has_cause: bool) -> Self {
        if has_cause {
            Self::Domain(message)
        } else {
            Self::Unknown
        }
    }
}

impl From<reqwest::Error> for HacklineError {
    fn from(err: reqwest::Error) -> Self {
        let has_cause = err.status().is_some() || std::error::Error::source(&err).is_some();
        Self::transport(err.to_string(), has_cause)
    }
}

impl From<url::ParseError> for HacklineError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<crate::config::ConfigError> for HacklineError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HacklineError>;
