use thiserror::Error;

/// Everything that can stop a report from being produced.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid API key: {0}")]
    InvalidCredential(String),

    #[error("Please enter a valid city name ('{0}' was not found)")]
    UnresolvableCity(String),

    #[error("No weather details found for '{0}'. Please check the city name and try again.")]
    EmptyWeatherResult(String),

    #[error("Error occurred while extracting weather details: {0}")]
    FieldExtraction(String),

    #[error("Weather provider request failed with status {status}: {body}")]
    Provider { status: u16, body: String },

    /// Built through `From`, which strips the request URL (it carries the API key).
    #[error("Failed to reach the weather provider: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ReportError {
    pub fn field(msg: impl Into<String>) -> Self {
        ReportError::FieldExtraction(msg.into())
    }

    /// Process exit code for this failure. `2` is left to clap's usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::InvalidCredential(_) => 3,
            ReportError::UnresolvableCity(_) => 4,
            ReportError::EmptyWeatherResult(_) => 5,
            ReportError::FieldExtraction(_) => 6,
            ReportError::Provider { .. } | ReportError::Transport(_) => 1,
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        ReportError::Transport(err.without_url())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::FieldExtraction(err.to_string())
    }
}
