use thiserror::Error;

use crate::api::ApiError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end an invocation.
/// Config, credential and input errors are raised before any request goes out.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot open configuration file: {path}")]
    ConfigOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse configuration file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Set Gemini API credentials, missing: {}", .missing.join(", "))]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("timestamp not valid: {0}")]
    InvalidTimestamp(String),

    #[error("Error invalid {what}: {value}\nValid {what_plural}: {valid}")]
    InvalidChoice {
        what: &'static str,
        what_plural: &'static str,
        value: String,
        valid: String,
    },

    /// Passed through from the REST collaborator untouched.
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("cannot format response: {0}")]
    Output(#[from] serde_json::Error),
}
