//! Error types for the `robot-create` command.

use thiserror::Error;

use crate::error::{AvatarError, CountryLookupError, SubmissionError};

/// Errors surfaced by the command driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Layered settings could not be loaded.
    #[error("failed to load settings: {message}")]
    Config {
        /// Loader error message.
        message: String,
    },
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },
    /// The country lookup could not be loaded.
    #[error("country lookup error: {source}")]
    Lookup {
        /// Underlying lookup error.
        #[from]
        #[source]
        source: CountryLookupError,
    },
    /// The avatar base URL is unusable.
    #[error("avatar configuration error: {source}")]
    Avatar {
        /// Underlying avatar error.
        #[from]
        #[source]
        source: AvatarError,
    },
    /// The submission was rejected or could not be committed.
    #[error("{source}")]
    Submission {
        /// Underlying submission error.
        #[from]
        #[source]
        source: SubmissionError,
    },
    /// The created robot could not be rendered.
    #[error("failed to render robot: {message}")]
    Render {
        /// Serializer error message.
        message: String,
    },
}
