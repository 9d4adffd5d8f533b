//! Error types for the robot catalogue.
//!
//! Validation failures are not errors: they are reported as data through
//! [`crate::ValidationReport`]. The enums here cover the boundaries that can
//! genuinely fail, following the project's `thiserror` conventions.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// Errors raised while loading the country reference lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryLookupError {
    /// The lookup file could not be read.
    #[error("failed to read country lookup at '{path}': {message}")]
    IoError {
        /// Path to the lookup file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The lookup JSON is malformed or missing required fields.
    #[error("invalid country lookup JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The lookup version is not supported.
    #[error("unsupported country lookup version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the document.
        actual: u32,
    },

    /// The lookup contains no countries.
    #[error("country lookup contains no entries")]
    Empty,

    /// A country code is not two uppercase ASCII letters.
    #[error("invalid country code '{code}'")]
    InvalidCode {
        /// The rejected code.
        code: String,
    },

    /// A country has a blank display name.
    #[error("country '{code}' has a blank display name")]
    BlankName {
        /// Code of the offending entry.
        code: String,
    },

    /// Two countries share a display name, so the name cannot identify an
    /// option.
    #[error("display name '{name}' is used by both '{first}' and '{second}'")]
    DuplicateName {
        /// The shared display name.
        name: String,
        /// Code of the first entry carrying the name.
        first: String,
        /// Code of the second entry carrying the name.
        second: String,
    },
}

/// Errors raised while building avatar URLs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    /// The configured base is not a valid URL.
    #[error("invalid avatar base URL '{value}': {message}")]
    InvalidBase {
        /// The configured base URL.
        value: String,
        /// Parser error message.
        message: String,
    },

    /// The configured base cannot have paths appended to it.
    #[error("avatar base URL '{value}' cannot be used as a base")]
    CannotBeBase {
        /// The configured base URL.
        value: String,
    },

    /// The token could not be appended to the base.
    #[error("failed to append avatar token '{token}': {message}")]
    InvalidToken {
        /// The token that was rejected.
        token: String,
        /// Why the token was rejected.
        message: String,
    },
}

/// Errors returned by [`crate::SubmissionHandler::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// At least one field failed validation; nothing was committed.
    #[error("submission rejected: {} invalid field(s)", .0.len())]
    Rejected(ValidationReport),

    /// The avatar URL could not be synthesised.
    #[error("avatar synthesis failed: {0}")]
    Avatar(#[from] AvatarError),
}

impl SubmissionError {
    /// Returns the validation report when the submission was rejected.
    #[must_use]
    pub const fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Rejected(report) => Some(report),
            Self::Avatar(_) => None,
        }
    }
}
