//! Command-line driver for creating a single robot.
//!
//! The `robot-create` binary delegates to this module so argument handling
//! and the submission flow can be exercised in tests without spawning a
//! process.

mod error;

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::OrthoConfig;

pub use self::error::CliError;
use crate::config::CatalogSettings;
use crate::country::CountryLookup;
use crate::navigation::LoggingNavigator;
use crate::robot::{Robot, RobotDraft};
use crate::store::InMemoryRobotStore;
use crate::submission::SubmissionHandler;
use crate::token::{AvatarFactory, RandomTokenSource};
use crate::validation::ValidationReport;

/// Program name used when loading layered settings.
const PROGRAM_NAME: &str = "robot-create";

/// `robot-create` command arguments.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "robot-create",
    about = "Validate a robot profile and add it to a fresh in-memory catalogue",
    version
)]
pub struct CliArgs {
    /// Given name.
    #[arg(long = "first-name", value_name = "name", default_value = "")]
    pub first_name: String,
    /// Family name.
    #[arg(long = "last-name", value_name = "name", default_value = "")]
    pub last_name: String,
    /// Contact email address.
    #[arg(long, value_name = "address", default_value = "")]
    pub email: String,
    /// Country display name, as listed by `--list-countries`.
    #[arg(long, value_name = "name", default_value = "")]
    pub country: String,
    /// Free-text description (at least 10 characters).
    #[arg(long, value_name = "text", default_value = "")]
    pub description: String,
    /// Country lookup JSON replacing the bundled table.
    #[arg(long = "countries", value_name = "path")]
    pub countries_path: Option<Utf8PathBuf>,
    /// Base URL for avatar images.
    #[arg(long = "avatar-base", value_name = "url")]
    pub avatar_base_url: Option<String>,
    /// Seed for reproducible avatar tokens.
    #[arg(long, value_name = "seed")]
    pub seed: Option<u64>,
    /// Print the country options and exit.
    #[arg(long = "list-countries")]
    pub list_countries: bool,
}

impl CliArgs {
    /// Collects the profile flags into a draft.
    #[must_use]
    pub fn draft(&self) -> RobotDraft {
        RobotDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            country: self.country.clone(),
            description: self.description.clone(),
        }
    }
}

/// Result of a successful command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The robot was validated and added to the catalogue.
    Created(Robot),
    /// The country listing was requested.
    Countries(CountryLookup),
}

/// Loads settings from configuration files and `ROBOT_CATALOG_*`
/// environment variables.
///
/// # Errors
///
/// Returns [`CliError::Config`] if a layer cannot be parsed.
pub fn load_settings() -> Result<CatalogSettings, CliError> {
    CatalogSettings::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| {
        CliError::Config {
            message: err.to_string(),
        }
    })
}

/// Runs the command: flags take precedence over `settings`.
///
/// # Errors
///
/// Returns [`CliError`] when the lookup or avatar base is unusable, or when
/// the submission is rejected.
pub fn run(args: &CliArgs, settings: &CatalogSettings) -> Result<Outcome, CliError> {
    let lookup = resolve_lookup(args, settings)?;
    if args.list_countries {
        return Ok(Outcome::Countries(lookup));
    }

    let avatars = AvatarFactory::new(
        args.avatar_base_url
            .as_deref()
            .unwrap_or_else(|| settings.avatar_base_url()),
    )?;
    let tokens = args
        .seed
        .or_else(|| settings.token_seed())
        .map_or_else(RandomTokenSource::from_os_rng, RandomTokenSource::seeded);

    let mut handler = SubmissionHandler::new(
        lookup,
        avatars,
        tokens,
        Arc::new(InMemoryRobotStore::new()),
        Arc::new(LoggingNavigator),
    );
    let robot = handler.submit(args.draft())?;
    Ok(Outcome::Created(robot))
}

/// Renders a robot as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CliError::Render`] if serialization fails.
pub fn render_robot(robot: &Robot) -> Result<String, CliError> {
    serde_json::to_string_pretty(robot).map_err(|err| CliError::Render {
        message: err.to_string(),
    })
}

/// Renders the lookup, one `code<TAB>emoji<TAB>name` line per country.
#[must_use]
pub fn render_countries(lookup: &CountryLookup) -> String {
    lookup
        .entries()
        .iter()
        .map(|(code, country)| format!("{code}\t{}\t{}\n", country.emoji, country.name))
        .collect()
}

/// Renders one `field: message` line per failing field.
#[must_use]
pub fn rejection_lines(report: &ValidationReport) -> Vec<String> {
    report
        .errors()
        .map(|(field, error)| format!("{field}: {}", error.message))
        .collect()
}

fn resolve_lookup(args: &CliArgs, settings: &CatalogSettings) -> Result<CountryLookup, CliError> {
    if let Some(path) = &args.countries_path {
        return Ok(CountryLookup::from_path(path)?);
    }
    match settings.countries_path() {
        Some(path) => Ok(CountryLookup::from_path(utf8_path(path)?)?),
        None => Ok(CountryLookup::bundled()?),
    }
}

fn utf8_path(path: &Path) -> Result<&Utf8Path, CliError> {
    Utf8Path::from_path(path).ok_or_else(|| CliError::NonUtf8Path {
        path: path.to_string_lossy().into_owned(),
    })
}
