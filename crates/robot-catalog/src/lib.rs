//! Validation and submission pipeline for a catalogue of synthetic robot
//! profiles.
//!
//! A create form collects a robot's names, email, country and description.
//! This crate decides whether that input is well formed, turns it into a
//! [`Robot`] with a synthesised identity and avatar, and inserts it at the
//! front of a session-wide, in-memory collection.
//!
//! # Overview
//!
//! - [`validate`] runs the declarative rule table and returns a
//!   [`ValidationReport`] with at most one message per field
//! - [`SubmissionHandler`] validates and commits in one step, selects the
//!   new robot and asks the [`Navigator`] to show the browse view
//! - [`InMemoryRobotStore`] holds the collection and publishes
//!   [`StoreEvent`]s to subscribers
//! - [`CreateRobotForm`] tracks edits, blur and submit attempts
//! - [`CountryLookup`] is the reference table behind the country field
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use robot_catalog::{
//!     AvatarFactory, CountryLookup, InMemoryRobotStore, RandomTokenSource, RecordingNavigator,
//!     RobotCollection, RobotDraft, Route, SubmissionHandler,
//! };
//!
//! let store = Arc::new(InMemoryRobotStore::new());
//! let navigator = Arc::new(RecordingNavigator::default());
//! let mut handler = SubmissionHandler::new(
//!     CountryLookup::bundled().expect("bundled lookup"),
//!     AvatarFactory::default(),
//!     RandomTokenSource::seeded(42),
//!     Arc::clone(&store),
//!     Arc::clone(&navigator),
//! );
//!
//! let robot = handler
//!     .submit(RobotDraft {
//!         first_name: "Ada".to_owned(),
//!         last_name: "Lovelace".to_owned(),
//!         email: "ada@x.com".to_owned(),
//!         country: "France".to_owned(),
//!         description: "a pioneering programmer".to_owned(),
//!     })
//!     .expect("valid draft");
//!
//! assert_eq!(robot.id().get(), 1);
//! assert_eq!(store.current_list(), vec![robot]);
//! assert_eq!(navigator.visited(), [Route::Browse]);
//! ```

pub mod cli;
mod config;
mod country;
mod error;
mod form;
mod navigation;
mod robot;
mod store;
mod submission;
mod token;
mod validation;

pub use config::CatalogSettings;
pub use country::{Country, CountryLookup, PLACEHOLDER_LABEL, SelectOption};
pub use error::{AvatarError, CountryLookupError, SubmissionError};
pub use form::CreateRobotForm;
pub use navigation::{LoggingNavigator, Navigator, RecordingNavigator, Route};
pub use robot::{Field, NewRobot, Robot, RobotDraft, RobotId};
pub use store::{InMemoryRobotStore, RobotCollection, StoreEvent};
pub use submission::SubmissionHandler;
pub use token::{
    AvatarFactory, DEFAULT_AVATAR_BASE, RandomTokenSource, TOKEN_LENGTH, TokenSource,
};
pub use validation::{
    DESCRIPTION_MIN_LENGTH, FailureKind, FieldError, NAME_MIN_LENGTH, ValidationReport,
    is_valid_email, validate, validate_field,
};
