//! Interactive form state for creating a robot.
//!
//! Errors stay hidden until the first submit attempt. From then on every
//! edit re-validates the edited field immediately, so messages disappear as
//! soon as the input is corrected. Blurring a field only marks it touched.

use std::collections::BTreeSet;

use crate::country::{CountryLookup, SelectOption};
use crate::error::SubmissionError;
use crate::navigation::Navigator;
use crate::robot::{Field, Robot, RobotDraft};
use crate::store::RobotCollection;
use crate::submission::SubmissionHandler;
use crate::token::TokenSource;
use crate::validation::{ValidationReport, validate, validate_field};

/// State of one create-robot form.
///
/// # Example
///
/// ```
/// use robot_catalog::{CountryLookup, CreateRobotForm, Field};
///
/// let mut form = CreateRobotForm::new(CountryLookup::bundled().expect("lookup"));
/// form.set(Field::FirstName, "A");
///
/// // Nothing is reported before the first submit attempt.
/// assert!(form.errors().is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct CreateRobotForm {
    lookup: CountryLookup,
    draft: RobotDraft,
    errors: ValidationReport,
    touched: BTreeSet<Field>,
    submit_count: u32,
}

impl CreateRobotForm {
    /// Creates an empty form validating countries against `lookup`.
    #[must_use]
    pub fn new(lookup: CountryLookup) -> Self {
        Self {
            lookup,
            draft: RobotDraft::default(),
            errors: ValidationReport::default(),
            touched: BTreeSet::new(),
            submit_count: 0,
        }
    }

    /// Current raw value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.draft.get(field)
    }

    /// Current raw input.
    #[must_use]
    pub const fn draft(&self) -> &RobotDraft {
        &self.draft
    }

    /// Options for the country select control.
    #[must_use]
    pub fn country_options(&self) -> Vec<SelectOption> {
        self.lookup.options()
    }

    /// Records an edit, re-validating the field once the form has been
    /// submitted at least once.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        if self.is_submitted() {
            let verdict = validate_field(field, self.draft.get(field), &self.lookup);
            self.errors.update(field, verdict);
        }
    }

    /// Marks `field` as touched.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// Returns `true` once `field` has lost focus at least once.
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Errors currently shown next to the fields.
    #[must_use]
    pub const fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    /// Returns `true` after the first submit attempt.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    /// Number of submit attempts since the form was created or last reset.
    #[must_use]
    pub const fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Attempts to submit the form through `handler`.
    ///
    /// Every field is validated and the results replace the shown errors.
    /// The handler is only invoked when all fields pass; after it succeeds
    /// the form is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Rejected`] when any field is invalid, or
    /// whatever the handler returns.
    pub fn submit<C, N, T>(
        &mut self,
        handler: &mut SubmissionHandler<C, N, T>,
    ) -> Result<Robot, SubmissionError>
    where
        C: RobotCollection + ?Sized,
        N: Navigator + ?Sized,
        T: TokenSource,
    {
        self.submit_count = self.submit_count.saturating_add(1);
        self.errors = validate(&self.draft, &self.lookup);
        if !self.errors.is_valid() {
            return Err(SubmissionError::Rejected(self.errors.clone()));
        }

        let robot = handler.submit(self.draft.clone())?;
        self.reset();
        Ok(robot)
    }

    /// Clears every value, error and interaction flag.
    pub fn reset(&mut self) {
        self.draft = RobotDraft::default();
        self.errors = ValidationReport::default();
        self.touched.clear();
        self.submit_count = 0;
    }
}
