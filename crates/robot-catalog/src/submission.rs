//! Submission handler for the create-robot form.
//!
//! Validation and commit form one operation: a draft that fails any rule is
//! rejected before anything is written, so callers cannot insert invalid
//! robots by skipping the form's own gating.

use std::sync::Arc;

use tracing::{debug, info};

use crate::country::CountryLookup;
use crate::error::SubmissionError;
use crate::navigation::{Navigator, Route};
use crate::robot::{NewRobot, Robot, RobotDraft};
use crate::store::RobotCollection;
use crate::token::{AvatarFactory, TokenSource};
use crate::validation::{ValidationReport, validate};

/// Validates drafts and commits them to the shared collection.
pub struct SubmissionHandler<C: ?Sized, N: ?Sized, T> {
    lookup: CountryLookup,
    avatars: AvatarFactory,
    tokens: T,
    collection: Arc<C>,
    navigator: Arc<N>,
}

impl<C, N, T> SubmissionHandler<C, N, T>
where
    C: RobotCollection + ?Sized,
    N: Navigator + ?Sized,
    T: TokenSource,
{
    /// Creates a handler writing to `collection` and navigating through
    /// `navigator`.
    pub const fn new(
        lookup: CountryLookup,
        avatars: AvatarFactory,
        tokens: T,
        collection: Arc<C>,
        navigator: Arc<N>,
    ) -> Self {
        Self {
            lookup,
            avatars,
            tokens,
            collection,
            navigator,
        }
    }

    /// Country lookup used for validation.
    pub const fn lookup(&self) -> &CountryLookup {
        &self.lookup
    }

    /// Collection the handler writes to.
    pub const fn collection(&self) -> &Arc<C> {
        &self.collection
    }

    /// Validates `draft` without committing anything.
    pub fn validate(&self, draft: &RobotDraft) -> ValidationReport {
        validate(draft, &self.lookup)
    }

    /// Validates `draft` and, when every field passes, creates the robot.
    ///
    /// On success the new robot is visible, carries a freshly synthesised
    /// avatar, sits at the front of the collection and is the active
    /// selection; the navigator is then sent to [`Route::Browse`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Rejected`] with the full report when any
    /// field is invalid, or [`SubmissionError::Avatar`] when the avatar URL
    /// cannot be built. Neither case touches the collection, the selection
    /// or navigation.
    pub fn submit(&mut self, draft: RobotDraft) -> Result<Robot, SubmissionError> {
        let report = self.validate(&draft);
        if !report.is_valid() {
            debug!(invalid_fields = report.len(), "robot submission rejected");
            return Err(SubmissionError::Rejected(report));
        }

        let token = self.tokens.short_token();
        let avatar = self.avatars.avatar_for(&token)?;
        let robot = self.collection.insert_new(NewRobot::new(draft, avatar));

        info!(id = %robot.id(), country = robot.country(), "robot created");
        self.navigator.go_to(Route::Browse);

        Ok(robot)
    }
}
