//! Robot record types.
//!
//! A [`RobotDraft`] holds the raw text captured by the create form. Once the
//! draft passes validation, the submission handler turns it into a
//! [`Robot`], adding the synthesised identity, visibility flag and avatar.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Form fields collected for a new robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Contact email address.
    Email,
    /// Display name of the selected country.
    Country,
    /// Free-text description of the robot.
    Description,
}

impl Field {
    /// Every field in form order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Country,
        Self::Description,
    ];

    /// Machine-readable field key, as used in the record's JSON form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Country => "country",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw, unvalidated form input.
///
/// Every field starts out as the empty string, which is also the sentinel
/// for "no country selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotDraft {
    /// Given name as typed.
    pub first_name: String,
    /// Family name as typed.
    pub last_name: String,
    /// Email address as typed.
    pub email: String,
    /// Selected country display name, or empty when nothing is selected.
    pub country: String,
    /// Description as typed.
    pub description: String,
}

impl RobotDraft {
    /// Returns the current raw value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Country => &self.country,
            Field::Description => &self.description,
        }
    }

    /// Replaces the raw value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Country => &mut self.country,
            Field::Description => &mut self.description,
        };
        *slot = value.into();
    }
}

/// Identifier assigned to a robot when it joins the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RobotId(u64);

impl RobotId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated draft and its avatar, waiting for a collection to assign an
/// identifier.
///
/// Only the submission handler creates these, so every robot that reaches a
/// collection has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRobot {
    draft: RobotDraft,
    avatar: Url,
}

impl NewRobot {
    pub(crate) const fn new(draft: RobotDraft, avatar: Url) -> Self {
        Self { draft, avatar }
    }

    /// Avatar the robot will carry.
    #[must_use]
    pub const fn avatar(&self) -> &Url {
        &self.avatar
    }

    /// Completes the robot with `id`.
    #[must_use]
    pub fn into_robot(self, id: RobotId) -> Robot {
        Robot::from_validated(id, self.draft, self.avatar)
    }
}

/// A catalogue entry.
///
/// ## Invariants
/// - The profile fields are the draft values captured at submission time.
/// - `id`, `show` and `avatar` are written once, when the robot is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Robot {
    id: RobotId,
    first_name: String,
    last_name: String,
    email: String,
    country: String,
    description: String,
    show: bool,
    avatar: Url,
}

impl Robot {
    /// Builds a visible robot from a draft that has already passed
    /// validation.
    pub(crate) fn from_validated(id: RobotId, draft: RobotDraft, avatar: Url) -> Self {
        let RobotDraft {
            first_name,
            last_name,
            email,
            country,
            description,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
            country,
            description,
            show: true,
            avatar,
        }
    }

    /// Collection identifier.
    #[must_use]
    pub const fn id(&self) -> RobotId {
        self.id
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Contact email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Country display name.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the browse view lists this robot.
    #[must_use]
    pub const fn show(&self) -> bool {
        self.show
    }

    /// Avatar image location.
    #[must_use]
    pub const fn avatar(&self) -> &Url {
        &self.avatar
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
