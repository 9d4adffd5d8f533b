//! Country reference lookup and JSON parsing.
//!
//! The lookup maps ISO-style country codes to a display name and an emoji
//! flag. The create form offers one option per entry; the option *value* is
//! the display name, which is what ends up on the robot record.

use std::collections::BTreeMap;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::error::CountryLookupError;

/// Current supported lookup document version.
const SUPPORTED_VERSION: u32 = 1;

/// Lookup document compiled into the crate.
const BUNDLED_JSON: &str = include_str!("../data/countries.json");

/// Label shown for the empty "nothing selected" option.
pub const PLACEHOLDER_LABEL: &str = "Please select";

/// A single country entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    /// Human-readable country name, also used as the option value.
    pub name: String,
    /// Flag glyph shown next to the name.
    pub emoji: String,
}

/// One entry of the country select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value submitted when the option is chosen.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

/// Read-only table of countries keyed by code.
///
/// # Example
///
/// ```
/// use robot_catalog::CountryLookup;
///
/// let json = r#"{
///     "version": 1,
///     "countries": {"FR": {"name": "France", "emoji": "🇫🇷"}}
/// }"#;
///
/// let lookup = CountryLookup::from_json(json).expect("valid lookup");
/// assert!(lookup.contains_name("France"));
/// assert!(!lookup.contains_name("Atlantis"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryLookup {
    entries: BTreeMap<String, Country>,
}

impl CountryLookup {
    /// Returns the lookup compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CountryLookupError`] if the bundled document is invalid.
    pub fn bundled() -> Result<Self, CountryLookupError> {
        Self::from_json(BUNDLED_JSON)
    }

    /// Parses a lookup from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CountryLookupError`] if:
    /// - The JSON is malformed or missing required fields
    /// - The version is unsupported
    /// - The table is empty
    /// - A code is not two uppercase ASCII letters
    /// - A display name is blank or shared by two codes
    pub fn from_json(json: &str) -> Result<Self, CountryLookupError> {
        let raw: RawCountryLookup =
            serde_json::from_str(json).map_err(|e| CountryLookupError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a lookup from `file_name` inside a capability directory.
    ///
    /// # Errors
    ///
    /// Returns [`CountryLookupError`] if the file cannot be read or parsed.
    pub fn from_file(dir: &Dir, file_name: &Utf8Path) -> Result<Self, CountryLookupError> {
        let contents =
            dir.read_to_string(file_name)
                .map_err(|e| CountryLookupError::IoError {
                    path: file_name.to_path_buf(),
                    message: e.to_string(),
                })?;

        Self::from_json(&contents)
    }

    /// Loads a lookup from a path, opening its parent directory with ambient
    /// authority.
    ///
    /// # Errors
    ///
    /// Returns [`CountryLookupError`] if the directory or file cannot be read,
    /// or if the contents are invalid.
    pub fn from_path(path: &Utf8Path) -> Result<Self, CountryLookupError> {
        let io_error = |message: String| CountryLookupError::IoError {
            path: path.to_path_buf(),
            message,
        };
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("path does not name a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_file(&dir, Utf8Path::new(file_name)).map_err(|err| match err {
            CountryLookupError::IoError { message, .. } => io_error(message),
            other => other,
        })
    }

    fn from_raw(raw: RawCountryLookup) -> Result<Self, CountryLookupError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(CountryLookupError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.countries.is_empty() {
            return Err(CountryLookupError::Empty);
        }

        let mut names: BTreeMap<&str, &str> = BTreeMap::new();
        for (code, country) in &raw.countries {
            if !is_valid_code(code) {
                return Err(CountryLookupError::InvalidCode { code: code.clone() });
            }
            if country.name.trim().is_empty() {
                return Err(CountryLookupError::BlankName { code: code.clone() });
            }
            if let Some(first) = names.insert(country.name.as_str(), code.as_str()) {
                return Err(CountryLookupError::DuplicateName {
                    name: country.name.clone(),
                    first: first.to_owned(),
                    second: code.clone(),
                });
            }
        }

        Ok(Self {
            entries: raw.countries,
        })
    }

    /// Returns every entry keyed by country code.
    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, Country> {
        &self.entries
    }

    /// Returns the entry for `code`, if any.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Country> {
        self.entries.get(code)
    }

    /// Finds the entry whose display name is `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<(&str, &Country)> {
        self.entries
            .iter()
            .find(|(_, country)| country.name == name)
            .map(|(code, country)| (code.as_str(), country))
    }

    /// Returns `true` if `name` is the display name of an entry.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Number of countries in the lookup.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a successfully loaded lookup.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the select options: the empty placeholder first, then one
    /// option per country in code order.
    #[must_use]
    pub fn options(&self) -> Vec<SelectOption> {
        let placeholder = SelectOption {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_owned(),
        };
        std::iter::once(placeholder)
            .chain(self.entries.values().map(|country| SelectOption {
                value: country.name.clone(),
                label: format!("{} {}", country.emoji, country.name),
            }))
            .collect()
    }
}

fn is_valid_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCountryLookup {
    version: u32,
    countries: BTreeMap<String, Country>,
}
