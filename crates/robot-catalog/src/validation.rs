//! Field validation for the create-robot form.
//!
//! Rules live in a single static table of `(field, rule, message)` rows.
//! Rows for a field run in table order and the first failing row decides the
//! field's verdict, so each invalid field reports exactly one message.
//!
//! # Validation Rules
//!
//! - First and last name: required, at least [`NAME_MIN_LENGTH`] characters
//! - Email: required, must match the email grammar (see [`is_valid_email`])
//! - Country: required, must be the display name of a lookup entry
//! - Description: required, at least [`DESCRIPTION_MIN_LENGTH`] characters
//!
//! "Required" only rejects the empty string. Lengths count UTF-16 code units,
//! so a character outside the Basic Multilingual Plane counts as two.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::country::CountryLookup;
use crate::robot::{Field, RobotDraft};

/// Minimum length for first and last names.
pub const NAME_MIN_LENGTH: usize = 2;

/// Minimum length for descriptions.
pub const DESCRIPTION_MIN_LENGTH: usize = 10;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The field was left empty.
    Required,
    /// The value is shorter than the field's minimum length.
    TooShort,
    /// The value does not have the expected shape.
    InvalidFormat,
}

impl FailureKind {
    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort => "too_short",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

/// The first failing rule for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Failure category.
    pub kind: FailureKind,
    /// Message shown next to the field.
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Required,
    MinLength(usize),
    Email,
    ListedCountry,
}

impl Rule {
    const fn kind(self) -> FailureKind {
        match self {
            Self::Required => FailureKind::Required,
            Self::MinLength(_) => FailureKind::TooShort,
            Self::Email | Self::ListedCountry => FailureKind::InvalidFormat,
        }
    }

    fn passes(self, value: &str, lookup: &CountryLookup) -> bool {
        match self {
            Self::Required => !value.is_empty(),
            Self::MinLength(min) => value.encode_utf16().count() >= min,
            Self::Email => is_valid_email(value),
            Self::ListedCountry => lookup.contains_name(value),
        }
    }
}

struct RuleRow {
    field: Field,
    rule: Rule,
    message: &'static str,
}

const fn row(field: Field, rule: Rule, message: &'static str) -> RuleRow {
    RuleRow {
        field,
        rule,
        message,
    }
}

static RULES: [RuleRow; 10] = [
    row(Field::FirstName, Rule::Required, "First name is required"),
    row(
        Field::FirstName,
        Rule::MinLength(NAME_MIN_LENGTH),
        "First name is too short",
    ),
    row(Field::LastName, Rule::Required, "Last name is required"),
    row(
        Field::LastName,
        Rule::MinLength(NAME_MIN_LENGTH),
        "Last name is too short",
    ),
    row(Field::Email, Rule::Required, "Email address is required"),
    row(Field::Email, Rule::Email, "Email address is not valid"),
    row(Field::Country, Rule::Required, "Country is required"),
    row(
        Field::Country,
        Rule::ListedCountry,
        "Country is not a listed option",
    ),
    row(Field::Description, Rule::Required, "Description is required"),
    row(
        Field::Description,
        Rule::MinLength(DESCRIPTION_MIN_LENGTH),
        "Description is too short",
    ),
];

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Characters matched by `\s` in browser regular expressions.
const FORM_WHITESPACE: &str =
    r"\t\n\v\f\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

/// Characters matched by `.` in browser regular expressions: anything but a
/// line terminator.
const NOT_LINE_TERMINATOR: &str = r"[^\n\r\x{2028}\x{2029}]";

/// Domain part: dotted labels ending in an alphabetic label, or a bracketed
/// IPv4 literal.
const EMAIL_DOMAIN: &str = r"((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))";

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let atom = format!(r#"[^<>()\[\]\\.,;:{FORM_WHITESPACE}@"]+"#);
        let pattern =
            format!(r#"^(({atom}(\.{atom})*)|("{NOT_LINE_TERMINATOR}+"))@{EMAIL_DOMAIN}$"#);
        Regex::new(&pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` if `value` is a well-formed email address.
///
/// The local part is either dot-separated atoms free of special characters or
/// a quoted string. The domain is either dotted labels ending in an
/// alphabetic label of two or more letters, or a bracketed IPv4 literal.
///
/// # Examples
///
/// ```
/// use robot_catalog::is_valid_email;
///
/// assert!(is_valid_email("a@b.co"));
/// assert!(is_valid_email("bot@[10.0.0.1]"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email("bot@localhost"));
/// ```
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Validates a single field value.
///
/// Returns the first failing rule for `field`, or `None` when every rule
/// passes.
#[must_use]
pub fn validate_field(field: Field, value: &str, lookup: &CountryLookup) -> Option<FieldError> {
    RULES
        .iter()
        .filter(|row| row.field == field)
        .find(|row| !row.rule.passes(value, lookup))
        .map(|row| FieldError {
            kind: row.rule.kind(),
            message: row.message,
        })
}

/// Validates every field of a draft.
///
/// # Examples
///
/// ```
/// use robot_catalog::{CountryLookup, Field, FailureKind, RobotDraft, validate};
///
/// let lookup = CountryLookup::bundled().expect("bundled lookup");
/// let draft = RobotDraft {
///     first_name: "A".to_owned(),
///     ..RobotDraft::default()
/// };
///
/// let report = validate(&draft, &lookup);
/// assert_eq!(report.error(Field::FirstName).map(|e| e.kind), Some(FailureKind::TooShort));
/// assert_eq!(report.message(Field::Country), Some("Country is required"));
/// ```
#[must_use]
pub fn validate(draft: &RobotDraft, lookup: &CountryLookup) -> ValidationReport {
    let errors = Field::ALL
        .into_iter()
        .filter_map(|field| {
            validate_field(field, draft.get(field), lookup).map(|error| (field, error))
        })
        .collect();
    ValidationReport { errors }
}

/// Per-field verdicts for one validation pass.
///
/// A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationReport {
    /// Returns `true` when no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` when `field` failed.
    #[must_use]
    pub fn is_invalid(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Returns the failure recorded for `field`.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Returns the message recorded for `field`.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).map(|error| error.message)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Same as [`Self::is_valid`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failing fields in form order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    /// Message for the shared name row: the first-name message if present,
    /// otherwise the last-name message.
    #[must_use]
    pub fn name_row_message(&self) -> Option<&'static str> {
        self.message(Field::FirstName)
            .or_else(|| self.message(Field::LastName))
    }

    /// Records a fresh verdict for one field.
    pub(crate) fn update(&mut self, field: Field, verdict: Option<FieldError>) {
        match verdict {
            Some(error) => {
                self.errors.insert(field, error);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Covers each rule row and the report accessors.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn lookup() -> CountryLookup {
        CountryLookup::bundled().expect("bundled lookup")
    }

    fn valid_draft() -> RobotDraft {
        RobotDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@x.com".to_owned(),
            country: "France".to_owned(),
            description: "a pioneering programmer".to_owned(),
        }
    }

    fn kind_of(field: Field, value: &str, lookup: &CountryLookup) -> Option<FailureKind> {
        validate_field(field, value, lookup).map(|error| error.kind)
    }

    #[rstest]
    #[case(Field::FirstName, "", Some(FailureKind::Required))]
    #[case(Field::FirstName, "A", Some(FailureKind::TooShort))]
    #[case(Field::FirstName, "Al", None)]
    #[case(Field::FirstName, " ", Some(FailureKind::TooShort))]
    #[case(Field::LastName, "", Some(FailureKind::Required))]
    #[case(Field::LastName, "L", Some(FailureKind::TooShort))]
    #[case(Field::LastName, "Lo", None)]
    #[case(Field::LastName, "Ñ", Some(FailureKind::TooShort))]
    #[case(Field::FirstName, "😀", None)]
    fn name_rules(
        lookup: CountryLookup,
        #[case] field: Field,
        #[case] value: &str,
        #[case] expected: Option<FailureKind>,
    ) {
        assert_eq!(kind_of(field, value, &lookup), expected);
    }

    #[rstest]
    #[case("", Some(FailureKind::Required))]
    #[case("a", Some(FailureKind::TooShort))]
    #[case("123456789", Some(FailureKind::TooShort))]
    #[case("1234567890", None)]
    #[case("😀😀😀😀", Some(FailureKind::TooShort))]
    #[case("😀😀😀😀😀", None)]
    #[case("😀😀😀😀a", Some(FailureKind::TooShort))]
    #[case("a pioneering programmer", None)]
    fn description_rules(
        lookup: CountryLookup,
        #[case] value: &str,
        #[case] expected: Option<FailureKind>,
    ) {
        assert_eq!(kind_of(Field::Description, value, &lookup), expected);
    }

    #[rstest]
    #[case("", Some(FailureKind::Required))]
    #[case("not-an-email", Some(FailureKind::InvalidFormat))]
    #[case("a@b.co", None)]
    #[case("ada@x.com", None)]
    #[case("first.last@sub.example.org", None)]
    #[case("\"odd person\"@example.com", None)]
    #[case("bot@[192.168.0.1]", None)]
    #[case("bot@localhost", Some(FailureKind::InvalidFormat))]
    #[case("bot@example.c", Some(FailureKind::InvalidFormat))]
    #[case("a..b@example.com", Some(FailureKind::InvalidFormat))]
    #[case("a b@example.com", Some(FailureKind::InvalidFormat))]
    #[case("@example.com", Some(FailureKind::InvalidFormat))]
    #[case("\"a\rb\"@x.com", Some(FailureKind::InvalidFormat))]
    #[case("\"a\u{2028}b\"@x.com", Some(FailureKind::InvalidFormat))]
    #[case("\"a\u{2029}b\"@x.com", Some(FailureKind::InvalidFormat))]
    #[case("\"a\nb\"@x.com", Some(FailureKind::InvalidFormat))]
    #[case("\"a\tb\"@x.com", None)]
    #[case("a\u{FEFF}b@x.com", Some(FailureKind::InvalidFormat))]
    #[case("a\u{3000}b@x.com", Some(FailureKind::InvalidFormat))]
    #[case("a\u{85}b@x.com", None)]
    fn email_rules(
        lookup: CountryLookup,
        #[case] value: &str,
        #[case] expected: Option<FailureKind>,
    ) {
        assert_eq!(kind_of(Field::Email, value, &lookup), expected);
    }

    #[rstest]
    #[case("", Some(FailureKind::Required))]
    #[case("France", None)]
    #[case("Atlantis", Some(FailureKind::InvalidFormat))]
    #[case("FR", Some(FailureKind::InvalidFormat))]
    fn country_rules(
        lookup: CountryLookup,
        #[case] value: &str,
        #[case] expected: Option<FailureKind>,
    ) {
        assert_eq!(kind_of(Field::Country, value, &lookup), expected);
    }

    #[rstest]
    #[case(Field::FirstName, "", "First name is required")]
    #[case(Field::LastName, "x", "Last name is too short")]
    #[case(Field::Email, "nope", "Email address is not valid")]
    #[case(Field::Country, "", "Country is required")]
    #[case(Field::Description, "short", "Description is too short")]
    fn messages_follow_first_failing_rule(
        lookup: CountryLookup,
        #[case] field: Field,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        let error = validate_field(field, value, &lookup).expect("field should fail");
        assert_eq!(error.message, expected);
    }

    #[rstest]
    fn valid_draft_produces_empty_report(lookup: CountryLookup) {
        let report = validate(&valid_draft(), &lookup);
        assert!(report.is_valid());
        assert_eq!(report.len(), 0);
    }

    #[rstest]
    fn empty_draft_reports_every_field_as_required(lookup: CountryLookup) {
        let report = validate(&RobotDraft::default(), &lookup);

        assert_eq!(report.len(), Field::ALL.len());
        assert!(
            report
                .errors()
                .all(|(_, error)| error.kind == FailureKind::Required)
        );
    }

    #[rstest]
    fn validation_is_repeatable_and_leaves_input_untouched(lookup: CountryLookup) {
        let draft = RobotDraft {
            email: "broken".to_owned(),
            ..valid_draft()
        };
        let snapshot = draft.clone();

        let first = validate(&draft, &lookup);
        let second = validate(&draft, &lookup);

        assert_eq!(first, second);
        assert_eq!(draft, snapshot);
    }

    #[rstest]
    fn name_row_prefers_first_name_message(lookup: CountryLookup) {
        let both = RobotDraft {
            first_name: String::new(),
            last_name: "L".to_owned(),
            ..valid_draft()
        };
        let last_only = RobotDraft {
            last_name: "L".to_owned(),
            ..valid_draft()
        };

        assert_eq!(
            validate(&both, &lookup).name_row_message(),
            Some("First name is required")
        );
        assert_eq!(
            validate(&last_only, &lookup).name_row_message(),
            Some("Last name is too short")
        );
        assert_eq!(validate(&valid_draft(), &lookup).name_row_message(), None);
    }

    #[rstest]
    fn update_replaces_and_clears_verdicts(lookup: CountryLookup) {
        let mut report = validate(&RobotDraft::default(), &lookup);

        report.update(Field::Email, None);
        assert!(!report.is_invalid(Field::Email));

        report.update(
            Field::Email,
            validate_field(Field::Email, "nope", &lookup),
        );
        assert_eq!(
            report.error(Field::Email).map(|e| e.kind),
            Some(FailureKind::InvalidFormat)
        );
    }

    #[test]
    fn failure_codes_are_stable() {
        assert_eq!(FailureKind::Required.code(), "required");
        assert_eq!(FailureKind::TooShort.code(), "too_short");
        assert_eq!(FailureKind::InvalidFormat.code(), "invalid_format");
    }
}
