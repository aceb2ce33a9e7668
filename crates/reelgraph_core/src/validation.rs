//! Field rule checks for candidate people and media items.
//!
//! # Responsibility
//! - Reject candidates before any store mutation.
//! - Normalize accepted person candidates (`name` defaults to `login`).
//!
//! # Invariants
//! - Rules run in a fixed order; the first violated rule is reported.
//! - Checks are pure: the current date is an input, never read implicitly by
//!   the `*_at` variants.
//! - Normalization runs only after a passing validation.

use crate::model::media_item::MediaItem;
use crate::model::person::Person;
use chrono::{Duration, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum description length, counted in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

const MAX_EMAIL_LOCAL_PART_CHARS: usize = 64;

/// Date of the first public film screening. No release may predate it.
pub static CINEMA_EPOCH: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1895, 12, 28).expect("valid cinema epoch date"));

// Local-part length (1..=64) is checked separately; `regex` has no look-ahead.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*@[A-Za-z0-9][A-Za-z0-9-]*(\.[A-Za-z0-9-]+)*(\.[A-Za-z]{2,})$",
    )
    .expect("valid email regex")
});

/// First violated field rule of a candidate entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Login is empty or contains whitespace.
    InvalidLogin,
    /// Birthday lies after the validation date.
    BirthdayInFuture { birthday: NaiveDate, today: NaiveDate },
    /// Email does not match the accepted grammar.
    InvalidEmail,
    /// Media item name is empty.
    EmptyName,
    /// Description exceeds `MAX_DESCRIPTION_CHARS` characters.
    DescriptionTooLong { chars: usize },
    /// Release date predates `CINEMA_EPOCH`.
    ReleaseBeforeCinemaEpoch { release_date: NaiveDate },
    /// Duration is below zero.
    NegativeDuration { minutes: i64 },
}

impl ValidationError {
    /// Stable rule code for metadata-only log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidLogin => "invalid_login",
            Self::BirthdayInFuture { .. } => "birthday_in_future",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyName => "empty_name",
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::ReleaseBeforeCinemaEpoch { .. } => "release_before_cinema_epoch",
            Self::NegativeDuration { .. } => "negative_duration",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogin => write!(f, "login must be non-empty and contain no whitespace"),
            Self::BirthdayInFuture { birthday, today } => {
                write!(f, "birthday {birthday} is after current date {today}")
            }
            Self::InvalidEmail => write!(f, "email has an invalid format"),
            Self::EmptyName => write!(f, "media item name must be non-empty"),
            Self::DescriptionTooLong { chars } => write!(
                f,
                "description has {chars} characters; at most {MAX_DESCRIPTION_CHARS} allowed"
            ),
            Self::ReleaseBeforeCinemaEpoch { release_date } => write!(
                f,
                "release date {release_date} is before {}",
                *CINEMA_EPOCH
            ),
            Self::NegativeDuration { minutes } => {
                write!(f, "duration must not be negative, got {minutes} minutes")
            }
        }
    }
}

impl Error for ValidationError {}

/// Validates a person candidate against the local current date.
pub fn validate_person(candidate: &Person) -> Result<(), ValidationError> {
    validate_person_at(candidate, today())
}

/// Validates a person candidate as of `today`.
///
/// Rule order: login, birthday, email.
pub fn validate_person_at(candidate: &Person, today: NaiveDate) -> Result<(), ValidationError> {
    if candidate.login.is_empty() || candidate.login.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidLogin);
    }
    if candidate.birthday > today {
        return Err(ValidationError::BirthdayInFuture {
            birthday: candidate.birthday,
            today,
        });
    }
    if !is_valid_email(candidate.email.as_str()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Applies post-validation defaults. An empty `name` takes the `login` value.
pub fn normalize_person(mut candidate: Person) -> Person {
    if candidate.name.is_empty() {
        candidate.name = candidate.login.clone();
    }
    candidate
}

/// Validates then normalizes a person candidate as of `today`.
pub fn accept_person_at(candidate: Person, today: NaiveDate) -> Result<Person, ValidationError> {
    validate_person_at(&candidate, today)?;
    Ok(normalize_person(candidate))
}

/// Validates a media item candidate.
///
/// Rule order: name, description length, release date, duration.
pub fn validate_media_item(candidate: &MediaItem) -> Result<(), ValidationError> {
    if candidate.name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let chars = candidate.description.chars().count();
    if chars > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong { chars });
    }
    if candidate.release_date < *CINEMA_EPOCH {
        return Err(ValidationError::ReleaseBeforeCinemaEpoch {
            release_date: candidate.release_date,
        });
    }
    if candidate.duration < Duration::zero() {
        return Err(ValidationError::NegativeDuration {
            minutes: candidate.duration.num_minutes(),
        });
    }
    Ok(())
}

/// Returns whether `email` matches the accepted address grammar.
pub fn is_valid_email(email: &str) -> bool {
    let Some(at) = email.find('@') else {
        return false;
    };
    let local_chars = email[..at].chars().count();
    (1..=MAX_EMAIL_LOCAL_PART_CHARS).contains(&local_chars) && EMAIL_RE.is_match(email)
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::{
        accept_person_at, is_valid_email, validate_media_item, validate_person_at,
        ValidationError, MAX_DESCRIPTION_CHARS,
    };
    use crate::model::media_item::MediaItem;
    use crate::model::person::Person;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person(login: &str, email: &str, birthday: NaiveDate) -> Person {
        Person::new(email, login, "", birthday)
    }

    fn item(name: &str, description: &str, release: NaiveDate, minutes: i64) -> MediaItem {
        MediaItem::new(name, description, release, Duration::minutes(minutes))
    }

    #[test]
    fn email_grammar_accepts_common_addresses() {
        assert!(is_valid_email("valid@email.test"));
        assert!(is_valid_email("first.last_name-1@mail.example.org"));
        assert!(is_valid_email("a@b.com"));
    }

    #[test]
    fn email_grammar_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.test"));
        assert!(!is_valid_email("@email.test"));
        assert!(!is_valid_email("user@-dash.test"));
        assert!(!is_valid_email("user@email.t"));
        assert!(!is_valid_email("user@email.c0m"));
        assert!(!is_valid_email("us er@email.test"));
        assert!(!is_valid_email(".user@email.test"));
        assert!(!is_valid_email("user@ email.test"));
        assert!(!is_valid_email("user@@email.test"));
        assert!(!is_valid_email("user@.email.test"));
        assert!(!is_valid_email("user@éemail.test"));
    }

    #[test]
    fn email_local_part_is_capped_at_64_chars() {
        let at_limit = format!("{}@email.test", "a".repeat(64));
        let over_limit = format!("{}@email.test", "a".repeat(65));
        assert!(is_valid_email(&at_limit));
        assert!(!is_valid_email(&over_limit));
    }

    #[test]
    fn login_with_whitespace_is_rejected_first() {
        let today = date(2024, 6, 1);
        let candidate = person("j doe", "broken", date(2030, 1, 1));
        assert_eq!(
            validate_person_at(&candidate, today),
            Err(ValidationError::InvalidLogin)
        );

        let tabbed = person("j\tdoe", "valid@email.test", date(2000, 1, 1));
        assert_eq!(
            validate_person_at(&tabbed, today),
            Err(ValidationError::InvalidLogin)
        );
    }

    #[test]
    fn birthday_today_is_allowed_but_tomorrow_is_not() {
        let today = date(2024, 6, 1);
        let born_today = person("jdoe", "valid@email.test", today);
        assert!(validate_person_at(&born_today, today).is_ok());

        let born_tomorrow = person("jdoe", "valid@email.test", date(2024, 6, 2));
        assert!(matches!(
            validate_person_at(&born_tomorrow, today),
            Err(ValidationError::BirthdayInFuture { .. })
        ));
    }

    #[test]
    fn accept_person_defaults_empty_name_to_login() {
        let accepted =
            accept_person_at(person("jdoe", "valid@email.test", date(2010, 1, 1)), date(2024, 1, 1))
                .unwrap();
        assert_eq!(accepted.name, "jdoe");

        let mut named = person("jdoe", "valid@email.test", date(2010, 1, 1));
        named.name = "John".to_string();
        let accepted = accept_person_at(named, date(2024, 1, 1)).unwrap();
        assert_eq!(accepted.name, "John");
    }

    #[test]
    fn media_item_rules_run_in_order() {
        let early = date(1800, 1, 1);
        let long = "x".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert_eq!(
            validate_media_item(&item("", &long, early, -1)),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            validate_media_item(&item("film", &long, early, -1)),
            Err(ValidationError::DescriptionTooLong { chars: 201 })
        );
        assert!(matches!(
            validate_media_item(&item("film", "", early, -1)),
            Err(ValidationError::ReleaseBeforeCinemaEpoch { .. })
        ));
        assert_eq!(
            validate_media_item(&item("film", "", date(2000, 1, 1), -1)),
            Err(ValidationError::NegativeDuration { minutes: -1 })
        );
    }

    #[test]
    fn media_item_boundaries_are_inclusive() {
        let at_limit = "é".repeat(MAX_DESCRIPTION_CHARS);
        assert!(validate_media_item(&item("film", &at_limit, date(1895, 12, 28), 0)).is_ok());
    }
}
