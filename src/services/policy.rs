use crate::domain::constants::VALID_KEYWORDS;
use crate::domain::models::{EntityKind, Keyword};
use chrono::TimeDelta;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    #[error("invalid keyword `{0}` (see `data-release keywords`)")]
    InvalidKeyword(String),
    #[error("invalid duration `{0}` (expected e.g. 30d, 12h, 90m, 2w)")]
    InvalidDuration(String),
    #[error("record {id}: cannot derive a suspense date from `{raw}`")]
    InvalidDate { id: String, raw: String },
}

impl FromStr for Keyword {
    type Err = PolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || PolicyError::InvalidKeyword(raw.to_string());
        if !VALID_KEYWORDS.contains(&raw) {
            return Err(invalid());
        }
        let (collection, field) = raw.split_once('.').ok_or_else(invalid)?;
        let kind = EntityKind::from_collection(collection).ok_or_else(invalid)?;
        if field.is_empty() || field.contains('.') {
            return Err(invalid());
        }
        Ok(Keyword {
            kind,
            date_field: field.to_string(),
        })
    }
}

/// Parses `<n><unit>` where unit is one of `s m h d w`; a bare number means days.
pub fn parse_duration(raw: &str) -> Result<TimeDelta, PolicyError> {
    let invalid = || PolicyError::InvalidDuration(raw.to_string());
    let s = raw.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let n: i64 = digits.parse().map_err(|_| invalid())?;
    if n <= 0 {
        return Err(invalid());
    }
    let delta = match unit.trim() {
        "s" => TimeDelta::try_seconds(n),
        "m" => TimeDelta::try_minutes(n),
        "h" => TimeDelta::try_hours(n),
        "" | "d" => TimeDelta::try_days(n),
        "w" => TimeDelta::try_weeks(n),
        _ => None,
    };
    delta.ok_or_else(invalid)
}
