//! Resolution of min/max configuration into comparable instants.
//!
//! Bound configuration is loosely typed on the host side: a scalar string
//! in the model format, a `[value, format]` pair, or the keyword `today`.
//! A malformed configuration resolves to no bound at all — the constraint
//! is ignored rather than enforced, so a misconfigured bound can never
//! block every input.

use chrono::Duration;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, CalendarUnit, Instant};
use crate::consts::TODAY_KEYWORD;
use crate::convert;
use crate::format::FormatPair;
use crate::ConfigError;

/// Source configuration for one bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundSource {
    /// A value in the current model format.
    Scalar(String),
    /// A value with its own format, independent of the model format.
    WithFormat(String, String),
    /// The current day, read from the clock at every resolution.
    Today,
}

impl From<&str> for BoundSource {
    fn from(value: &str) -> Self {
        if value == TODAY_KEYWORD {
            Self::Today
        } else {
            Self::Scalar(value.to_owned())
        }
    }
}

/// Shape of the host-side configuration value before keyword detection.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBound {
    WithFormat(String, String),
    Text(String),
}

impl<'de> Deserialize<'de> for BoundSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawBound::deserialize(deserializer)? {
            RawBound::WithFormat(value, format) => Ok(Self::WithFormat(value, format)),
            RawBound::Text(text) => Ok(Self::from(text.as_str())),
        }
    }
}

impl Serialize for BoundSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Scalar(value) => serializer.serialize_str(value),
            Self::WithFormat(value, format) => (value, format).serialize(serializer),
            Self::Today => serializer.serialize_str(TODAY_KEYWORD),
        }
    }
}

/// Which end of the range a bound constrains. `today` resolves to the
/// start of the current day for a minimum and to its last second for a
/// maximum, so the whole of today is admissible under a `today`/`today`
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundRole {
    Min,
    Max,
}

/// Resolves a bound, surfacing configuration problems.
///
/// # Errors
/// Returns `ConfigError::Bound` if the configured value does not parse
/// under its format.
pub fn resolve_bound_strict<C: Calendar>(
    calendar: &C,
    source: &BoundSource,
    role: BoundRole,
    formats: &FormatPair,
) -> Result<Instant, ConfigError> {
    match source {
        BoundSource::Scalar(value) => Ok(convert::parse_model(calendar, value, formats)?),
        BoundSource::WithFormat(value, format) => Ok(calendar.parse(value, format)?),
        BoundSource::Today => {
            let start = calendar.start_of(calendar.now(), CalendarUnit::Day);
            Ok(match role {
                BoundRole::Min => start,
                BoundRole::Max => calendar
                    .add(start, 1, CalendarUnit::Day)
                    .map_or(start, |next| next - Duration::seconds(1)),
            })
        }
    }
}

/// Resolves an optional bound configuration, degrading malformed
/// configuration to "no bound".
pub fn resolve_bound<C: Calendar>(
    calendar: &C,
    source: Option<&BoundSource>,
    role: BoundRole,
    formats: &FormatPair,
) -> Option<Instant> {
    source.and_then(|s| resolve_bound_strict(calendar, s, role, formats).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ChronoCalendar, FixedClock};
    use chrono::{TimeZone, Utc};

    fn formats() -> FormatPair {
        FormatPair::default()
    }

    #[test]
    fn test_scalar_resolves_under_model_format() {
        let source = BoundSource::from("407542400");
        let instant =
            resolve_bound_strict(&ChronoCalendar, &source, BoundRole::Min, &formats()).unwrap();
        assert_eq!(instant.timestamp(), 407_542_400);
    }

    #[test]
    fn test_with_format_resolves_under_its_own_format() {
        let source = BoundSource::WithFormat("11-30-1982".to_owned(), "MM-DD-YYYY".to_owned());
        let instant =
            resolve_bound_strict(&ChronoCalendar, &source, BoundRole::Min, &formats()).unwrap();
        assert_eq!(instant.timestamp(), 407_462_400);
    }

    #[test]
    fn test_today_normalizes_to_role() {
        let noon = Utc.with_ymd_and_hms(2000, 6, 15, 12, 30, 45).unwrap();
        let cal = FixedClock(noon);

        let min = resolve_bound_strict(&cal, &BoundSource::Today, BoundRole::Min, &formats());
        assert_eq!(
            min.unwrap(),
            Utc.with_ymd_and_hms(2000, 6, 15, 0, 0, 0).unwrap()
        );

        let max = resolve_bound_strict(&cal, &BoundSource::Today, BoundRole::Max, &formats());
        assert_eq!(
            max.unwrap(),
            Utc.with_ymd_and_hms(2000, 6, 15, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_malformed_bound_degrades_to_unset() {
        let source = BoundSource::from("not a date");
        assert!(
            resolve_bound_strict(&ChronoCalendar, &source, BoundRole::Min, &formats()).is_err()
        );
        assert_eq!(
            resolve_bound(&ChronoCalendar, Some(&source), BoundRole::Min, &formats()),
            None
        );
    }

    #[test]
    fn test_unset_stays_unset() {
        assert_eq!(
            resolve_bound(&ChronoCalendar, None, BoundRole::Max, &formats()),
            None
        );
    }

    #[test]
    fn test_today_keyword_detection() {
        assert_eq!(BoundSource::from("today"), BoundSource::Today);
        assert_eq!(
            BoundSource::from("yesterday"),
            BoundSource::Scalar("yesterday".to_owned())
        );
    }

    #[test]
    fn test_serde_forms() {
        let scalar: BoundSource = serde_json::from_str(r#""407542400""#).unwrap();
        assert_eq!(scalar, BoundSource::Scalar("407542400".to_owned()));

        let today: BoundSource = serde_json::from_str(r#""today""#).unwrap();
        assert_eq!(today, BoundSource::Today);
        assert_eq!(serde_json::to_string(&today).unwrap(), r#""today""#);

        let pair: BoundSource = serde_json::from_str(r#"["11-30-1982", "MM-DD-YYYY"]"#).unwrap();
        assert_eq!(
            pair,
            BoundSource::WithFormat("11-30-1982".to_owned(), "MM-DD-YYYY".to_owned())
        );
        assert_eq!(
            serde_json::to_string(&pair).unwrap(),
            r#"["11-30-1982","MM-DD-YYYY"]"#
        );
    }
}
