use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, Instant};
use crate::convert;
use crate::format::FormatPair;

/// Validity of the current view text. `min`/`max` are `false` whenever
/// the corresponding bound is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityFlags {
    pub date_error: bool,
    pub min: bool,
    pub max: bool,
}

impl ValidityFlags {
    /// True when no flag is raised.
    pub const fn is_valid(self) -> bool {
        !(self.date_error || self.min || self.max)
    }
}

/// Result of one validation pass. `instant` is present whenever the text
/// parsed, even if a bound rejected it, so a later bound change can
/// re-judge the same value. `model_text` is present only when every flag
/// is clear; a flagged value is never propagated to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub flags: ValidityFlags,
    pub model_text: Option<String>,
    pub instant: Option<Instant>,
}

impl Validation {
    fn empty() -> Self {
        Self {
            flags: ValidityFlags::default(),
            model_text: None,
            instant: None,
        }
    }
}

/// Compares a parsed instant against the resolved bounds. Comparison is
/// strict: a value equal to a bound is in range.
pub fn check_bounds<C: Calendar>(
    calendar: &C,
    instant: Instant,
    min: Option<Instant>,
    max: Option<Instant>,
) -> (bool, bool) {
    let below = min.is_some_and(|m| calendar.compare(instant, m) == Ordering::Less);
    let above = max.is_some_and(|m| calendar.compare(instant, m) == Ordering::Greater);
    (below, above)
}

/// Validates view text against the current formats and bounds.
///
/// Empty text is the cleared state: all flags false, no value. Text that
/// fails to parse raises `date_error` alone. Text that parses but falls
/// outside a bound raises that bound's flag; the model text is produced
/// only when everything passes.
pub fn validate<C: Calendar>(
    calendar: &C,
    view_text: &str,
    formats: &FormatPair,
    min: Option<Instant>,
    max: Option<Instant>,
) -> Validation {
    if view_text.is_empty() {
        return Validation::empty();
    }

    let Ok(instant) = convert::parse_view(calendar, view_text, formats) else {
        return Validation {
            flags: ValidityFlags {
                date_error: true,
                min: false,
                max: false,
            },
            model_text: None,
            instant: None,
        };
    };

    let (below, above) = check_bounds(calendar, instant, min, max);
    let flags = ValidityFlags {
        date_error: false,
        min: below,
        max: above,
    };
    let model_text = flags
        .is_valid()
        .then(|| convert::render_model(calendar, instant, formats));

    Validation {
        flags,
        model_text,
        instant: Some(instant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ChronoCalendar;

    fn formats() -> FormatPair {
        FormatPair::default()
    }

    fn instant(unix: &str) -> Instant {
        ChronoCalendar.parse(unix, "X").unwrap()
    }

    #[test]
    fn test_empty_text_is_clear_not_an_error() {
        let v = validate(&ChronoCalendar, "", &formats(), None, None);
        assert!(v.flags.is_valid());
        assert_eq!(v.model_text, None);
        assert_eq!(v.instant, None);
    }

    #[test]
    fn test_valid_text_produces_model() {
        let v = validate(&ChronoCalendar, "01/31/1986", &formats(), None, None);
        assert!(v.flags.is_valid());
        assert_eq!(v.model_text.as_deref(), Some("507513600"));
        assert!(v.instant.is_some());
    }

    #[test]
    fn test_unparseable_text_raises_date_error_only() {
        for text in ["01/32/1986", "Purple monkey dishwasher"] {
            let v = validate(&ChronoCalendar, text, &formats(), None, None);
            assert!(v.flags.date_error, "{text} should not parse");
            assert!(!v.flags.min);
            assert!(!v.flags.max);
            assert_eq!(v.model_text, None);
            assert_eq!(v.instant, None);
        }
    }

    #[test]
    fn test_bound_enforcement_is_monotonic() {
        let min = Some(instant("407542400")); // 11/30/1982
        let max = Some(instant("607542400")); // 04/02/1989

        let below = validate(&ChronoCalendar, "09/30/1979", &formats(), min, max);
        assert!(below.flags.min);
        assert!(!below.flags.max);
        assert_eq!(below.model_text, None);
        assert!(below.instant.is_some());

        let above = validate(&ChronoCalendar, "06/02/1992", &formats(), min, max);
        assert!(!above.flags.min);
        assert!(above.flags.max);
        assert_eq!(above.model_text, None);

        let within = validate(&ChronoCalendar, "01/31/1986", &formats(), min, max);
        assert!(within.flags.is_valid());
        assert_eq!(within.model_text.as_deref(), Some("507513600"));
    }

    #[test]
    fn test_value_equal_to_bound_is_in_range() {
        let bound = instant("407462400"); // 11/30/1982 00:00
        let v = validate(
            &ChronoCalendar,
            "11/30/1982",
            &formats(),
            Some(bound),
            Some(bound),
        );
        assert!(v.flags.is_valid());
        assert_eq!(v.model_text.as_deref(), Some("407462400"));
    }

    #[test]
    fn test_unset_bounds_never_flag() {
        let v = validate(&ChronoCalendar, "09/30/1979", &formats(), None, None);
        assert!(v.flags.is_valid());
        assert!(v.model_text.is_some());
    }

    #[test]
    fn test_flags_serde() {
        let flags = ValidityFlags {
            date_error: false,
            min: true,
            max: false,
        };
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"{"date_error":false,"min":true,"max":false}"#);
    }
}
