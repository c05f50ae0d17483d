use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{COARSE_STEP_FLOOR, FORMAT_TOKENS, UNIT_NAMES, UNIX_FORMAT};
use crate::prelude::*;
use crate::ParseError;

/// A point on the timeline. All calendar math in this crate is UTC so that
/// results never depend on the host machine's timezone.
pub type Instant = DateTime<Utc>;

/// Granularity of a stepping operation, ordered fine to coarse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl CalendarUnit {
    /// Looks up a unit by name, tolerating the exact plural (`"month"` and
    /// `"months"` both resolve to `Month`). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        UNIT_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, unit)| *unit)
    }

    /// The next coarser unit; `Year` has none and stays put.
    pub const fn coarser(self) -> Self {
        match self {
            Self::Day => Self::Week,
            Self::Week => Self::Month,
            Self::Month | Self::Year => Self::Year,
        }
    }

    /// Unit used when a step is escalated by the coarse modifier: one level
    /// coarser, but never finer than a month. A unit already coarser than
    /// the floor is not downgraded.
    pub fn escalated(self) -> Self {
        self.coarser().max(COARSE_STEP_FLOOR)
    }
}

/// Date arithmetic and text conversion primitives the control core is
/// built on. Implementations must read the clock in `now` at call time;
/// the core re-resolves "today"-relative state on every evaluation.
pub trait Calendar {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Parses `text` under `format`.
    ///
    /// # Errors
    /// Returns `ParseError` if `text` does not denote a date under `format`.
    fn parse(&self, text: &str, format: &str) -> Result<Instant, ParseError>;

    /// Formats `instant` under `format`.
    fn format(&self, instant: Instant, format: &str) -> String;

    /// Moves `instant` by `amount` (possibly negative) of `unit`.
    /// `None` on overflow of the representable range.
    fn add(&self, instant: Instant, amount: i64, unit: CalendarUnit) -> Option<Instant>;

    /// Truncates `instant` to the start of the period containing it.
    fn start_of(&self, instant: Instant, unit: CalendarUnit) -> Instant;

    /// Timeline ordering of two instants.
    fn compare(&self, a: Instant, b: Instant) -> Ordering {
        a.cmp(&b)
    }
}

/// Chrono-backed [`Calendar`].
///
/// The format language is a moment-style token alphabet at day
/// granularity: `YYYY`, `YY`, `MM`, `M`, `DD`, `D`, with every other
/// character taken literally. The format `"X"` (the whole string) means
/// integer unix seconds. Unknown tokens are not an error here; they
/// surface later as parse failures, which the pipeline degrades per its
/// policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChronoCalendar;

/// A format string translated for chrono, or the unix-seconds special case.
enum CompiledFormat {
    Unix,
    Strftime(String),
}

fn compile_format(format: &str) -> CompiledFormat {
    if format == UNIX_FORMAT {
        return CompiledFormat::Unix;
    }
    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;
    while !rest.is_empty() {
        if let Some((token, repl)) = FORMAT_TOKENS.iter().find(|(t, _)| rest.starts_with(t)) {
            out.push_str(repl);
            rest = &rest[token.len()..];
        } else if let Some(c) = rest.chars().next() {
            if c == '%' {
                out.push_str("%%");
            } else {
                out.push(c);
            }
            rest = &rest[c.len_utf8()..];
        }
    }
    CompiledFormat::Strftime(out)
}

fn at_midnight(date: NaiveDate) -> Instant {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn add_months(instant: Instant, amount: i64) -> Option<Instant> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        instant.checked_add_months(months)
    } else {
        instant.checked_sub_months(months)
    }
}

impl Calendar for ChronoCalendar {
    fn now(&self) -> Instant {
        Utc::now()
    }

    fn parse(&self, text: &str, format: &str) -> Result<Instant, ParseError> {
        let text = text.trim();
        match compile_format(format) {
            CompiledFormat::Unix => {
                let seconds: i64 = text
                    .parse()
                    .map_err(|_| ParseError::InvalidTimestamp(text.to_owned()))?;
                DateTime::from_timestamp(seconds, 0)
                    .ok_or_else(|| ParseError::InvalidTimestamp(text.to_owned()))
            }
            CompiledFormat::Strftime(fmt) => NaiveDate::parse_from_str(text, &fmt)
                .map(at_midnight)
                .map_err(|_| ParseError::UnmatchedFormat {
                    text: text.to_owned(),
                    format: format.to_owned(),
                }),
        }
    }

    fn format(&self, instant: Instant, format: &str) -> String {
        match compile_format(format) {
            CompiledFormat::Unix => instant.timestamp().to_string(),
            CompiledFormat::Strftime(fmt) => instant.date_naive().format(&fmt).to_string(),
        }
    }

    fn add(&self, instant: Instant, amount: i64, unit: CalendarUnit) -> Option<Instant> {
        match unit {
            CalendarUnit::Day => instant.checked_add_signed(Duration::try_days(amount)?),
            CalendarUnit::Week => instant.checked_add_signed(Duration::try_weeks(amount)?),
            CalendarUnit::Month => add_months(instant, amount),
            CalendarUnit::Year => add_months(instant, amount.checked_mul(12)?),
        }
    }

    fn start_of(&self, instant: Instant, unit: CalendarUnit) -> Instant {
        let date = instant.date_naive();
        let truncated = match unit {
            CalendarUnit::Day => date,
            CalendarUnit::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            CalendarUnit::Month => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
            CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        };
        at_midnight(truncated)
    }
}

/// Calendar with a pinned clock, for deterministic tests of
/// "today"-relative behavior. Everything except `now` delegates to
/// [`ChronoCalendar`].
#[cfg(test)]
pub(crate) struct FixedClock(pub Instant);

#[cfg(test)]
impl Calendar for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }

    fn parse(&self, text: &str, format: &str) -> Result<Instant, ParseError> {
        ChronoCalendar.parse(text, format)
    }

    fn format(&self, instant: Instant, format: &str) -> String {
        ChronoCalendar.format(instant, format)
    }

    fn add(&self, instant: Instant, amount: i64, unit: CalendarUnit) -> Option<Instant> {
        ChronoCalendar.add(instant, amount, unit)
    }

    fn start_of(&self, instant: Instant, unit: CalendarUnit) -> Instant {
        ChronoCalendar.start_of(instant, unit)
    }
}
