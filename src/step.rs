//! Increment/decrement of the displayed value.
//!
//! A step request never hard-fails: a malformed step specification falls
//! back to the default of one day, and a target outside the bounds is
//! pulled back to the nearest bound instead of being rejected. The only
//! refusals are a readonly control and view text that does not parse.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::calendar::{Calendar, CalendarUnit, Instant};
use crate::consts::{DEFAULT_STEP_AMOUNT, DEFAULT_STEP_UNIT};
use crate::convert;
use crate::format::FormatPair;
use crate::ConfigError;

/// Amount and unit one step moves by, e.g. `"1 month"`. The unit name
/// tolerates the exact plural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub amount: u32,
    pub unit: CalendarUnit,
}

impl Default for StepSpec {
    fn default() -> Self {
        Self {
            amount: DEFAULT_STEP_AMOUNT,
            unit: DEFAULT_STEP_UNIT,
        }
    }
}

impl StepSpec {
    /// Parses a step specification such as `"1 month"` or `"2 weeks"`.
    ///
    /// # Errors
    /// Returns `ConfigError::Step` unless the text is exactly a positive
    /// amount followed by a recognized unit name.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let bad = || ConfigError::Step(text.to_owned());
        let mut parts = text.split_whitespace();
        let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(bad());
        };
        let amount: u32 = amount.parse().map_err(|_| bad())?;
        if amount == 0 {
            return Err(bad());
        }
        let unit = CalendarUnit::from_name(unit).ok_or_else(bad)?;
        Ok(Self { amount, unit })
    }

    /// Parses a step specification, degrading malformed text to the
    /// default of one day so stepping never becomes a no-op.
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_default()
    }
}

impl FromStr for StepSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Direction of a step request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    const fn signum(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Everything a step request reads besides the view text and the event
/// itself.
#[derive(Debug, Clone)]
pub struct StepContext<'a> {
    pub formats: &'a FormatPair,
    pub spec: &'a StepSpec,
    pub min: Option<Instant>,
    pub max: Option<Instant>,
    pub readonly: bool,
}

fn clamp<C: Calendar>(
    calendar: &C,
    candidate: Instant,
    min: Option<Instant>,
    max: Option<Instant>,
) -> Instant {
    let mut result = candidate;
    if let Some(min) = min {
        if calendar.compare(result, min) == Ordering::Less {
            result = min;
        }
    }
    if let Some(max) = max {
        if calendar.compare(result, max) == Ordering::Greater {
            result = max;
        }
    }
    result
}

/// Computes the next view text for a directional step request, or `None`
/// when the request is refused and the control stays as it is.
///
/// An empty view steps *to* its base value — the min bound when one is
/// set, otherwise now — without applying the step amount, so the first
/// interaction lands on the boundary rather than one step past it. A
/// `coarse` step escalates the unit (day becomes month at minimum) and
/// normalizes the base to the start of that unit before moving.
pub fn step<C: Calendar>(
    calendar: &C,
    view_text: &str,
    direction: StepDirection,
    coarse: bool,
    ctx: &StepContext<'_>,
) -> Option<String> {
    if ctx.readonly {
        return None;
    }

    let candidate = if view_text.is_empty() {
        // The base is the boundary itself; `coarse` neither escalates
        // nor normalizes it.
        ctx.min.unwrap_or_else(|| calendar.now())
    } else {
        let base = convert::parse_view(calendar, view_text, ctx.formats).ok()?;
        let unit = if coarse {
            ctx.spec.unit.escalated()
        } else {
            ctx.spec.unit
        };
        let base = if coarse {
            calendar.start_of(base, unit)
        } else {
            base
        };
        let amount = direction.signum() * i64::from(ctx.spec.amount);
        calendar.add(base, amount, unit)?
    };

    let clamped = clamp(calendar, candidate, ctx.min, ctx.max);
    Some(convert::render_view(calendar, clamped, ctx.formats))
}
