mod bound;
mod calendar;
mod consts;
mod convert;
mod format;
mod prelude;
mod step;
mod validate;

pub use bound::{resolve_bound, resolve_bound_strict, BoundRole, BoundSource};
pub use calendar::{Calendar, CalendarUnit, ChronoCalendar, Instant};
pub use consts::*;
pub use convert::{parse_model, parse_view, render_model, render_view, to_model, to_view};
pub use format::{FormatConfig, FormatPair};
pub use step::{step, StepContext, StepDirection, StepSpec};
pub use validate::{check_bounds, validate, Validation, ValidityFlags};

use crate::prelude::*;

/// Text does not denote a date under the expected format. Recovered
/// locally: the current value surfaces it as `date_error`, a bound or
/// step specification degrades instead.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "\"{text}\" does not match format \"{format}\"")]
    UnmatchedFormat { text: String, format: String },
    #[display(fmt = "invalid unix timestamp: {_0}")]
    InvalidTimestamp(String),
}

impl std::error::Error for ParseError {}

/// A bound or step configuration value is malformed. Never fatal: a bad
/// bound resolves to "unset", a bad step specification falls back to the
/// default of one day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Bound value does not parse under its format.
    #[error(transparent)]
    Bound(#[from] ParseError),

    /// Step specification is not a positive amount plus a known unit.
    #[error("invalid step specification: {0:?}")]
    Step(String),
}

/// A date-valued form control: binds a stored model text to an editable
/// view text, keeps the two synchronized under the configured formats,
/// enforces min/max bounds, and steps the displayed value on directional
/// requests.
///
/// Every configuration setter re-evaluates the retained value, so a
/// bound or format change re-judges the current date without a new edit.
/// The generic calendar defaults to [`ChronoCalendar`]; tests (or hosts
/// with their own clock discipline) can supply another implementation.
#[derive(Debug, Clone)]
pub struct DateInput<C: Calendar = ChronoCalendar> {
    calendar: C,
    formats: FormatConfig,
    min: Option<BoundSource>,
    max: Option<BoundSource>,
    step_spec: StepSpec,
    readonly: bool,
    value: Option<Instant>,
    view_text: String,
    model_text: Option<String>,
    flags: ValidityFlags,
}

impl Default for DateInput<ChronoCalendar> {
    fn default() -> Self {
        Self::with_calendar(ChronoCalendar)
    }
}

impl DateInput<ChronoCalendar> {
    /// An empty control under the built-in formats and the system clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Calendar> DateInput<C> {
    /// An empty control driven by the given calendar.
    pub fn with_calendar(calendar: C) -> Self {
        Self {
            calendar,
            formats: FormatConfig::default(),
            min: None,
            max: None,
            step_spec: StepSpec::default(),
            readonly: false,
            value: None,
            view_text: String::new(),
            model_text: None,
            flags: ValidityFlags::default(),
        }
    }

    /// Text currently displayed.
    pub fn view_text(&self) -> &str {
        &self.view_text
    }

    /// Text to persist to the model store, when the current value passed
    /// validation (or was written by the host).
    pub fn model_text(&self) -> Option<&str> {
        self.model_text.as_deref()
    }

    /// Validity of the current value.
    pub const fn flags(&self) -> ValidityFlags {
        self.flags
    }

    /// The retained instant, present whenever the last write or edit
    /// parsed, even if a bound currently rejects it.
    pub const fn value(&self) -> Option<Instant> {
        self.value
    }

    pub fn set_base_view_format(&mut self, format: Option<&str>) {
        self.formats.base_view = format.map(str::to_owned);
        self.refresh();
    }

    pub fn set_base_model_format(&mut self, format: Option<&str>) {
        self.formats.base_model = format.map(str::to_owned);
        self.refresh();
    }

    pub fn set_override_view_format(&mut self, format: Option<&str>) {
        self.formats.override_view = format.map(str::to_owned);
        self.refresh();
    }

    pub fn set_override_model_format(&mut self, format: Option<&str>) {
        self.formats.override_model = format.map(str::to_owned);
        self.refresh();
    }

    pub fn set_min(&mut self, source: Option<BoundSource>) {
        self.min = source;
        self.refresh();
    }

    pub fn set_max(&mut self, source: Option<BoundSource>) {
        self.max = source;
        self.refresh();
    }

    /// Configures the step from host text, degrading malformed text to
    /// the default of one day.
    pub fn set_step(&mut self, spec_text: &str) {
        self.step_spec = StepSpec::parse_or_default(spec_text);
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    /// External model write. Rejected text is retained verbatim so the
    /// host's value is never overwritten by a failure; an accepted value
    /// is re-rendered in the model format's canonical form. `None` (or
    /// empty text) clears the control.
    pub fn write_model(&mut self, text: Option<&str>) {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            self.clear();
            return;
        };
        let formats = self.formats.resolve();
        self.model_text = Some(text.to_owned());
        match convert::parse_model(&self.calendar, text, &formats) {
            Ok(instant) => {
                self.value = Some(instant);
                self.refresh();
            }
            Err(_) => {
                self.value = None;
                self.view_text.clear();
                self.flags = ValidityFlags {
                    date_error: true,
                    min: false,
                    max: false,
                };
            }
        }
    }

    /// User edit of the view text. The model receives a value only when
    /// every flag is clear; the typed text itself always stays visible,
    /// whether it is still being typed, unparseable, or out of range.
    /// It is never clamped here, but remains the base a later step
    /// request pulls back toward the violated bound.
    pub fn edit_view(&mut self, text: &str) {
        if text.is_empty() {
            self.clear();
            return;
        }
        let formats = self.formats.resolve();
        let (min, max) = self.bounds(&formats);
        let outcome = validate(&self.calendar, text, &formats, min, max);
        self.flags = outcome.flags;
        self.value = outcome.instant;
        self.model_text = outcome.model_text;
        self.view_text = text.to_owned();
    }

    /// Directional step request. Refused (state unchanged) when the
    /// control is readonly or the displayed text does not parse; the
    /// stepped text otherwise re-enters the same path as a manual edit.
    pub fn step(&mut self, direction: StepDirection, coarse: bool) {
        let formats = self.formats.resolve();
        let (min, max) = self.bounds(&formats);
        let ctx = StepContext {
            formats: &formats,
            spec: &self.step_spec,
            min,
            max,
            readonly: self.readonly,
        };
        if let Some(next) = step::step(&self.calendar, &self.view_text, direction, coarse, &ctx) {
            self.edit_view(&next);
        }
    }

    fn bounds(&self, formats: &FormatPair) -> (Option<Instant>, Option<Instant>) {
        (
            resolve_bound(&self.calendar, self.min.as_ref(), BoundRole::Min, formats),
            resolve_bound(&self.calendar, self.max.as_ref(), BoundRole::Max, formats),
        )
    }

    /// Re-derives projections and flags from the retained instant after a
    /// configuration change. Bounds (including `today`) are re-resolved
    /// from scratch; the instant's identity never changes here.
    fn refresh(&mut self) {
        let Some(instant) = self.value else { return };
        let formats = self.formats.resolve();
        let (min, max) = self.bounds(&formats);
        let (below, above) = check_bounds(&self.calendar, instant, min, max);
        self.flags = ValidityFlags {
            date_error: false,
            min: below,
            max: above,
        };
        if self.flags.is_valid() {
            self.view_text = convert::render_view(&self.calendar, instant, &formats);
            self.model_text = Some(convert::render_model(&self.calendar, instant, &formats));
        } else {
            self.view_text.clear();
        }
    }

    fn clear(&mut self) {
        self.value = None;
        self.model_text = None;
        self.view_text.clear();
        self.flags = ValidityFlags::default();
    }
}
