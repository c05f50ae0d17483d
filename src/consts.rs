use crate::calendar::CalendarUnit;

/// Built-in view format (month-first US style)
pub const DEFAULT_VIEW_FORMAT: &str = "MM/DD/YYYY";

/// Built-in model format (integer unix seconds)
pub const DEFAULT_MODEL_FORMAT: &str = "X";

/// Format string meaning "integer unix seconds" when it is the whole format
pub const UNIX_FORMAT: &str = "X";

/// Keyword accepted in a min/max configuration, resolved against the
/// current clock at every evaluation
pub const TODAY_KEYWORD: &str = "today";

/// Step applied when no (or a malformed) step specification is configured
pub const DEFAULT_STEP_AMOUNT: u32 = 1;
/// Unit applied when no (or a malformed) step specification is configured
pub const DEFAULT_STEP_UNIT: CalendarUnit = CalendarUnit::Day;

/// Floor for modifier-escalated stepping: a coarse step never moves by
/// less than a month
pub const COARSE_STEP_FLOOR: CalendarUnit = CalendarUnit::Month;

/// Unit names recognized in a step specification (exact plural tolerated)
pub const UNIT_NAMES: [(&str, CalendarUnit); 8] = [
    ("day", CalendarUnit::Day),
    ("days", CalendarUnit::Day),
    ("week", CalendarUnit::Week),
    ("weeks", CalendarUnit::Week),
    ("month", CalendarUnit::Month),
    ("months", CalendarUnit::Month),
    ("year", CalendarUnit::Year),
    ("years", CalendarUnit::Year),
];

/// Date format tokens and their strftime translations, longest first so
/// `YYYY` wins over `YY` during the scan
pub const FORMAT_TOKENS: [(&str, &str); 6] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
];
