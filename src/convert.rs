//! Bidirectional conversion between the model and view representations.
//! Pure representation plumbing: bounds and stepping are handled
//! elsewhere.
//!
//! The instant-level functions are the primitives the validator and the
//! control build on; `to_view`/`to_model` compose them for direct
//! text-to-text conversion, where empty input means "no value" and
//! converts to empty output rather than an error.

use crate::calendar::{Calendar, Instant};
use crate::format::FormatPair;
use crate::ParseError;

/// Parses view text into an instant under the view format.
///
/// # Errors
/// Returns `ParseError` if `text` does not parse under the view format.
pub fn parse_view<C: Calendar>(
    calendar: &C,
    text: &str,
    formats: &FormatPair,
) -> Result<Instant, ParseError> {
    calendar.parse(text, &formats.view)
}

/// Parses model text into an instant under the model format.
///
/// # Errors
/// Returns `ParseError` if `text` does not parse under the model format.
pub fn parse_model<C: Calendar>(
    calendar: &C,
    text: &str,
    formats: &FormatPair,
) -> Result<Instant, ParseError> {
    calendar.parse(text, &formats.model)
}

/// Projects an instant to its view representation.
pub fn render_view<C: Calendar>(calendar: &C, instant: Instant, formats: &FormatPair) -> String {
    calendar.format(instant, &formats.view)
}

/// Projects an instant to its model representation.
pub fn render_model<C: Calendar>(calendar: &C, instant: Instant, formats: &FormatPair) -> String {
    calendar.format(instant, &formats.model)
}

/// Converts model text to the equivalent view text.
///
/// # Errors
/// Returns `ParseError` if non-empty `model_text` does not parse under
/// the model format.
pub fn to_view<C: Calendar>(
    calendar: &C,
    model_text: &str,
    formats: &FormatPair,
) -> Result<String, ParseError> {
    if model_text.is_empty() {
        return Ok(String::new());
    }
    let instant = parse_model(calendar, model_text, formats)?;
    Ok(render_view(calendar, instant, formats))
}

/// Converts view text to the equivalent model text.
///
/// # Errors
/// Returns `ParseError` if non-empty `view_text` does not parse under
/// the view format.
pub fn to_model<C: Calendar>(
    calendar: &C,
    view_text: &str,
    formats: &FormatPair,
) -> Result<String, ParseError> {
    if view_text.is_empty() {
        return Ok(String::new());
    }
    let instant = parse_view(calendar, view_text, formats)?;
    Ok(render_model(calendar, instant, formats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ChronoCalendar;

    #[test]
    fn test_to_model_default_formats() {
        let formats = FormatPair::default();
        let model = to_model(&ChronoCalendar, "01/31/1986", &formats).unwrap();
        assert_eq!(model, "507513600");
    }

    #[test]
    fn test_to_view_default_formats() {
        let formats = FormatPair::default();
        let view = to_view(&ChronoCalendar, "507513600", &formats).unwrap();
        assert_eq!(view, "01/31/1986");
        // Intra-day time collapses onto the same calendar date
        let view = to_view(&ChronoCalendar, "507542400", &formats).unwrap();
        assert_eq!(view, "01/31/1986");
    }

    #[test]
    fn test_view_round_trip() {
        let formats = FormatPair {
            view: "MM-DD-YYYY".to_owned(),
            model: "YYYY-MM-DD".to_owned(),
        };
        let model = to_model(&ChronoCalendar, "11-30-1982", &formats).unwrap();
        assert_eq!(model, "1982-11-30");
        assert_eq!(
            to_view(&ChronoCalendar, &model, &formats).unwrap(),
            "11-30-1982"
        );
    }

    #[test]
    fn test_empty_is_not_an_error() {
        let formats = FormatPair::default();
        assert_eq!(to_view(&ChronoCalendar, "", &formats).unwrap(), "");
        assert_eq!(to_model(&ChronoCalendar, "", &formats).unwrap(), "");
    }

    #[test]
    fn test_parse_failures_propagate() {
        let formats = FormatPair::default();
        assert!(to_model(&ChronoCalendar, "01/32/1986", &formats).is_err());
        assert!(to_view(&ChronoCalendar, "gibberish", &formats).is_err());
    }

    #[test]
    fn test_instant_projections_agree_with_text_conversion() {
        let formats = FormatPair::default();
        let instant = parse_view(&ChronoCalendar, "01/31/1986", &formats).unwrap();
        assert_eq!(render_model(&ChronoCalendar, instant, &formats), "507513600");
        assert_eq!(
            render_view(&ChronoCalendar, instant, &formats),
            "01/31/1986"
        );
        assert_eq!(
            parse_model(&ChronoCalendar, "507513600", &formats).unwrap(),
            instant
        );
    }
}
