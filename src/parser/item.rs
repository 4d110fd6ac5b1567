use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::schema::{canonical_time, SetItem, ValidationError};

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[xX](\d+)\s+(\w+)\s+(\d+:\d+)").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no set item pattern in line {0:?}")]
    NoMatch(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Strict single-line entry point, independent of any surrounding group.
///
/// Searches the whole line for the first `<N>x<M> <word> <mm:ss>` match, so
/// leading OCR noise ("© 2X50 Drill 1:10") is skipped. Effort and note are
/// not extracted on this path and come back as empty strings. The match is
/// validated before it is returned; a bad time propagates as
/// [`ParseError::Invalid`], never silently corrected.
pub fn parse_set_item_line(input: &str) -> Result<SetItem, ParseError> {
    let caps = ITEM_RE
        .captures(input)
        .ok_or_else(|| ParseError::NoMatch(input.to_string()))?;
    let repeat: u32 = caps[1]
        .parse()
        .map_err(|_| ValidationError::Repeat(caps[1].to_string()))?;
    let distance: u32 = caps[2]
        .parse()
        .map_err(|_| ValidationError::Distance(caps[2].to_string()))?;
    let time = canonical_time(&caps[4])?;
    Ok(SetItem {
        distance,
        repeat: Some(repeat),
        stroke: caps[3].to_string(),
        effort: String::new(),
        time,
        note: Some(String::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_noise_ignored() {
        let item = parse_set_item_line("© 2X50 Drill 1:10").unwrap();
        assert_eq!(item.repeat, Some(2));
        assert_eq!(item.distance, 50);
        assert_eq!(item.stroke, "Drill");
        assert_eq!(item.time, "1:10");
        assert_eq!(item.effort, "");
        assert_eq!(item.note.as_deref(), Some(""));
    }

    #[test]
    fn lowercase_x_accepted() {
        let item = parse_set_item_line("4x100 Free 1:45").unwrap();
        assert_eq!(item.repeat, Some(4));
        assert_eq!(item.distance, 100);
    }

    #[test]
    fn no_pattern_is_structural_error() {
        assert_eq!(
            parse_set_item_line("no numbers here"),
            Err(ParseError::NoMatch("no numbers here".into()))
        );
        assert!(matches!(
            parse_set_item_line(""),
            Err(ParseError::NoMatch(_))
        ));
    }

    #[test]
    fn time_canonicalized() {
        let item = parse_set_item_line("1X100 Free 09:05").unwrap();
        assert_eq!(item.time, "9:5");
    }

    #[test]
    fn out_of_range_time_fails_validation() {
        assert_eq!(
            parse_set_item_line("2X50 Drill 3:75"),
            Err(ParseError::Invalid(ValidationError::TimeRange(
                "3:75".into()
            )))
        );
    }

    #[test]
    fn short_seconds_fail_format() {
        // The search regex accepts "1:5" but canonical form needs two digits.
        assert!(matches!(
            parse_set_item_line("2X50 Drill 1:5"),
            Err(ParseError::Invalid(ValidationError::TimeFormat(_)))
        ));
    }
}
