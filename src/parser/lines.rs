use tracing::debug;

use crate::schema::RawSetItem;

const HEADER_KEYWORDS: &[&str] = &[
    "WARMUP", "WARM UP", "PRE SET", "MAIN SET", "COOL DOWN", "SET GROUP",
];

/// One classified input line. First-match-wins over the rules in [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Whole line kept verbatim, e.g. "2200 metres".
    TotalDistance(String),
    /// Whole line kept verbatim, e.g. "38 min".
    TotalTime(String),
    GroupHeader { title: String, repeat: Option<u32> },
    RepeatDirective(u32),
    SetItem(RawSetItem),
    Unrecognized,
}

pub fn classify_lines(text: &str) -> Vec<Line> {
    text.lines().map(classify).collect()
}

/// Classify one raw OCR line. Rules are checked in priority order; the first
/// match wins, so e.g. a header line that also mentions "min" is a total-time
/// line, not a header.
pub fn classify(line: &str) -> Line {
    if line.contains("metres") || line.contains("yards") {
        return Line::TotalDistance(line.to_string());
    }

    if line.contains("min") {
        return Line::TotalTime(line.to_string());
    }

    if HEADER_KEYWORDS.iter().any(|kw| line.contains(kw)) {
        // Malformed headers like "SET GROUP 1 - 2x" are absorbed as a doubled
        // main set, whatever keyword actually matched.
        if line.contains("2x") {
            return Line::GroupHeader {
                title: "MAIN SET".to_string(),
                repeat: Some(2),
            };
        }
        return Line::GroupHeader {
            title: line.trim().to_string(),
            repeat: None,
        };
    }

    if line.contains("Repeat 1X") || line.contains("Repeat 2X") {
        // OCR emits lines like "© Repeat 2X": the count is the integer prefix
        // of the third token ("2X" -> 2).
        match line.split_whitespace().nth(2).and_then(leading_int) {
            Some(n) => return Line::RepeatDirective(n),
            None => {
                debug!(line, "repeat directive without a usable count, dropping");
                return Line::Unrecognized;
            }
        }
    }

    if line.contains('X') && line.contains(':') {
        if let Some(item) = split_loose_item(line) {
            return Line::SetItem(item);
        }
        debug!(line, "set-item shaped line too short to split, dropping");
    }

    Line::Unrecognized
}

/// Loose positional split of a set-item line such as "@ 1X200 Easy Pull 3:30":
/// distance = first two tokens glued (composite, not parsed here), stroke =
/// third token, effort = everything between the fourth and the last, time =
/// last token.
fn split_loose_item(line: &str) -> Option<RawSetItem> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }
    let distance = format!("{} {}", parts[0], parts[1]);
    let stroke = parts.get(2).copied().unwrap_or_default().to_string();
    let effort = if parts.len() > 4 {
        parts[3..parts.len() - 1].join(" ")
    } else {
        String::new()
    };
    let time = parts[parts.len() - 1].to_string();
    Some(RawSetItem {
        distance,
        stroke,
        effort,
        time,
    })
}

fn leading_int(token: &str) -> Option<u32> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_distance_verbatim() {
        assert_eq!(
            classify("  2200 metres"),
            Line::TotalDistance("  2200 metres".into())
        );
        assert_eq!(
            classify("1800 yards"),
            Line::TotalDistance("1800 yards".into())
        );
    }

    #[test]
    fn total_time_verbatim() {
        assert_eq!(classify("38 min"), Line::TotalTime("38 min".into()));
    }

    #[test]
    fn total_time_outranks_header() {
        // "min" wins over the header keyword by rule order.
        assert_eq!(
            classify("WARMUP 20 min"),
            Line::TotalTime("WARMUP 20 min".into())
        );
    }

    #[test]
    fn headers_trimmed() {
        for kw in ["WARMUP", "PRE SET", "MAIN SET", "COOL DOWN"] {
            let line = format!("  {kw} ");
            assert_eq!(
                classify(&line),
                Line::GroupHeader {
                    title: kw.into(),
                    repeat: None
                }
            );
        }
    }

    #[test]
    fn header_with_2x_overridden_to_main_set() {
        assert_eq!(
            classify("SET GROUP 1 - 2x"),
            Line::GroupHeader {
                title: "MAIN SET".into(),
                repeat: Some(2),
            }
        );
        // Any keyword combined with "2x" gets the same override.
        assert_eq!(
            classify("WARMUP 2x"),
            Line::GroupHeader {
                title: "MAIN SET".into(),
                repeat: Some(2),
            }
        );
    }

    #[test]
    fn set_group_header_kept_verbatim_without_2x() {
        assert_eq!(
            classify("SET GROUP 1"),
            Line::GroupHeader {
                title: "SET GROUP 1".into(),
                repeat: None
            }
        );
    }

    #[test]
    fn repeat_directive_count_from_third_token() {
        assert_eq!(classify("© Repeat 2X"), Line::RepeatDirective(2));
        assert_eq!(classify("@ Repeat 1X"), Line::RepeatDirective(1));
    }

    #[test]
    fn repeat_directive_without_count_dropped() {
        // Only two tokens, no third to take the count from.
        assert_eq!(classify("Repeat 2X"), Line::Unrecognized);
        assert_eq!(classify("~ Repeat 1X please"), Line::RepeatDirective(1));
    }

    #[test]
    fn loose_item_split() {
        assert_eq!(
            classify("@ 1X200 Easy Pull 3:30"),
            Line::SetItem(RawSetItem {
                distance: "@ 1X200".into(),
                stroke: "Easy".into(),
                effort: "Pull".into(),
                time: "3:30".into(),
            })
        );
    }

    #[test]
    fn loose_item_empty_effort() {
        assert_eq!(
            classify("© 4X50 Drill 1:10"),
            Line::SetItem(RawSetItem {
                distance: "© 4X50".into(),
                stroke: "Drill".into(),
                effort: String::new(),
                time: "1:10".into(),
            })
        );
    }

    #[test]
    fn loose_item_multiword_effort() {
        assert_eq!(
            classify("© 4X100 Free Threshold Effort 1:45"),
            Line::SetItem(RawSetItem {
                distance: "© 4X100".into(),
                stroke: "Free".into(),
                effort: "Threshold Effort".into(),
                time: "1:45".into(),
            })
        );
    }

    #[test]
    fn unrecognized_lines() {
        assert_eq!(classify("SWIM WORKOUT"), Line::Unrecognized);
        assert_eq!(classify(""), Line::Unrecognized);
        assert_eq!(classify("no numbers here"), Line::Unrecognized);
        // Has 'X' and ':' but a single token cannot be split.
        assert_eq!(classify("X:"), Line::Unrecognized);
    }

    #[test]
    fn classify_lines_keeps_order() {
        let lines = classify_lines("2200 metres\nWARMUP\n@ 1X200 Easy Pull 3:30");
        assert_eq!(lines.len(), 3);
        assert!(matches!(lines[0], Line::TotalDistance(_)));
        assert!(matches!(lines[1], Line::GroupHeader { .. }));
        assert!(matches!(lines[2], Line::SetItem(_)));
    }
}
