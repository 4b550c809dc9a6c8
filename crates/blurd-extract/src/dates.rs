//! Date parsing for OCR text.
//!
//! Supported forms: `DD/MM/YYYY` (also `.` and `-` separators),
//! `YYYY-MM-DD`, and textual months (`31 Dec 1999`, `Dec 31, 1999`).
//! Ambiguous numeric ordering resolves day-first: a first group above 12
//! forces day-first, a second group above 12 forces month-first, and when
//! both are 12 or below the date is read day-first, the dominant layout
//! on identity documents.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

struct DateRegexes {
    numeric: Regex,
    iso: Regex,
    day_month_name: Regex,
    month_name_day: Regex,
}

fn regexes() -> &'static DateRegexes {
    static REGEXES: OnceLock<DateRegexes> = OnceLock::new();
    REGEXES.get_or_init(|| DateRegexes {
        numeric: Regex::new(r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})\b").expect("static regex"),
        iso: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("static regex"),
        day_month_name: Regex::new(
            r"(?i)\b(\d{1,2})\s+(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)[A-Z]*\.?,?\s+(\d{4})\b",
        )
        .expect("static regex"),
        month_name_day: Regex::new(
            r"(?i)\b(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)[A-Z]*\.?\s+(\d{1,2}),?\s+(\d{4})\b",
        )
        .expect("static regex"),
    })
}

fn month_number(name: &str) -> Option<u32> {
    match name.to_ascii_uppercase().as_str() {
        "JAN" => Some(1),
        "FEB" => Some(2),
        "MAR" => Some(3),
        "APR" => Some(4),
        "MAY" => Some(5),
        "JUN" => Some(6),
        "JUL" => Some(7),
        "AUG" => Some(8),
        "SEP" => Some(9),
        "OCT" => Some(10),
        "NOV" => Some(11),
        "DEC" => Some(12),
        _ => None,
    }
}

fn resolve_numeric(a: u32, b: u32, year: i32) -> Option<NaiveDate> {
    let (day, month) = if a > 12 {
        (a, b)
    } else if b > 12 {
        (b, a)
    } else {
        // Both plausible as a month: day-first
        (a, b)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Find every parseable date in `text`, in order of appearance.
pub(crate) fn find_dates(text: &str) -> Vec<NaiveDate> {
    let r = regexes();
    let mut found: Vec<(usize, NaiveDate)> = Vec::new();

    for cap in r.numeric.captures_iter(text) {
        let (Ok(a), Ok(b), Ok(year)) = (
            cap[1].parse::<u32>(),
            cap[2].parse::<u32>(),
            cap[3].parse::<i32>(),
        ) else {
            continue;
        };
        if let Some(date) = resolve_numeric(a, b, year) {
            found.push((cap.get(0).map_or(0, |m| m.start()), date));
        }
    }

    for cap in r.iso.captures_iter(text) {
        let (Ok(year), Ok(month), Ok(day)) = (
            cap[1].parse::<i32>(),
            cap[2].parse::<u32>(),
            cap[3].parse::<u32>(),
        ) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            found.push((cap.get(0).map_or(0, |m| m.start()), date));
        }
    }

    for cap in r.day_month_name.captures_iter(text) {
        let (Ok(day), Some(month), Ok(year)) = (
            cap[1].parse::<u32>(),
            month_number(&cap[2]),
            cap[3].parse::<i32>(),
        ) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            found.push((cap.get(0).map_or(0, |m| m.start()), date));
        }
    }

    for cap in r.month_name_day.captures_iter(text) {
        let (Some(month), Ok(day), Ok(year)) = (
            month_number(&cap[1]),
            cap[2].parse::<u32>(),
            cap[3].parse::<i32>(),
        ) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            found.push((cap.get(0).map_or(0, |m| m.start()), date));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.dedup();
    found.into_iter().map(|(_, date)| date).collect()
}

/// Parse the first date appearing after a label match, looking at a short
/// window of following text.
pub(crate) fn date_after_label(text: &str, label: &Regex) -> Option<NaiveDate> {
    let m = label.find(text)?;
    let window_end = (m.end() + 40).min(text.len());
    // Avoid splitting a UTF-8 character at the window edge
    let mut end = window_end;
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    find_dates(&text[m.end()..end]).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_first_when_first_group_large() {
        let dates = find_dates("31/12/1999");
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()]);
    }

    #[test]
    fn test_month_first_when_second_group_large() {
        let dates = find_dates("12/31/1999");
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()]);
    }

    #[test]
    fn test_ambiguous_defaults_day_first() {
        let dates = find_dates("05/06/1990");
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(1990, 6, 5).unwrap()]);
    }

    #[test]
    fn test_iso_form() {
        let dates = find_dates("1999-12-31");
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()]);
    }

    #[test]
    fn test_textual_months() {
        assert_eq!(
            find_dates("31 Dec 1999"),
            vec![NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()]
        );
        assert_eq!(
            find_dates("December 31, 1999"),
            vec![NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()]
        );
    }

    #[test]
    fn test_invalid_dates_skipped() {
        assert!(find_dates("31/02/1999").is_empty());
        assert!(find_dates("99/99/1999").is_empty());
        assert!(find_dates("no dates here").is_empty());
    }

    #[test]
    fn test_dot_and_dash_separators() {
        assert_eq!(
            find_dates("31.12.1999 and 31-12-2001"),
            vec![
                NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2001, 12, 31).unwrap(),
            ]
        );
    }
}
