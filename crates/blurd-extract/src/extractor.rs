//! The field extractor: a fixed sequence of independent regex passes over
//! raw OCR text, one per field.

use crate::country::detect_country;
use crate::dates::{date_after_label, find_dates};
use blurd_types::{DocumentType, ExtractedFields};
use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

const MAX_AGE: i32 = 150;
const MIN_DOB_YEAR: i32 = 1900;

struct FieldRegexes {
    dob_label: Regex,
    expiry_label: Regex,
    doc_number_sep: Regex,
    doc_number_word: Regex,
    doc_number_generic: Regex,
}

fn regexes() -> &'static FieldRegexes {
    static REGEXES: OnceLock<FieldRegexes> = OnceLock::new();
    REGEXES.get_or_init(|| FieldRegexes {
        dob_label: Regex::new(r"(?i)\b(?:DOB|DATE\s+OF\s+BIRTH|BIRTH\s+DATE|BORN)\b")
            .expect("static regex"),
        expiry_label: Regex::new(
            r"(?i)\b(?:DATE\s+OF\s+EXPIRY|EXPIRY\s+DATE|EXPIRY|EXPIRES|EXPIRATION|VALID\s+UNTIL|EXP)\b",
        )
        .expect("static regex"),
        // Label followed by an explicit separator: "Passport No: A1234567",
        // "NIN: 12345678901", "Document No. 123456789"
        doc_number_sep: Regex::new(
            r"(?i)\b(?:ID|DOCUMENT|PASSPORT|CARD|LICEN[CS]E|NIN)[ \t]*(?:NO|NUMBER|NUM)?[ \t]*[:.#][ \t]*((?-i:[A-Z0-9][A-Z0-9\- ]{3,24}[A-Z0-9]))",
        )
        .expect("static regex"),
        // Label plus a number word but no separator: "Passport No A1234567"
        doc_number_word: Regex::new(
            r"(?i)\b(?:ID|DOCUMENT|PASSPORT|CARD|LICEN[CS]E|NIN)[ \t]*(?:NO|NUMBER|NUM)[ \t]+((?-i:[A-Z0-9][A-Z0-9\-]{3,24}[A-Z0-9]))",
        )
        .expect("static regex"),
        doc_number_generic: Regex::new(r"\b([A-Z]{1,3}[0-9]{6,9})\b").expect("static regex"),
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Whole years elapsed from `dob` to `today`.
fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

fn extract_dob(text: &str, today: NaiveDate) -> Option<(String, u8)> {
    let r = regexes();

    let candidate = date_after_label(text, &r.dob_label).or_else(|| {
        // No label: take the earliest plausible birth date in the text
        find_dates(text)
            .into_iter()
            .filter(|d| *d <= today)
            .min()
    })?;

    if candidate.year() < MIN_DOB_YEAR || candidate > today {
        return None;
    }

    let age = age_in_years(candidate, today);
    if !(0..=MAX_AGE).contains(&age) {
        return None;
    }

    Some((format_date(candidate), age as u8))
}

fn extract_expiry(text: &str, today: NaiveDate) -> Option<String> {
    let r = regexes();

    let candidate = date_after_label(text, &r.expiry_label)
        .or_else(|| find_dates(text).into_iter().find(|d| *d > today))?;

    // Past dates are rejected outright
    if candidate < today {
        return None;
    }

    Some(format_date(candidate))
}

fn extract_document_number(text: &str) -> Option<String> {
    let r = regexes();

    let labeled = [&r.doc_number_sep, &r.doc_number_word]
        .iter()
        .find_map(|re| re.captures(text).and_then(|cap| cap.get(1)))
        .map(|m| m.as_str().to_string());

    let raw = labeled.or_else(|| {
        r.doc_number_generic
            .captures(text)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
    })?;

    let normalized: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if normalized.len() < 5 {
        return None;
    }
    Some(normalized)
}

fn detect_document_type(upper: &str) -> Option<DocumentType> {
    if upper.contains("PASSPORT") {
        Some(DocumentType::Passport)
    } else if upper.contains("DRIVING LICEN") || upper.contains("DRIVER") {
        Some(DocumentType::DriversLicence)
    } else if upper.contains("RESIDENCE PERMIT") {
        Some(DocumentType::ResidencePermit)
    } else if upper.contains("NATIONAL ID")
        || upper.contains("IDENTITY CARD")
        || upper.contains("NATIONAL IDENTITY")
    {
        Some(DocumentType::NationalId)
    } else {
        None
    }
}

/// Pull structured fields out of raw OCR text, best effort.
///
/// Never fails: each pass independently either contributes a field or
/// leaves it unset, and the raw input text is always preserved in the
/// returned record.
pub fn extract_fields(text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::raw_only(text);
    if text.trim().is_empty() {
        return fields;
    }

    let today = Utc::now().date_naive();
    let upper = text.to_uppercase();

    if let Some((dob, age)) = extract_dob(text, today) {
        fields.dob = Some(dob);
        fields.age = Some(age);
    }

    fields.expiry = extract_expiry(text, today);
    fields.document_number = extract_document_number(text);

    if let Some(country) = detect_country(text) {
        fields.country = Some(country.name.to_string());
        fields.country_code = Some(country.alpha2.to_string());
    }

    fields.document_type = detect_document_type(&upper);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_labeled_dob_day_first() {
        let fields = extract_fields("Name: Ada Obi\nDOB: 31/12/1999\nSex: F");
        assert_eq!(fields.dob.as_deref(), Some("1999-12-31"));
        assert!(fields.age.is_some());
    }

    #[test]
    fn test_iso_dob() {
        let fields = extract_fields("Date of Birth 1985-04-20");
        assert_eq!(fields.dob.as_deref(), Some("1985-04-20"));
    }

    #[test]
    fn test_textual_dob() {
        let fields = extract_fields("Born 20 Apr 1985");
        assert_eq!(fields.dob.as_deref(), Some("1985-04-20"));
    }

    #[test]
    fn test_dob_out_of_range_omitted() {
        let fields = extract_fields("DOB: 31/12/1850");
        assert!(fields.dob.is_none());
        assert!(fields.age.is_none());

        let fields = extract_fields("DOB: 31/12/2150");
        assert!(fields.dob.is_none());
    }

    #[test]
    fn test_age_bound() {
        let fields = extract_fields("DOB: 01/01/1990");
        let age = fields.age.unwrap();
        assert!((0..=150).contains(&(age as i32)));
    }

    #[test]
    fn test_expiry_in_future_kept() {
        let fields = extract_fields("Expiry: 31/12/2099");
        assert_eq!(fields.expiry.as_deref(), Some("2099-12-31"));
    }

    #[test]
    fn test_expired_date_rejected() {
        let fields = extract_fields("Expiry: 31/12/2001");
        assert!(fields.expiry.is_none());
    }

    #[test]
    fn test_document_number_labeled() {
        let fields = extract_fields("Passport No: A1234567\nNationality: NG");
        assert_eq!(fields.document_number.as_deref(), Some("A1234567"));
    }

    #[test]
    fn test_document_number_with_separators() {
        let fields = extract_fields("ID No: AB-123 456-7");
        assert_eq!(fields.document_number.as_deref(), Some("AB1234567"));
    }

    #[test]
    fn test_document_number_generic_fallback() {
        let fields = extract_fields("holder code XY1234567 printed on front");
        assert_eq!(fields.document_number.as_deref(), Some("XY1234567"));
    }

    #[test]
    fn test_country_and_type() {
        let fields = extract_fields("FEDERAL REPUBLIC OF NIGERIA\nNATIONAL IDENTITY CARD");
        assert_eq!(fields.country.as_deref(), Some("Nigeria"));
        assert_eq!(fields.country_code.as_deref(), Some("NG"));
        assert_eq!(fields.document_type, Some(DocumentType::NationalId));
    }

    #[test]
    fn test_passport_full_text() {
        let text = "PASSPORT\nRepublic of Ghana\nPassport No: G0123456\n\
                    Date of Birth: 05/06/1992\nDate of Expiry: 05/06/2032";
        let fields = extract_fields(text);
        assert_eq!(fields.document_type, Some(DocumentType::Passport));
        assert_eq!(fields.country_code.as_deref(), Some("GH"));
        assert_eq!(fields.document_number.as_deref(), Some("G0123456"));
        assert_eq!(fields.dob.as_deref(), Some("1992-06-05"));
        assert_eq!(fields.expiry.as_deref(), Some("2032-06-05"));
    }

    #[test]
    fn test_empty_and_garbage_inputs() {
        assert!(extract_fields("").is_empty());
        assert!(extract_fields("   \n\t ").is_empty());

        let fields = extract_fields("%%%%@@@@!!!! 12 garbage");
        assert_eq!(fields.raw_text, "%%%%@@@@!!!! 12 garbage");
    }

    proptest! {
        // Totality: any input yields a record and never panics
        #[test]
        fn prop_never_panics(input in "\\PC*") {
            let fields = extract_fields(&input);
            prop_assert_eq!(fields.raw_text, input);
        }

        #[test]
        fn prop_age_always_bounded(input in "\\PC*") {
            let fields = extract_fields(&input);
            if let Some(age) = fields.age {
                prop_assert!((age as i32) <= 150);
            }
        }
    }
}
