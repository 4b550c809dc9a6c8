//! Country detection for OCR text.
//!
//! Passes run in priority order: flag emoji, hard-coded priority markers
//! (documents from a handful of countries carry distinctive wording the
//! generic passes misread), explicit country names, ISO alpha-3 codes,
//! and finally alpha-2 codes next to a nationality label.

use regex::Regex;
use std::sync::OnceLock;

/// A recognized issuing country.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Country {
    /// English short name.
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code.
    pub alpha2: &'static str,
    /// ISO 3166-1 alpha-3 code.
    pub alpha3: &'static str,
}

const COUNTRIES: &[Country] = &[
    Country { name: "Nigeria", alpha2: "NG", alpha3: "NGA" },
    Country { name: "Egypt", alpha2: "EG", alpha3: "EGY" },
    Country { name: "United States", alpha2: "US", alpha3: "USA" },
    Country { name: "United Kingdom", alpha2: "GB", alpha3: "GBR" },
    Country { name: "Germany", alpha2: "DE", alpha3: "DEU" },
    Country { name: "France", alpha2: "FR", alpha3: "FRA" },
    Country { name: "Spain", alpha2: "ES", alpha3: "ESP" },
    Country { name: "Italy", alpha2: "IT", alpha3: "ITA" },
    Country { name: "Netherlands", alpha2: "NL", alpha3: "NLD" },
    Country { name: "Portugal", alpha2: "PT", alpha3: "PRT" },
    Country { name: "Ghana", alpha2: "GH", alpha3: "GHA" },
    Country { name: "Kenya", alpha2: "KE", alpha3: "KEN" },
    Country { name: "South Africa", alpha2: "ZA", alpha3: "ZAF" },
    Country { name: "Morocco", alpha2: "MA", alpha3: "MAR" },
    Country { name: "India", alpha2: "IN", alpha3: "IND" },
    Country { name: "Pakistan", alpha2: "PK", alpha3: "PAK" },
    Country { name: "Bangladesh", alpha2: "BD", alpha3: "BGD" },
    Country { name: "China", alpha2: "CN", alpha3: "CHN" },
    Country { name: "Japan", alpha2: "JP", alpha3: "JPN" },
    Country { name: "Brazil", alpha2: "BR", alpha3: "BRA" },
    Country { name: "Mexico", alpha2: "MX", alpha3: "MEX" },
    Country { name: "Canada", alpha2: "CA", alpha3: "CAN" },
    Country { name: "Australia", alpha2: "AU", alpha3: "AUS" },
    Country { name: "United Arab Emirates", alpha2: "AE", alpha3: "ARE" },
    Country { name: "Saudi Arabia", alpha2: "SA", alpha3: "SAU" },
    Country { name: "Turkey", alpha2: "TR", alpha3: "TUR" },
    Country { name: "Indonesia", alpha2: "ID", alpha3: "IDN" },
    Country { name: "Philippines", alpha2: "PH", alpha3: "PHL" },
];

fn by_alpha2(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.alpha2 == code)
}

/// Decode the first flag emoji (a regional-indicator pair) into a country.
fn from_flag_emoji(text: &str) -> Option<&'static Country> {
    const RI_BASE: u32 = 0x1F1E6;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let cp = c as u32;
        if (RI_BASE..RI_BASE + 26).contains(&cp) {
            if let Some(&next) = chars.peek() {
                let np = next as u32;
                if (RI_BASE..RI_BASE + 26).contains(&np) {
                    let code = format!(
                        "{}{}",
                        char::from(b'A' + (cp - RI_BASE) as u8),
                        char::from(b'A' + (np - RI_BASE) as u8)
                    );
                    if let Some(country) = by_alpha2(&code) {
                        return Some(country);
                    }
                }
            }
        }
    }
    None
}

/// Markers that decide a country before any generic scan runs.
///
/// Nigerian NIN slips and Egyptian national IDs often OCR without a
/// readable country name, so their issuer markers take priority.
fn from_priority_markers(upper: &str) -> Option<&'static Country> {
    const NIGERIA_MARKERS: &[&str] =
        &["FEDERAL REPUBLIC OF NIGERIA", "NIMC", "NATIONAL IDENTITY NUMBER", "NIN:"];
    const EGYPT_MARKERS: &[&str] = &["ARAB REPUBLIC OF EGYPT", "EGYPTIAN NATIONAL ID"];

    if NIGERIA_MARKERS.iter().any(|m| upper.contains(m)) {
        return by_alpha2("NG");
    }
    if EGYPT_MARKERS.iter().any(|m| upper.contains(m)) {
        return by_alpha2("EG");
    }
    None
}

fn alpha3_regex() -> &'static Regex {
    static ALPHA3: OnceLock<Regex> = OnceLock::new();
    ALPHA3.get_or_init(|| Regex::new(r"\b([A-Z]{3})\b").expect("static regex"))
}

fn nationality_regex() -> &'static Regex {
    static NATIONALITY: OnceLock<Regex> = OnceLock::new();
    NATIONALITY.get_or_init(|| {
        Regex::new(r"(?:NATIONALITY|COUNTRY)\s*[:.]?\s*([A-Z]{2})\b").expect("static regex")
    })
}

/// Detect the issuing country of a document text, if any.
pub(crate) fn detect_country(text: &str) -> Option<&'static Country> {
    if let Some(country) = from_flag_emoji(text) {
        return Some(country);
    }

    let upper = text.to_uppercase();

    if let Some(country) = from_priority_markers(&upper) {
        return Some(country);
    }

    for country in COUNTRIES {
        if upper.contains(&country.name.to_uppercase()) {
            return Some(country);
        }
    }

    for cap in alpha3_regex().captures_iter(&upper) {
        if let Some(country) = COUNTRIES.iter().find(|c| c.alpha3 == &cap[1]) {
            return Some(country);
        }
    }

    // Bare alpha-2 codes collide with ordinary words, so only trust them
    // next to a nationality label.
    if let Some(cap) = nationality_regex().captures(&upper) {
        if let Some(country) = by_alpha2(&cap[1]) {
            return Some(country);
        }
    }

    None
}
