//! Validation of the search area: postal code and country.

/// Returns the postal code trimmed, or `None` unless it is a non-empty run
/// of ASCII digits. Leading zeros are kept (`01310100` stays `01310100`).
#[must_use]
pub fn normalize_postal_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()))
        .then(|| trimmed.to_owned())
}

/// Returns the country code uppercased, or `None` unless it is exactly two
/// ASCII letters. Surrounding whitespace is ignored.
#[must_use]
pub fn normalize_country(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (trimmed.len() == 2 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()))
        .then(|| trimmed.to_ascii_uppercase())
}
