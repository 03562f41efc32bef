use chrono::NaiveDateTime;
use cornershop_core::ExportFormat;

/// `{base_name}_{YYYYMMDD-HHMMSS}.{ext}`
#[must_use]
pub fn output_file_name(base_name: &str, format: ExportFormat, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        sanitize_component(base_name),
        timestamp.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

/// `{term}_{postal_code}_{YYYYMMDD_HHMMSS}.json`
#[must_use]
pub fn batch_file_name(term: &str, postal_code: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.json",
        sanitize_component(term),
        sanitize_component(postal_code),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Makes `s` safe to use as a single path component: path separators and
/// control characters become `_`, and an empty result becomes `"export"`.
#[must_use]
pub fn sanitize_component(s: &str) -> String {
    let out: String = s
        .trim()
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':' | '\0') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if out.is_empty() || out == "." || out == ".." {
        "export".to_string()
    } else {
        out
    }
}
