use deunicode::deunicode;

/// Canonical form used for keyword matching: ASCII transliteration, then
/// lowercase. Applied identically to keywords (once, at load) and to
/// transaction text (per classification).
pub fn normalize(text: &str) -> String {
    deunicode(text).to_lowercase()
}

/// Absent fields match nothing.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
