//! Upload file name handling.

use chrono::{DateTime, Utc};
use unicode_normalization::UnicodeNormalization;

/// Name used when sanitizing leaves nothing.
const FALLBACK_NAME: &str = "upload";

/// Reduce a client-supplied file name to a safe ASCII name.
///
/// Characters are NFKD-normalized and folded to ASCII, path separators and
/// whitespace runs become `_`, anything outside `[A-Za-z0-9_.-]` is removed
/// and leading or trailing dots and underscores are stripped. Non-ASCII
/// names can come back empty.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(|c| c.is_ascii())
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Split a file name into stem and dotted extension.
///
/// Leading dots belong to the stem, so `.profile` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => name.split_at(dot),
        _ => (name, ""),
    }
}

/// Name for a stored upload: `{stem}_{YYYYmmdd_HHMMSS}_{id8}{ext}`.
pub fn unique_filename(name: &str, now: DateTime<Utc>, id: &str) -> String {
    let (stem, ext) = split_extension(name);
    let stem = if stem.is_empty() { FALLBACK_NAME } else { stem };
    let short_id: String = id.chars().take(8).collect();
    format!("{}_{}_{}{}", stem, now.format("%Y%m%d_%H%M%S"), short_id, ext)
}

/// Name of the converted article for a stored upload.
pub fn converted_filename(unique: &str) -> String {
    format!("converted_{}.html", unique)
}
