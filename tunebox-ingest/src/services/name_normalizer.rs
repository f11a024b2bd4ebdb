//! Artist name normalization
//!
//! Cuts a raw artist tag at the leftmost collaboration marker and trims the
//! rest. Markers (case-insensitive):
//! - `[`, `(` or `,` anywhere
//! - a whitespace-preceded `feat.`, `ft.` or `vs.` (the period ends the
//!   token, so `"Foo feat.Bar"` is cut too)
//! - a whitespace-preceded standalone `feat`, `ft`, `featuring`, `with`,
//!   `remix` or `vs`
//!
//! This is a heuristic. Names that legitimately contain a comma or a
//! bracket are cut as well.

use once_cell::sync::Lazy;
use regex::Regex;

static COLLABORATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\[(,]|\s(?:feat\.|ft\.|vs\.|(?:featuring|feat|ft|with|remix|vs)(?:\s|$))")
        .unwrap()
});

/// Strip collaboration/remix annotations from a raw artist string
pub fn normalize_artist_name(raw: &str) -> String {
    let head = match COLLABORATION_MARKER.find(raw) {
        Some(marker) => &raw[..marker.start()],
        None => raw,
    };
    head.trim().to_string()
}
