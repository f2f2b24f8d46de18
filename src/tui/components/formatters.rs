// Row formatters
//
// Shared text helpers for list rows: compact counts and width-aware padding.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a count compactly with K/M suffixes
///
/// # Examples
/// ```ignore
/// assert_eq!(format_compact_number(228_412), "228K");
/// assert_eq!(format_compact_number(1_500_000), "1.5M");
/// assert_eq!(format_compact_number(42), "42");
/// ```
pub fn format_compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Truncate to `max` display columns, ending in `…` when cut
///
/// Uses unicode display width, not byte length, so CJK names and emoji
/// descriptions line up.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let target = max.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        width += w;
        out.push(c);
    }
    if max > 0 {
        out.push('…');
    }
    out
}

/// Truncate, then pad with spaces to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let pad = width.saturating_sub(out.width());
    out.extend(std::iter::repeat(' ').take(pad));
    out
}
