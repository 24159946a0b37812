//! Formatting utilities used for CLI and export outputs.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad to `width` terminal columns, truncating with `…` when too wide.
pub fn pad_right(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current <= width {
        return format!("{s}{}", " ".repeat(width - current));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// `"3 of 10 (30%)"`
pub fn ratio(part: usize, whole: usize, percent: u32) -> String {
    format!("{part} of {whole} ({percent}%)")
}
