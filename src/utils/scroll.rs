//! Wrapped-row math for transcript scrolling.
//!
//! The transcript paragraph wraps with `Wrap { trim: true }`; scroll bounds
//! need to know how many rows that produces. The estimate here mirrors the
//! paragraph's greedy word wrap over display width.

use ratatui::text::Line;
use unicode_width::UnicodeWidthStr;

/// Number of terminal rows `lines` occupy after word wrapping at `width`
/// columns.
pub fn wrapped_line_count(lines: &[Line], width: u16) -> u16 {
    if width == 0 {
        return lines.len().min(u16::MAX as usize) as u16;
    }
    let width = width as usize;
    let mut rows: u16 = 0;
    for line in lines {
        let text: String = line
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        rows = rows.saturating_add(rows_for_text(&text, width));
    }
    rows
}

pub fn max_scroll_offset(total_rows: u16, viewport_rows: u16) -> u16 {
    total_rows.saturating_sub(viewport_rows)
}

fn rows_for_text(text: &str, width: usize) -> u16 {
    if text.trim().is_empty() {
        return 1;
    }
    let mut rows: u16 = 1;
    let mut used = 0usize;
    for word in text.split_whitespace() {
        let mut w = word.width();
        if used > 0 {
            if used + 1 + w <= width {
                used += 1 + w;
                continue;
            }
            rows = rows.saturating_add(1);
            used = 0;
        }
        // Word starts a fresh row; oversized words spill across rows.
        while w > width {
            w -= width;
            rows = rows.saturating_add(1);
        }
        used = w;
    }
    rows
}
