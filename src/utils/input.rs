//! Input sanitization shared by typed, pasted, and submitted text.

/// Sanitize text before it reaches the transcript or the wire:
/// tabs become four spaces, carriage returns become newlines, and other
/// control characters are dropped. Raw control bytes in a paste would
/// otherwise corrupt the terminal display.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => sanitized.push('\n'),
            '\n' => sanitized.push(c),
            _ if c.is_control() => {}
            _ => sanitized.push(c),
        }
    }
    sanitized
}
