//! Fixed-interval reveal of an answer, one grapheme cluster per step.

use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;

/// Reveal state for one assistant answer. The full text is known up front;
/// `advance` moves the visible prefix forward by however many whole
/// intervals have elapsed, so a slow event loop batches steps instead of
/// falling behind.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    visible: usize,
    total: usize,
    interval: Duration,
    last_step: Instant,
    complete: bool,
}

impl Typewriter {
    pub fn new(text: String, interval: Duration, now: Instant) -> Self {
        let total = text.graphemes(true).count();
        Typewriter {
            complete: total == 0,
            text,
            visible: 0,
            total,
            interval,
            last_step: now,
        }
    }

    /// Advance the visible prefix. Returns true when the visible text changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.complete {
            return false;
        }
        if self.interval.is_zero() {
            self.visible = self.total;
            self.complete = true;
            return true;
        }
        let elapsed = now.saturating_duration_since(self.last_step);
        let steps = (elapsed.as_nanos() / self.interval.as_nanos()) as usize;
        if steps == 0 {
            return false;
        }
        let remaining = self.total - self.visible;
        if steps >= remaining {
            self.visible = self.total;
            self.complete = true;
            self.last_step = now;
        } else {
            self.visible += steps;
            // Carry the fractional remainder so cadence stays even.
            self.last_step += self.interval * steps as u32;
        }
        true
    }

    /// The currently revealed prefix, always on a grapheme boundary.
    pub fn visible_text(&self) -> &str {
        if self.complete {
            return &self.text;
        }
        let end = self
            .text
            .grapheme_indices(true)
            .nth(self.visible)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn skip_to_end(&mut self) {
        self.visible = self.total;
        self.complete = true;
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(10);

    #[test]
    fn reveals_one_grapheme_per_interval() {
        let start = Instant::now();
        let mut tw = Typewriter::new("Hello".to_string(), STEP, start);
        assert_eq!(tw.visible_text(), "");

        assert!(tw.advance(start + STEP));
        assert_eq!(tw.visible_text(), "H");

        assert!(tw.advance(start + STEP * 2));
        assert_eq!(tw.visible_text(), "He");
    }

    #[test]
    fn nothing_changes_before_the_interval_elapses() {
        let start = Instant::now();
        let mut tw = Typewriter::new("Hello".to_string(), STEP, start);
        assert!(!tw.advance(start + Duration::from_millis(9)));
        assert_eq!(tw.visible_text(), "");
    }

    #[test]
    fn batches_missed_intervals() {
        let start = Instant::now();
        let mut tw = Typewriter::new("Hello".to_string(), STEP, start);
        assert!(tw.advance(start + STEP * 3));
        assert_eq!(tw.visible_text(), "Hel");
    }

    #[test]
    fn completes_at_exactly_the_full_text() {
        let start = Instant::now();
        let mut tw = Typewriter::new("Hello".to_string(), STEP, start);
        assert!(tw.advance(start + STEP * 500));
        assert!(tw.is_complete());
        assert_eq!(tw.visible_text(), "Hello");
    }

    #[test]
    fn never_splits_a_grapheme_cluster() {
        let start = Instant::now();
        // Family emoji is one cluster out of several scalar values.
        let text = "a\u{1F469}\u{200D}\u{1F469}\u{200D}\u{1F466}b";
        let mut tw = Typewriter::new(text.to_string(), STEP, start);
        tw.advance(start + STEP);
        assert_eq!(tw.visible_text(), "a");
        tw.advance(start + STEP * 2);
        assert_eq!(tw.visible_text(), "a\u{1F469}\u{200D}\u{1F469}\u{200D}\u{1F466}");
        tw.advance(start + STEP * 3);
        assert!(tw.is_complete());
        assert_eq!(tw.visible_text(), text);
    }

    #[test]
    fn zero_interval_reveals_everything_at_once() {
        let start = Instant::now();
        let mut tw = Typewriter::new("Hello".to_string(), Duration::ZERO, start);
        assert!(tw.advance(start));
        assert!(tw.is_complete());
        assert_eq!(tw.visible_text(), "Hello");
    }

    #[test]
    fn empty_text_is_complete_immediately() {
        let start = Instant::now();
        let tw = Typewriter::new(String::new(), STEP, start);
        assert!(tw.is_complete());
        assert_eq!(tw.visible_text(), "");
    }

    #[test]
    fn skip_to_end_finishes_the_reveal() {
        let start = Instant::now();
        let mut tw = Typewriter::new("Hello".to_string(), STEP, start);
        tw.skip_to_end();
        assert!(tw.is_complete());
        assert_eq!(tw.visible_text(), "Hello");
    }
}
