//! # Debounced location search
//!
//! Each location input owns a [`SearchDebouncer`]. Keystrokes record the
//! query and bump a generation counter; `poll` fires at most one search
//! per 500ms-quiet period, tagged with the generation at fire time.
//!
//! The generation tag is what makes out-of-order responses safe: a
//! response is applied only while its generation is still current, so a
//! superseded in-flight search is dropped on arrival instead of
//! overwriting newer results.
//!
//! Time is passed in explicitly (`Instant` parameters), which keeps the
//! whole thing synchronous and testable without a runtime.

use std::time::{Duration, Instant};

/// Quiet period before a pending query fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct SearchDebouncer {
    query: String,
    generation: u64,
    pending_since: Option<Instant>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            generation: 0,
            pending_since: None,
        }
    }

    /// Records a keystroke. Supersedes any in-flight search by bumping the
    /// generation. An effectively empty query never fires.
    pub fn note_input(&mut self, query: &str, now: Instant) {
        self.generation += 1;
        self.query = query.to_string();
        self.pending_since = if query.trim().is_empty() {
            None
        } else {
            Some(now)
        };
    }

    /// Returns the `(generation, query)` to search for once the quiet
    /// period has elapsed. Fires at most once per pending input.
    pub fn poll(&mut self, now: Instant) -> Option<(u64, String)> {
        let since = self.pending_since?;
        if now.duration_since(since) < SEARCH_DEBOUNCE {
            return None;
        }
        self.pending_since = None;
        Some((self.generation, self.query.clone()))
    }

    /// Whether a result tagged with `generation` is still worth applying.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Drops any pending fire and supersedes in-flight searches. Called
    /// when a suggestion is chosen or the field is cleared.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending_since = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending_since.is_some()
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    /// Typing "a", "ab", "abc" within one quiet window fires exactly one
    /// search, for "abc".
    #[test]
    fn test_rapid_typing_fires_once_with_final_query() {
        let start = t0();
        let mut debouncer = SearchDebouncer::new();

        debouncer.note_input("a", start);
        debouncer.note_input("ab", start + Duration::from_millis(100));
        debouncer.note_input("abc", start + Duration::from_millis(200));

        // Still inside the quiet window of the last keystroke.
        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);

        let fired = debouncer.poll(start + Duration::from_millis(700));
        assert_eq!(fired.as_ref().map(|(_, q)| q.as_str()), Some("abc"));

        // Nothing left to fire.
        assert_eq!(debouncer.poll(start + Duration::from_millis(2000)), None);
    }

    #[test]
    fn test_poll_respects_quiet_period() {
        let start = t0();
        let mut debouncer = SearchDebouncer::new();
        debouncer.note_input("main", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(499)), None);
        assert!(debouncer.poll(start + Duration::from_millis(500)).is_some());
    }

    #[test]
    fn test_stale_generation_is_rejected() {
        let start = t0();
        let mut debouncer = SearchDebouncer::new();

        debouncer.note_input("air", start);
        let (generation, _) = debouncer.poll(start + SEARCH_DEBOUNCE).unwrap();
        assert!(debouncer.is_current(generation));

        // A later keystroke supersedes the in-flight search.
        debouncer.note_input("airport", start + Duration::from_millis(600));
        assert!(!debouncer.is_current(generation));
    }

    #[test]
    fn test_current_generation_is_accepted() {
        let start = t0();
        let mut debouncer = SearchDebouncer::new();
        debouncer.note_input("station", start);

        let (generation, query) = debouncer.poll(start + SEARCH_DEBOUNCE).unwrap();
        assert_eq!(query, "station");
        assert!(debouncer.is_current(generation));
    }

    #[test]
    fn test_empty_query_never_fires() {
        let start = t0();
        let mut debouncer = SearchDebouncer::new();

        debouncer.note_input("a", start);
        debouncer.note_input("", start + Duration::from_millis(100));

        assert_eq!(debouncer.poll(start + Duration::from_secs(2)), None);
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_whitespace_query_never_fires() {
        let start = t0();
        let mut debouncer = SearchDebouncer::new();
        debouncer.note_input("   ", start);
        assert_eq!(debouncer.poll(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn test_cancel_drops_pending_and_supersedes_in_flight() {
        let start = t0();
        let mut debouncer = SearchDebouncer::new();

        debouncer.note_input("harbor", start);
        let (generation, _) = debouncer.poll(start + SEARCH_DEBOUNCE).unwrap();

        debouncer.note_input("harbor east", start + Duration::from_millis(600));
        debouncer.cancel();

        assert!(!debouncer.is_current(generation));
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }
}
