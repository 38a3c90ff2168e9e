//! Software debouncing for the manual switch.
//!
//! A mechanical switch bounces: a single press produces a burst of
//! transitions for a few milliseconds. The [`Debouncer`] turns that noisy
//! raw signal into at most one logical [`Edge`] per real actuation by
//! requiring the reading to hold steady for a settle window before it is
//! committed.
//!
//! The machine has three effective states: *settled*, *debouncing* (a
//! change was seen, window running), and back to *settled*: either with the
//! new value and an emitted edge, or with the old value and no edge if the
//! signal reverted mid-window.
//!
//! Time is injected (`now: Instant`) rather than read internally, which
//! keeps sampling deterministic under test.

use std::time::{Duration, Instant};

/// A committed logical transition in the debounced signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Stable value went logical-high (switch pressed).
    Rising,
    /// Stable value went logical-low (switch released).
    Falling,
}

/// Time-window debouncer for a single digital input.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_raw: bool,
    stable_value: bool,
    stable_since: Instant,
}

impl Debouncer {
    /// Create a debouncer with the given settle window and initial level.
    ///
    /// The initial level is treated as already stable at `now`; no edge is
    /// emitted for it.
    #[must_use]
    pub fn new(window: Duration, initial_level: bool, now: Instant) -> Self {
        Self {
            window,
            last_raw: initial_level,
            stable_value: initial_level,
            stable_since: now,
        }
    }

    /// Feed one raw reading taken at `now`.
    ///
    /// Returns `Some(edge)` exactly when the reading has differed from the
    /// stable value for longer than the settle window. Any change in the raw
    /// reading (including a revert to the stable value) restarts the
    /// window, so a blip shorter than the window never produces an edge.
    pub fn sample(&mut self, raw: bool, now: Instant) -> Option<Edge> {
        if raw != self.last_raw {
            self.stable_since = now;
            self.last_raw = raw;
        }

        if now.duration_since(self.stable_since) > self.window && raw != self.stable_value {
            self.stable_value = raw;
            return Some(if raw { Edge::Rising } else { Edge::Falling });
        }

        None
    }

    /// The current committed logical value.
    #[must_use]
    pub fn stable_value(&self) -> bool {
        self.stable_value
    }

    /// When the raw reading last changed (start of the current settle window).
    #[must_use]
    pub fn stable_since(&self) -> Instant {
        self.stable_since
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(50);

    fn at(origin: Instant, ms: u64) -> Instant {
        origin + Duration::from_millis(ms)
    }

    #[test]
    fn test_steady_signal_emits_nothing() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, false, t0);

        for ms in (0..500).step_by(10) {
            assert_eq!(d.sample(false, at(t0, ms)), None);
        }
        assert!(!d.stable_value());
    }

    #[test]
    fn test_held_change_emits_exactly_one_rising_edge() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, false, t0);

        let mut edges = Vec::new();
        for ms in (0..200).step_by(10) {
            if let Some(e) = d.sample(true, at(t0, ms)) {
                edges.push((ms, e));
            }
        }

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].1, Edge::Rising);
        // Committed only after the window elapsed.
        assert!(edges[0].0 > 50);
        assert!(d.stable_value());
    }

    #[test]
    fn test_blip_within_window_is_ignored() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, false, t0);

        // High for 30ms, back to low.
        assert_eq!(d.sample(true, at(t0, 10)), None);
        assert_eq!(d.sample(true, at(t0, 30)), None);
        assert_eq!(d.sample(false, at(t0, 40)), None);

        // Stays low well past the window: still no edge.
        for ms in (50..300).step_by(10) {
            assert_eq!(d.sample(false, at(t0, ms)), None);
        }
        assert!(!d.stable_value());
    }

    #[test]
    fn test_bounce_then_settle_emits_single_edge() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, false, t0);

        // Contact bounce: rapid alternation for 20ms.
        for (ms, level) in [(0, true), (5, false), (10, true), (15, false), (20, true)] {
            assert_eq!(d.sample(level, at(t0, ms)), None);
        }

        // Then held high; window restarts from the last change at 20ms.
        assert_eq!(d.sample(true, at(t0, 60)), None); // 40ms stable, still inside
        assert_eq!(d.sample(true, at(t0, 75)), Some(Edge::Rising)); // 55ms stable
        assert_eq!(d.sample(true, at(t0, 100)), None);
    }

    #[test]
    fn test_falling_edge_after_release() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, true, t0);

        assert_eq!(d.sample(false, at(t0, 10)), None);
        assert_eq!(d.sample(false, at(t0, 70)), Some(Edge::Falling));
        assert!(!d.stable_value());
    }

    #[test]
    fn test_full_press_release_cycle() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, false, t0);

        assert_eq!(d.sample(true, at(t0, 0)), None);
        assert_eq!(d.sample(true, at(t0, 60)), Some(Edge::Rising));
        assert_eq!(d.sample(true, at(t0, 100)), None);
        assert_eq!(d.sample(false, at(t0, 120)), None);
        assert_eq!(d.sample(false, at(t0, 180)), Some(Edge::Falling));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, false, t0);

        assert_eq!(d.sample(true, at(t0, 0)), None);
        // Exactly the window: not yet past it.
        assert_eq!(d.sample(true, at(t0, 50)), None);
        assert_eq!(d.sample(true, at(t0, 51)), Some(Edge::Rising));
    }

    #[test]
    fn test_stable_since_restarts_on_change() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, false, t0);

        d.sample(true, at(t0, 10));
        assert_eq!(d.stable_since(), at(t0, 10));
        d.sample(false, at(t0, 25));
        assert_eq!(d.stable_since(), at(t0, 25));
    }
}
