//! Scroll-position observer for the insight panel.
//!
//! Each tab section reports how much of it is inside the scroll viewport.
//! A section "crosses" when its visible ratio goes from below the threshold
//! to at or above it; the last crossing seen wins the active tab.

pub const DEFAULT_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTracker {
    threshold: f64,
    visible: Vec<bool>,
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl VisibilityTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Forget previous observations, tracking `len` sections.
    pub fn reset(&mut self, len: usize) {
        self.visible = vec![false; len];
    }

    /// Feed one measurement per section. Returns the index to activate, if
    /// any section crossed in this observation (highest index on ties).
    pub fn observe(&mut self, ratios: &[f64]) -> Option<usize> {
        if ratios.len() != self.visible.len() {
            self.reset(ratios.len());
        }
        let mut winner = None;
        for (idx, ratio) in ratios.iter().enumerate() {
            let now = *ratio >= self.threshold;
            if now && !self.visible[idx] {
                winner = Some(idx);
            }
            self.visible[idx] = now;
        }
        winner
    }
}

/// Share of `section` (top, bottom) lying inside `viewport` (top, bottom).
pub fn visible_ratio(section: (f64, f64), viewport: (f64, f64)) -> f64 {
    let height = section.1 - section.0;
    if height <= 0.0 {
        return 0.0;
    }
    let top = section.0.max(viewport.0);
    let bottom = section.1.min(viewport.1);
    ((bottom - top).max(0.0) / height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_the_threshold_reports_once() {
        let mut tracker = VisibilityTracker::default();
        tracker.reset(3);
        assert_eq!(tracker.observe(&[0.9, 0.1, 0.0]), Some(0));
        assert_eq!(tracker.observe(&[0.95, 0.2, 0.0]), None);
        assert_eq!(tracker.observe(&[0.3, 0.7, 0.0]), Some(1));
    }

    #[test]
    fn simultaneous_crossings_pick_the_last_section() {
        let mut tracker = VisibilityTracker::default();
        tracker.reset(3);
        assert_eq!(tracker.observe(&[0.8, 0.6, 0.1]), Some(1));
    }

    #[test]
    fn leaving_and_reentering_reports_again() {
        let mut tracker = VisibilityTracker::default();
        tracker.reset(2);
        tracker.observe(&[1.0, 0.0]);
        tracker.observe(&[0.2, 0.9]);
        assert_eq!(tracker.observe(&[0.61, 0.4]), Some(0));
    }

    #[test]
    fn section_count_change_resubscribes() {
        let mut tracker = VisibilityTracker::default();
        tracker.reset(2);
        tracker.observe(&[1.0, 0.0]);
        assert_eq!(tracker.observe(&[1.0, 0.0, 0.0]), Some(0));
    }

    #[test]
    fn ratio_is_clamped_intersection() {
        assert_eq!(visible_ratio((0.0, 100.0), (0.0, 500.0)), 1.0);
        assert_eq!(visible_ratio((400.0, 600.0), (0.0, 500.0)), 0.5);
        assert_eq!(visible_ratio((600.0, 700.0), (0.0, 500.0)), 0.0);
        assert_eq!(visible_ratio((10.0, 10.0), (0.0, 500.0)), 0.0);
    }
}
