use nalgebra::Point2;

/// Gating mode of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackMode {
    /// No positional or size prior: gate against the frame center with any
    /// size, and do not persist the match.
    #[default]
    Reacquire,
    /// Gate against the last accepted center and size, and persist every
    /// accepted match.
    Continuous,
}

/// Cross-frame record of one tracking session.
///
/// Owned by the caller and threaded through each per-frame call by mutable
/// reference. Calls against the same state must be serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackState {
    /// Current gating mode. Switched by the caller, never by the tracker.
    pub mode: TrackMode,
    /// Last accepted center in (row, col) order. Written in continuous mode only.
    pub tracked_center: Option<Point2<f64>>,
    /// Last accepted pixel count. Written in continuous mode only.
    pub tracked_size: Option<usize>,
    /// Whether a candidate passed the gate on the most recent frame.
    /// Recomputed on every call.
    pub found: bool,
    /// Last reported column coordinate.
    pub x: i32,
    /// Last reported row coordinate.
    pub y: i32,
}

impl TrackState {
    pub fn new(mode: TrackMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.mode == TrackMode::Continuous
    }

    /// Switch modes. The stored center and size survive the switch so a
    /// later return to continuous mode resumes from them.
    pub fn set_mode(&mut self, mode: TrackMode) {
        self.mode = mode;
    }

    /// Forget the stored center and size.
    pub fn clear_track(&mut self) {
        self.tracked_center = None;
        self.tracked_size = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reacquire() {
        let state = TrackState::default();
        assert_eq!(state.mode, TrackMode::Reacquire);
        assert!(!state.is_tracking());
        assert!(state.tracked_center.is_none());
    }

    #[test]
    fn test_mode_switch_keeps_track() {
        let mut state = TrackState::new(TrackMode::Continuous);
        state.tracked_center = Some(Point2::new(10.0, 20.0));
        state.tracked_size = Some(400);
        state.set_mode(TrackMode::Reacquire);
        state.set_mode(TrackMode::Continuous);
        assert_eq!(state.tracked_size, Some(400));

        state.clear_track();
        assert!(state.tracked_center.is_none());
        assert!(state.tracked_size.is_none());
    }
}
