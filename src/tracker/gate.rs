//! Distance and size gating of candidates against the tracked object.

use nalgebra::Point2;
use tracing::debug;

use crate::tracker::candidate::Candidate;
use crate::tracker::track_state::{TrackMode, TrackState};

/// Chebyshev distance: the larger of the per-axis absolute differences.
pub fn chebyshev(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a - b).amax()
}

/// Selects at most one candidate as the tracked object.
#[derive(Debug, Clone)]
pub struct TrackGate {
    center_speed: f64,
    size_fluctuation: f64,
}

impl TrackGate {
    pub fn new(center_speed: f64, size_fluctuation: f64) -> Self {
        Self {
            center_speed,
            size_fluctuation,
        }
    }

    /// Center the candidates are measured against.
    ///
    /// The stored center in continuous mode, the frame center otherwise.
    pub fn reference(&self, state: &TrackState, frame_dim: (usize, usize)) -> Point2<f64> {
        match (state.mode, state.tracked_center) {
            (TrackMode::Continuous, Some(center)) => center,
            _ => Point2::new(frame_dim.0 as f64 / 2.0, frame_dim.1 as f64 / 2.0),
        }
    }

    /// Inclusive size window, or `None` when any size is accepted.
    pub fn size_bounds(&self, state: &TrackState) -> Option<(f64, f64)> {
        match (state.mode, state.tracked_size) {
            (TrackMode::Continuous, Some(size)) => {
                let size = size as f64;
                Some((
                    size * (1.0 - self.size_fluctuation),
                    size * (1.0 + self.size_fluctuation),
                ))
            }
            _ => None,
        }
    }

    /// Pick the closest candidate that passes both gates.
    ///
    /// Ties go to the earliest candidate in `candidates`. Sets `state.found`
    /// on every call; in continuous mode a winner also overwrites the stored
    /// center and size.
    pub fn gate<'a>(
        &self,
        candidates: &'a [Candidate],
        frame_dim: (usize, usize),
        state: &mut TrackState,
    ) -> Option<&'a Candidate> {
        let reference = self.reference(state, frame_dim);
        let bounds = self.size_bounds(state);

        let mut winner: Option<(&Candidate, f64)> = None;
        for candidate in candidates {
            let d = chebyshev(&candidate.centroid, &reference);
            if d > self.center_speed {
                continue;
            }
            if let Some((lower, upper)) = bounds {
                let size = candidate.size as f64;
                if size < lower || size > upper {
                    continue;
                }
            }
            if winner.is_none_or(|(_, best)| d < best) {
                winner = Some((candidate, d));
            }
        }

        state.found = winner.is_some();
        if let Some((candidate, d)) = winner {
            if state.is_tracking() {
                state.tracked_center = Some(candidate.centroid);
                state.tracked_size = Some(candidate.size);
            }
            debug!(label = candidate.label, distance = d, size = candidate.size, "gate accepted");
        } else {
            debug!(candidates = candidates.len(), "gate rejected all candidates");
        }

        winner.map(|(candidate, _)| candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn candidate(label: usize, row: f64, col: f64, size: usize) -> Candidate {
        Candidate {
            label,
            mask: Array2::from_elem((1, 1), true),
            centroid: Point2::new(row, col),
            size,
        }
    }

    fn tracking(center: (f64, f64), size: usize) -> TrackState {
        TrackState {
            tracked_center: Some(Point2::new(center.0, center.1)),
            tracked_size: Some(size),
            ..TrackState::new(TrackMode::Continuous)
        }
    }

    #[test]
    fn test_chebyshev() {
        let d = chebyshev(&Point2::new(3.0, -4.0), &Point2::new(0.0, 0.0));
        assert_eq!(d, 4.0);
    }

    #[test]
    fn test_reacquire_uses_frame_center() {
        let gate = TrackGate::new(100.0, 0.25);
        let mut state = TrackState {
            tracked_center: Some(Point2::new(10.0, 10.0)),
            tracked_size: Some(1000),
            ..TrackState::default()
        };
        assert_eq!(gate.reference(&state, (512, 256)), Point2::new(256.0, 128.0));
        assert_eq!(gate.size_bounds(&state), None);

        let candidates = [candidate(1, 250.0, 130.0, 5)];
        assert!(gate.gate(&candidates, (512, 256), &mut state).is_some());
        assert!(state.found);
        // reacquire mode never persists
        assert_eq!(state.tracked_size, Some(1000));
        assert_eq!(state.tracked_center, Some(Point2::new(10.0, 10.0)));
    }

    #[test]
    fn test_distance_boundary() {
        let gate = TrackGate::new(100.0, 0.25);
        let mut state = TrackState::default();
        let at_limit = [candidate(1, 150.0, 50.0, 300)];
        assert!(gate.gate(&at_limit, (100, 100), &mut state).is_some());

        let past_limit = [candidate(1, 151.0, 50.0, 300)];
        assert!(gate.gate(&past_limit, (100, 100), &mut state).is_none());
        assert!(!state.found);
    }

    #[test]
    fn test_size_boundary() {
        let gate = TrackGate::new(100.0, 0.25);
        for (size, accepted) in [(750, true), (1250, true), (749, false), (1251, false)] {
            let mut state = tracking((50.0, 50.0), 1000);
            let candidates = [candidate(1, 50.0, 50.0, size)];
            let winner = gate.gate(&candidates, (100, 100), &mut state);
            assert_eq!(winner.is_some(), accepted, "size {size}");
        }
    }

    #[test]
    fn test_closest_wins_and_persists() {
        let gate = TrackGate::new(100.0, 0.25);
        let mut state = tracking((100.0, 100.0), 1000);
        let candidates = [
            candidate(1, 130.0, 100.0, 1000),
            candidate(2, 105.0, 98.0, 1100),
            candidate(3, 400.0, 400.0, 1000),
        ];
        let winner = gate.gate(&candidates, (512, 512), &mut state).unwrap();
        assert_eq!(winner.label, 2);
        assert_eq!(state.tracked_center, Some(Point2::new(105.0, 98.0)));
        assert_eq!(state.tracked_size, Some(1100));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let gate = TrackGate::new(100.0, 0.25);
        let candidates = [candidate(1, 60.0, 50.0, 300), candidate(2, 40.0, 50.0, 300)];
        for _ in 0..3 {
            let mut state = TrackState::default();
            let winner = gate.gate(&candidates, (100, 100), &mut state).unwrap();
            assert_eq!(winner.label, 1);
        }
    }

    #[test]
    fn test_miss_keeps_track() {
        let gate = TrackGate::new(100.0, 0.25);
        let mut state = tracking((100.0, 100.0), 1000);
        state.found = true;
        assert!(gate.gate(&[], (512, 512), &mut state).is_none());
        assert!(!state.found);
        assert_eq!(state.tracked_center, Some(Point2::new(100.0, 100.0)));
        assert_eq!(state.tracked_size, Some(1000));
    }
}
