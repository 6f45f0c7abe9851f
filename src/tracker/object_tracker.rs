//! Per-frame tracking core: segmentation, extraction, gating and box estimation.

use nalgebra::Point2;
use ndarray::ArrayView2;
use tracing::debug;

use crate::tracker::candidate::CandidateExtractor;
use crate::tracker::error::TrackerError;
use crate::tracker::frame::validate_frame;
use crate::tracker::gate::TrackGate;
use crate::tracker::rect::{BoundingBox, BoundingBoxEstimator};
use crate::tracker::segmenter::FrameSegmenter;
use crate::tracker::track_state::TrackState;
use crate::vision::{MAX_ELEMENT_SIZE, lone_pixel_coverage};

/// Minimum pixel count of a region that may be tracked.
pub const SMALLEST_TRACKING_OBJECT: usize = 200;
/// Maximum per-frame displacement (Chebyshev, in pixels) of the tracked object.
pub const CENTER_SPEED: f64 = 100.0;
/// Relative size change tolerated between frames in continuous mode.
pub const SIZE_FLUCTUATIONS: f64 = 0.25;
/// Pixels cropped from every edge before neural point estimation.
pub const NEURAL_CROP_MARGIN: usize = 56;

/// Configuration for the tracking core.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub blur_size: usize,
    pub erode_size: usize,
    pub dilate_size: usize,
    pub smallest_object: usize,
    pub size_fluctuation: f64,
    pub center_speed: f64,
    pub otsu_scale: f64,
    pub otsu_floor: f64,
    pub fallback_threshold: f64,
    pub mask_blur_size: usize,
    pub mask_epsilon: f32,
    pub crop_margin: usize,
    /// Fixed marker drawn on annotated frames, as (x, y).
    pub reference_marker: (usize, usize),
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            blur_size: 5,
            erode_size: 7,
            dilate_size: 13,
            smallest_object: SMALLEST_TRACKING_OBJECT,
            size_fluctuation: SIZE_FLUCTUATIONS,
            center_speed: CENTER_SPEED,
            otsu_scale: 1.2,
            otsu_floor: 50.0,
            fallback_threshold: 110.0,
            mask_blur_size: 5,
            mask_epsilon: 1e-4,
            crop_margin: NEURAL_CROP_MARGIN,
            reference_marker: (255, 255),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        for (name, size) in [
            ("blur_size", self.blur_size),
            ("erode_size", self.erode_size),
            ("dilate_size", self.dilate_size),
            ("mask_blur_size", self.mask_blur_size),
        ] {
            if size == 0 || size % 2 == 0 {
                return Err(TrackerError::InvalidConfig(format!(
                    "{name} must be odd and positive (got {size})"
                )));
            }
        }
        if self.smallest_object == 0 {
            return Err(TrackerError::InvalidConfig(
                "smallest_object must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.size_fluctuation) {
            return Err(TrackerError::InvalidConfig(format!(
                "size_fluctuation must be in [0, 1) (got {})",
                self.size_fluctuation
            )));
        }
        if !(self.center_speed >= 0.0) {
            return Err(TrackerError::InvalidConfig(format!(
                "center_speed must be non-negative (got {})",
                self.center_speed
            )));
        }
        for (name, size) in [("erode_size", self.erode_size), ("dilate_size", self.dilate_size)] {
            if size > MAX_ELEMENT_SIZE {
                return Err(TrackerError::InvalidConfig(format!(
                    "{name} must be at most {MAX_ELEMENT_SIZE} (got {size})"
                )));
            }
        }
        // A lone set pixel must survive the re-threshold after smoothing.
        let single_pixel = lone_pixel_coverage(self.mask_blur_size);
        if !(0.0..single_pixel).contains(&self.mask_epsilon) {
            return Err(TrackerError::InvalidConfig(format!(
                "mask_epsilon must be in [0, {single_pixel}) (got {})",
                self.mask_epsilon
            )));
        }
        Ok(())
    }
}

/// Outcome of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackResult {
    /// Whether a candidate passed the gate this frame.
    pub found: bool,
    /// Reported column; the previous value when nothing was found.
    pub x: i32,
    /// Reported row; the previous value when nothing was found.
    pub y: i32,
    pub bbox: Option<BoundingBox>,
    /// Centroid of the winning candidate in (row, col) order.
    pub centroid: Option<Point2<f64>>,
    /// Pixel count of the winning candidate.
    pub size: Option<usize>,
    /// Candidates that entered the gate.
    pub num_candidates: usize,
}

pub struct ObjectTracker {
    config: TrackerConfig,
    segmenter: FrameSegmenter,
    extractor: CandidateExtractor,
    gate: TrackGate,
    estimator: BoundingBoxEstimator,
}

impl ObjectTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            segmenter: FrameSegmenter::new(&config),
            extractor: CandidateExtractor::new(config.smallest_object),
            gate: TrackGate::new(config.center_speed, config.size_fluctuation),
            estimator: BoundingBoxEstimator::new(config.mask_blur_size, config.mask_epsilon),
            config,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn segmenter(&self) -> &FrameSegmenter {
        &self.segmenter
    }

    /// Process one frame against `state`.
    ///
    /// An invalid frame fails before `state` is touched. Otherwise
    /// `state.found` is recomputed and, on a hit, `state.x`/`state.y` are
    /// updated; continuous mode also stores the winner's center and size.
    pub fn update(
        &self,
        frame: ArrayView2<'_, u8>,
        state: &mut TrackState,
    ) -> Result<TrackResult, TrackerError> {
        validate_frame(frame)?;

        // Step 1: Foreground mask
        let mask = self.segmenter.segment(frame);

        // Step 2: Candidates
        let candidates = self.extractor.extract(mask.view());

        // Step 3: Gate against the stored track
        let winner = self.gate.gate(&candidates, frame.dim(), state);

        // Step 4: Box and reported center
        let estimate = winner.and_then(|c| self.estimator.estimate(c.mask.view()));
        if let Some(estimate) = &estimate {
            state.x = estimate.x;
            state.y = estimate.y;
        }

        debug!(
            candidates = candidates.len(),
            found = state.found,
            x = state.x,
            y = state.y,
            "processed frame"
        );

        Ok(TrackResult {
            found: state.found,
            x: state.x,
            y: state.y,
            bbox: estimate.map(|e| e.bbox),
            centroid: winner.map(|c| c.centroid),
            size: winner.map(|c| c.size),
            num_candidates: candidates.len(),
        })
    }
}
