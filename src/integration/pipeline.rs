//! TrackerPipeline for running either detection mode on a frame.

use ndarray::{Array2, Array3, ArrayView2, ArrayViewD, s};
use tracing::{debug, warn};

use crate::tracker::{
    ObjectTracker, TrackResult, TrackState, TrackerConfig, TrackerError, frame_from_dyn,
    validate_frame,
};
use crate::vision::from_gray_image;

use super::annotate::{annotated_copy, draw_circle, draw_rectangle};
use super::{IntoPoint, PointDetector};

/// How a frame is turned into coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionMode {
    /// Segment, gate against the track state and estimate a box.
    #[default]
    Segmentation,
    /// Ask the injected point detector for the object position.
    Neural,
}

/// Result of one pipeline call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub result: TrackResult,
    /// Copy of the input frame with the overlays drawn on it.
    pub annotated: Array2<u8>,
}

/// Bundles the tracking core with an optional neural point detector.
///
/// The track state stays with the caller and is passed into every call.
pub struct TrackerPipeline<D: PointDetector> {
    tracker: ObjectTracker,
    detector: Option<D>,
}

impl<D: PointDetector> TrackerPipeline<D> {
    /// Create a pipeline that can run both modes.
    pub fn new(tracker: ObjectTracker, detector: D) -> Self {
        Self {
            tracker,
            detector: Some(detector),
        }
    }

    /// Create a pipeline without a point detector; neural calls fail.
    pub fn segmentation_only(tracker: ObjectTracker) -> Self {
        Self {
            tracker,
            detector: None,
        }
    }

    /// Create a pipeline with the default tracker configuration.
    pub fn with_default_config(detector: D) -> Result<Self, TrackerError> {
        Ok(Self::new(ObjectTracker::new(TrackerConfig::default())?, detector))
    }

    /// Process a single frame in `mode`.
    ///
    /// Fails without touching `state` when the frame is invalid or the
    /// point detector errors.
    pub fn process_frame(
        &mut self,
        frame: ArrayView2<'_, u8>,
        mode: DetectionMode,
        state: &mut TrackState,
    ) -> Result<FrameOutput, TrackerError> {
        match mode {
            DetectionMode::Segmentation => self.process_segmentation(frame, state),
            DetectionMode::Neural => self.process_neural(frame, state),
        }
    }

    /// Process a frame held in a dynamic-rank buffer.
    ///
    /// Accepts `[h, w]` and `[h, w, 1]`; any other shape is an
    /// `InvalidFrame` error and leaves `state` untouched.
    pub fn process_dyn_frame(
        &mut self,
        frame: ArrayViewD<'_, u8>,
        mode: DetectionMode,
        state: &mut TrackState,
    ) -> Result<FrameOutput, TrackerError> {
        let frame = frame_from_dyn(frame)?;
        self.process_frame(frame, mode, state)
    }

    fn process_segmentation(
        &self,
        frame: ArrayView2<'_, u8>,
        state: &mut TrackState,
    ) -> Result<FrameOutput, TrackerError> {
        let result = self.tracker.update(frame, state)?;

        let mut annotated = annotated_copy(frame, self.tracker.config().reference_marker);
        if let Some(bbox) = &result.bbox {
            draw_rectangle(&mut annotated, bbox, 2);
        }

        Ok(FrameOutput {
            result,
            annotated: from_gray_image(&annotated),
        })
    }

    fn process_neural(
        &mut self,
        frame: ArrayView2<'_, u8>,
        state: &mut TrackState,
    ) -> Result<FrameOutput, TrackerError> {
        validate_frame(frame)?;
        let margin = self.tracker.config().crop_margin;
        let (ny, nx) = frame.dim();
        if ny <= 2 * margin || nx <= 2 * margin {
            return Err(TrackerError::InvalidFrame(format!(
                "frame {ny}x{nx} is too small for a {margin} pixel crop margin"
            )));
        }

        let detector = self.detector.as_mut().ok_or_else(|| {
            TrackerError::DetectionBackend("no point detector configured".to_string())
        })?;

        let cropped = frame.slice(s![margin..ny - margin, margin..nx - margin]);
        let input = Array3::from_shape_fn((3, ny - 2 * margin, nx - 2 * margin), |(_, r, c)| {
            f32::from(cropped[[r, c]])
        });

        let raw = detector.detect(input.view()).map_err(|e| {
            warn!(error = %e, "point detector failed");
            TrackerError::DetectionBackend(e.to_string())
        })?;
        let len = raw.len();
        let (px, py) = raw.into_point().ok_or_else(|| {
            TrackerError::DetectionBackend(format!(
                "expected one finite (x, y) pair, got {len} values"
            ))
        })?;

        let x = to_frame_coordinate(px, nx - 2 * margin, margin);
        let y = to_frame_coordinate(py, ny - 2 * margin, margin);
        let (Some(x), Some(y)) = (x, y) else {
            return Err(TrackerError::DetectionBackend(format!(
                "point ({px}, {py}) lies outside the {}x{} crop",
                nx - 2 * margin,
                ny - 2 * margin
            )));
        };

        state.found = true;
        state.x = x;
        state.y = y;
        debug!(x, y, "neural point estimate");

        let mut annotated = annotated_copy(frame, self.tracker.config().reference_marker);
        draw_circle(&mut annotated, (x, y), 10, 2);

        Ok(FrameOutput {
            result: TrackResult {
                found: true,
                x: state.x,
                y: state.y,
                bbox: None,
                centroid: None,
                size: None,
                num_candidates: 0,
            },
            annotated: from_gray_image(&annotated),
        })
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> Option<&D> {
        self.detector.as_ref()
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> Option<&mut D> {
        self.detector.as_mut()
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }
}

/// Truncate a crop coordinate toward zero and shift it into the full frame.
///
/// `None` when the point falls outside `[0, extent)`.
fn to_frame_coordinate(v: f32, extent: usize, margin: usize) -> Option<i32> {
    let v = v.trunc();
    if !(0.0..extent as f32).contains(&v) {
        return None;
    }
    i32::try_from(v as usize + margin).ok()
}
