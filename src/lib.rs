//! Perception core of a closed-loop single-object tracker.
//!
//! Each grayscale frame is segmented into dark foreground regions, the
//! regions are gated against the caller-owned [`TrackState`], and the winner
//! is reduced to a bounding box and a reported `(x, y)`. A neural point
//! detector can be plugged in as an alternative mode through
//! [`integration::PointDetector`].

pub mod integration;
pub mod tracker;
pub mod vision;

pub use integration::{DetectionMode, FrameOutput, IntoPoint, PointDetector, TrackerPipeline};
pub use tracker::{
    BoundingBox, Candidate, ObjectTracker, TrackMode, TrackResult, TrackState, TrackerConfig,
    TrackerError,
};
