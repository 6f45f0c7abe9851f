//! Integration module for connecting the tracking core with its collaborators.
//!
//! This module provides the point-detector trait for neural inference
//! backends (Burn, ONNX Runtime, etc.), frame annotation, and a pipeline that
//! runs either detection mode against a caller-owned track state.

mod annotate;
mod detector;
mod pipeline;

pub use annotate::{ANNOTATION_VALUE, annotated_copy, draw_circle, draw_rectangle};
pub use detector::{IntoPoint, PointDetector};
pub use pipeline::{DetectionMode, FrameOutput, TrackerPipeline};

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnDetectorError, BurnPointDetector, BurnPointModel};
