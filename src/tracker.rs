mod candidate;
mod error;
mod frame;
mod gate;
mod object_tracker;
mod rect;
mod segmenter;
mod track_state;

pub use candidate::{Candidate, CandidateExtractor};
pub use error::TrackerError;
pub use frame::{Frame, Mask, frame_from_dyn, validate_frame};
pub use gate::{TrackGate, chebyshev};
pub use object_tracker::{
    CENTER_SPEED, NEURAL_CROP_MARGIN, ObjectTracker, SIZE_FLUCTUATIONS,
    SMALLEST_TRACKING_OBJECT, TrackResult, TrackerConfig,
};
pub use rect::{BoundingBox, BoundingBoxEstimator, BoxEstimate};
pub use segmenter::FrameSegmenter;
pub use track_state::{TrackMode, TrackState};
