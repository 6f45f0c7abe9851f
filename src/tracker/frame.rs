//! Frame and mask grids, and input validation.

use ndarray::{Array2, ArrayView2, ArrayViewD, Ix2};

use crate::tracker::error::TrackerError;

/// Single-channel 8-bit intensity grid, `ny x nx`.
pub type Frame = Array2<u8>;

/// Boolean grid with the dimensions of its source frame.
pub type Mask = Array2<bool>;

/// Check that `frame` has a non-zero area.
pub fn validate_frame(frame: ArrayView2<'_, u8>) -> Result<(), TrackerError> {
    let (ny, nx) = frame.dim();
    if ny == 0 || nx == 0 {
        return Err(TrackerError::InvalidFrame(format!(
            "frame has zero area ({ny}x{nx})"
        )));
    }
    Ok(())
}

/// View an arbitrary-rank array as a frame.
///
/// Rank-3 arrays with a single trailing channel are accepted as well, since
/// cameras often hand out `[h, w, 1]` buffers. Used by
/// `TrackerPipeline::process_dyn_frame`.
pub fn frame_from_dyn(frame: ArrayViewD<'_, u8>) -> Result<ArrayView2<'_, u8>, TrackerError> {
    let shape = frame.shape().to_vec();
    let view = match shape.as_slice() {
        [_, _] => frame.into_dimensionality::<Ix2>(),
        [ny, nx, 1] => frame.into_shape_with_order((*ny, *nx)),
        _ => {
            return Err(TrackerError::InvalidFrame(format!(
                "expected a single-channel 2-D frame, got shape {shape:?}"
            )));
        }
    }
    .map_err(|e| TrackerError::InvalidFrame(e.to_string()))?;

    validate_frame(view)?;
    Ok(view)
}
