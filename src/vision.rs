//! Raster primitives on `ndarray` grids used by the segmentation pipeline.
//!
//! All grids are indexed `[[row, col]]`. The pixel work is done by
//! `imageproc`; this module converts at the seam.

mod convert;
mod filter;
mod labeling;
mod morphology;
mod threshold;

pub use convert::{from_gray_image, mask_to_gray_image, to_gray_image};
pub use filter::{box_blur, box_blur_mask, lone_pixel_coverage};
pub use labeling::{ComponentStats, Labeling, label_components};
pub use morphology::{MAX_ELEMENT_SIZE, dilate, erode};
pub use threshold::otsu_threshold;
