//! Normalized box filter.

use imageproc::filter::box_filter;
use ndarray::{Array2, ArrayView2};

use super::convert::{from_gray_image, mask_to_gray_image, to_gray_image};

/// Smooth an intensity grid with a `size x size` normalized box filter.
///
/// Results stay 8-bit, like the input.
pub fn box_blur(src: ArrayView2<'_, u8>, size: usize) -> Array2<u8> {
    let radius = (size / 2) as u32;
    from_gray_image(&box_filter(&to_gray_image(src), radius, radius))
}

/// Smooth a boolean mask, reporting each pixel's coverage in `[0, 1]`.
///
/// Coverage is quantized to 8 bits; any pixel with a set pixel in its window
/// comes out non-zero for the window sizes the tracker accepts.
pub fn box_blur_mask(mask: ArrayView2<'_, bool>, size: usize) -> Array2<f32> {
    let radius = (size / 2) as u32;
    let blurred = box_filter(&mask_to_gray_image(mask), radius, radius);
    from_gray_image(&blurred).mapv(|v| f32::from(v) / 255.0)
}

/// Coverage reported by [`box_blur_mask`] for a lone set pixel.
pub fn lone_pixel_coverage(size: usize) -> f32 {
    let size = size.max(1) as u32;
    ((255 / size) / size) as f32 / 255.0
}
