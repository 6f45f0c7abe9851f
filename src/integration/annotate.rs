//! Overlay drawing on a copy of the input frame.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use ndarray::ArrayView2;

use crate::tracker::BoundingBox;
use crate::vision::to_gray_image;

/// Value written for every overlay pixel.
pub const ANNOTATION_VALUE: u8 = 255;

/// Draw the outline of `bbox`, `thickness` pixels wide, growing inward.
pub fn draw_rectangle(img: &mut GrayImage, bbox: &BoundingBox, thickness: usize) {
    for inset in 0..thickness.max(1) {
        let (w, h) = (bbox.width(), bbox.height());
        if w <= 2 * inset || h <= 2 * inset {
            break;
        }
        let rect = Rect::at((bbox.col_min + inset) as i32, (bbox.row_min + inset) as i32)
            .of_size((w - 2 * inset) as u32, (h - 2 * inset) as u32);
        draw_hollow_rect_mut(img, rect, Luma([ANNOTATION_VALUE]));
    }
}

/// Draw a ring of `radius` around `(x, y)`, `thickness` pixels wide,
/// growing outward. Parts falling outside the image are clipped.
pub fn draw_circle(img: &mut GrayImage, center: (i32, i32), radius: i32, thickness: usize) {
    for ring in 0..thickness.max(1) as i32 {
        draw_hollow_circle_mut(img, center, radius + ring, Luma([ANNOTATION_VALUE]));
    }
}

/// Copy `frame` and draw the fixed reference marker on it.
///
/// The copy is made before anything else so callers always get a frame back.
pub fn annotated_copy(frame: ArrayView2<'_, u8>, marker: (usize, usize)) -> GrayImage {
    let mut img = to_gray_image(frame);
    draw_circle(&mut img, (marker.0 as i32, marker.1 as i32), 2, 2);
    img
}
