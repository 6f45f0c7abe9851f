//! Binary erosion and dilation with square structuring elements.
//!
//! Pixels outside the grid count as neither set nor unset: the border
//! neither erodes nor grows a region.

use imageproc::distance_transform::Norm;
use imageproc::morphology;
use ndarray::{Array2, ArrayView2};

use super::convert::{from_gray_image, mask_to_gray_image};

/// Largest odd element side the chessboard-distance radius can express.
pub const MAX_ELEMENT_SIZE: usize = 2 * u8::MAX as usize + 1;

/// Erode `mask` with a `size x size` all-ones element.
pub fn erode(mask: ArrayView2<'_, bool>, size: usize) -> Array2<bool> {
    if size <= 1 {
        return mask.to_owned();
    }
    let eroded = morphology::erode(&mask_to_gray_image(mask), Norm::LInf, radius(size));
    from_gray_image(&eroded).mapv(|v| v > 0)
}

/// Dilate `mask` with a `size x size` all-ones element.
pub fn dilate(mask: ArrayView2<'_, bool>, size: usize) -> Array2<bool> {
    if size <= 1 {
        return mask.to_owned();
    }
    let dilated = morphology::dilate(&mask_to_gray_image(mask), Norm::LInf, radius(size));
    from_gray_image(&dilated).mapv(|v| v > 0)
}

// An L-infinity ball of radius k is the (2k + 1) square.
fn radius(size: usize) -> u8 {
    (size.min(MAX_ELEMENT_SIZE) / 2) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(n: usize, top: usize, left: usize, side: usize) -> Array2<bool> {
        Array2::from_shape_fn((n, n), |(r, c)| {
            (top..top + side).contains(&r) && (left..left + side).contains(&c)
        })
    }

    fn count(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&v| v).count()
    }

    #[test]
    fn test_erode_shrinks_square() {
        let mask = square(30, 5, 5, 11);
        let eroded = erode(mask.view(), 7);
        // 11 - 2 * 3 = 5
        assert_eq!(count(&eroded), 25);
        assert!(eroded[[10, 10]]);
        assert!(!eroded[[7, 10]]);
    }

    #[test]
    fn test_erode_removes_speckle() {
        let mut mask = Array2::from_elem((20, 20), false);
        mask[[10, 10]] = true;
        mask[[3, 4]] = true;
        assert_eq!(count(&erode(mask.view(), 7)), 0);
    }

    #[test]
    fn test_dilate_grows_square() {
        let mask = square(40, 15, 15, 5);
        let dilated = dilate(mask.view(), 13);
        // 5 + 2 * 6 = 17
        assert_eq!(count(&dilated), 17 * 17);
    }

    #[test]
    fn test_border_does_not_erode() {
        let mask = Array2::from_elem((10, 10), true);
        assert_eq!(count(&erode(mask.view(), 7)), 100);
    }

    #[test]
    fn test_dilate_clips_at_border() {
        let mut mask = Array2::from_elem((10, 10), false);
        mask[[0, 0]] = true;
        // rows and cols 0..=6
        assert_eq!(count(&dilate(mask.view(), 13)), 49);
    }
}
