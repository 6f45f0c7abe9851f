//! Otsu's global threshold.

use imageproc::contrast::otsu_level;
use ndarray::ArrayView2;

use super::convert::to_gray_image;

/// Compute Otsu's threshold for an 8-bit grid.
///
/// Samples `<= threshold` form the lower class. Returns `None` when the grid
/// is empty or has a single intensity, since no split exists.
pub fn otsu_threshold(src: ArrayView2<'_, u8>) -> Option<f64> {
    let lo = src.iter().min()?;
    let hi = src.iter().max()?;
    if lo == hi {
        return None;
    }
    Some(f64::from(otsu_level(&to_gray_image(src))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_bimodal_split() {
        let frame = Array2::from_shape_fn((20, 20), |(r, _)| if r < 10 { 40u8 } else { 200 });
        let t = otsu_threshold(frame.view()).unwrap();
        assert!((40.0..200.0).contains(&t));
    }

    #[test]
    fn test_uniform_has_no_threshold() {
        let frame = Array2::from_elem((8, 8), 123u8);
        assert_eq!(otsu_threshold(frame.view()), None);
    }

    #[test]
    fn test_empty_has_no_threshold() {
        let frame = Array2::<u8>::zeros((0, 4));
        assert_eq!(otsu_threshold(frame.view()), None);
    }

    #[test]
    fn test_two_levels_pick_lower() {
        let frame = Array2::from_shape_fn((4, 4), |(_, c)| if c < 2 { 10u8 } else { 20 });
        assert_eq!(otsu_threshold(frame.view()), Some(10.0));
    }
}
