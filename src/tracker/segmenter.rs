//! Foreground segmentation of a raw intensity frame.

use ndarray::{Array2, ArrayView2};
use tracing::trace;

use crate::tracker::TrackerConfig;
use crate::tracker::frame::Mask;
use crate::vision::{box_blur, dilate, erode, label_components, otsu_threshold};

/// Turns a frame into a cleaned foreground mask of dark objects.
#[derive(Debug, Clone)]
pub struct FrameSegmenter {
    blur_size: usize,
    erode_size: usize,
    dilate_size: usize,
    smallest_object: usize,
    otsu_scale: f64,
    otsu_floor: f64,
    fallback_threshold: f64,
}

impl FrameSegmenter {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            blur_size: config.blur_size,
            erode_size: config.erode_size,
            dilate_size: config.dilate_size,
            smallest_object: config.smallest_object,
            otsu_scale: config.otsu_scale,
            otsu_floor: config.otsu_floor,
            fallback_threshold: config.fallback_threshold,
        }
    }

    /// Brightness threshold for `frame`, or `None` when the frame has no
    /// contrast at all.
    ///
    /// Otsu is computed on the raw frame. Below `otsu_floor` it is not
    /// trusted and the fixed fallback is used.
    pub fn threshold(&self, frame: ArrayView2<'_, u8>) -> Option<f64> {
        let otsu = otsu_threshold(frame)?;
        let threshold = if otsu > self.otsu_floor {
            self.otsu_scale * otsu
        } else {
            self.fallback_threshold
        };
        trace!(otsu, threshold, "segmentation threshold");
        Some(threshold)
    }

    /// Segment `frame` into a foreground mask.
    ///
    /// A frame without contrast yields an all-false mask.
    pub fn segment(&self, frame: ArrayView2<'_, u8>) -> Mask {
        let Some(threshold) = self.threshold(frame) else {
            return Array2::from_elem(frame.raw_dim(), false);
        };

        let smoothed = box_blur(frame, self.blur_size);
        let raw = smoothed.mapv(|v| f64::from(v) < threshold);
        let eroded = erode(raw.view(), self.erode_size);
        let cleaned = dilate(eroded.view(), self.dilate_size);

        let labeling = label_components(cleaned.view());
        let keep: Vec<bool> = labeling
            .stats
            .iter()
            .enumerate()
            .map(|(label, stats)| label != 0 && stats.size >= self.smallest_object)
            .collect();

        trace!(
            components = labeling.num_labels() - 1,
            kept = keep.iter().filter(|&&k| k).count(),
            "segmented frame"
        );

        labeling.labels.mapv(|label| keep[label])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_square(n: usize, top: usize, left: usize, side: usize) -> Array2<u8> {
        Array2::from_shape_fn((n, n), |(r, c)| {
            let inside = (top..top + side).contains(&r) && (left..left + side).contains(&c);
            if inside { 20 } else { 200 }
        })
    }

    fn count(mask: &Mask) -> usize {
        mask.iter().filter(|&&v| v).count()
    }

    #[test]
    fn test_threshold_scales_otsu() {
        let segmenter = FrameSegmenter::new(&TrackerConfig::default());
        let frame = Array2::from_shape_fn((10, 10), |(r, _)| if r < 5 { 100u8 } else { 220 });
        // Otsu picks the lower level for a two-level frame.
        assert_eq!(segmenter.threshold(frame.view()), Some(1.2 * 100.0));
    }

    #[test]
    fn test_threshold_falls_back_on_dark_frames() {
        let segmenter = FrameSegmenter::new(&TrackerConfig::default());
        let frame = Array2::from_shape_fn((10, 10), |(r, _)| if r < 5 { 10u8 } else { 40 });
        assert_eq!(segmenter.threshold(frame.view()), Some(110.0));
    }

    #[test]
    fn test_uniform_frame_is_background() {
        let segmenter = FrameSegmenter::new(&TrackerConfig::default());
        let frame = Array2::from_elem((64, 64), 90u8);
        assert_eq!(count(&segmenter.segment(frame.view())), 0);
    }

    #[test]
    fn test_dark_square_is_foreground_and_regrown() {
        let segmenter = FrameSegmenter::new(&TrackerConfig::default());
        let frame = frame_with_square(128, 40, 40, 30);
        let mask = segmenter.segment(frame.view());
        assert!(mask[[55, 55]]);
        assert!(!mask[[5, 5]]);
        // the larger dilation grows the region past its original extent
        assert!(count(&mask) > 30 * 30);
    }

    #[test]
    fn test_small_blob_is_dropped() {
        let segmenter = FrameSegmenter::new(&TrackerConfig::default());
        let frame = frame_with_square(128, 60, 60, 6);
        assert_eq!(count(&segmenter.segment(frame.view())), 0);
    }
}
