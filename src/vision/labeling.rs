//! 8-connected component labeling.

use image::Luma;
use imageproc::region_labelling::{Connectivity, connected_components};
use nalgebra::Point2;
use ndarray::{Array2, ArrayView2};

use super::convert::{from_gray_image, mask_to_gray_image};

/// Per-label statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Pixel count.
    pub size: usize,
    /// Mean pixel position, in (row, col) order.
    pub centroid: Point2<f64>,
}

/// Result of labeling a mask.
///
/// Label `0` holds every unset pixel. Set pixels get labels `1..`, assigned
/// in row-major order of each component's first pixel.
#[derive(Debug, Clone)]
pub struct Labeling {
    pub labels: Array2<usize>,
    /// Indexed by label; `stats[0]` describes the unset pixels.
    pub stats: Vec<ComponentStats>,
}

impl Labeling {
    /// Number of labels including the background label.
    pub fn num_labels(&self) -> usize {
        self.stats.len()
    }

    /// Boolean mask of the pixels carrying `label`.
    pub fn mask_of(&self, label: usize) -> Array2<bool> {
        self.labels.mapv(|l| l == label)
    }
}

/// Label the 8-connected components of `mask`.
pub fn label_components(mask: ArrayView2<'_, bool>) -> Labeling {
    let components =
        connected_components(&mask_to_gray_image(mask), Connectivity::Eight, Luma([0u8]));
    let labels = from_gray_image(&components).mapv(|l| l as usize);

    // (count, row sum, col sum) per label
    let num_labels = labels.iter().copied().max().unwrap_or(0) + 1;
    let mut sums = vec![(0usize, 0.0f64, 0.0f64); num_labels];
    for ((r, c), &label) in labels.indexed_iter() {
        let acc = &mut sums[label];
        acc.0 += 1;
        acc.1 += r as f64;
        acc.2 += c as f64;
    }

    let stats = sums
        .into_iter()
        .map(|(size, row_sum, col_sum)| {
            let centroid = if size > 0 {
                Point2::new(row_sum / size as f64, col_sum / size as f64)
            } else {
                Point2::origin()
            };
            ComponentStats { size, centroid }
        })
        .collect();

    Labeling { labels, stats }
}
