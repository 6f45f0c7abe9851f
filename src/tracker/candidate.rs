//! Candidate extraction from a foreground mask.

use std::collections::HashSet;

use nalgebra::Point2;
use ndarray::{ArrayView2, Zip};

use crate::tracker::frame::Mask;
use crate::vision::label_components;

/// A connected foreground region that may be the tracked object.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Label assigned during extraction; candidates are ordered by it.
    pub label: usize,
    /// Pixels of this region, same dimensions as the frame.
    pub mask: Mask,
    /// Mean pixel position in (row, col) order.
    pub centroid: Point2<f64>,
    /// Pixel count.
    pub size: usize,
}

/// Splits a mask into size-filtered candidates.
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    smallest_object: usize,
}

impl CandidateExtractor {
    pub fn new(smallest_object: usize) -> Self {
        Self { smallest_object }
    }

    /// Extract candidates in ascending label order.
    ///
    /// Any label seen on an unset pixel counts as background and is skipped,
    /// along with components smaller than `smallest_object`.
    pub fn extract(&self, mask: ArrayView2<'_, bool>) -> Vec<Candidate> {
        let labeling = label_components(mask);

        let mut background = HashSet::new();
        Zip::from(&labeling.labels).and(mask).for_each(|&label, &set| {
            if !set {
                background.insert(label);
            }
        });

        labeling
            .stats
            .iter()
            .enumerate()
            .filter(|(label, stats)| {
                !background.contains(label) && stats.size > 0 && stats.size >= self.smallest_object
            })
            .map(|(label, stats)| Candidate {
                label,
                mask: labeling.mask_of(label),
                centroid: stats.centroid,
                size: stats.size,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn mask_with_squares(n: usize, squares: &[(usize, usize, usize)]) -> Mask {
        Array2::from_shape_fn((n, n), |(r, c)| {
            squares.iter().any(|&(top, left, side)| {
                (top..top + side).contains(&r) && (left..left + side).contains(&c)
            })
        })
    }

    #[test]
    fn test_extracts_large_components() {
        let mask = mask_with_squares(100, &[(10, 10, 20), (60, 60, 10)]);
        let candidates = CandidateExtractor::new(200).extract(mask.view());
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.size, 400);
        assert_eq!(c.centroid, Point2::new(19.5, 19.5));
        assert_eq!(c.mask.iter().filter(|&&v| v).count(), 400);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mask = mask_with_squares(50, &[(5, 5, 10), (30, 30, 10)]);
        assert_eq!(CandidateExtractor::new(100).extract(mask.view()).len(), 2);
        assert_eq!(CandidateExtractor::new(101).extract(mask.view()).len(), 0);
    }

    #[test]
    fn test_ordered_by_label() {
        let mask = mask_with_squares(100, &[(60, 5, 20), (5, 60, 20)]);
        let candidates = CandidateExtractor::new(200).extract(mask.view());
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].label < candidates[1].label);
        // (5, 60) comes first in row-major order
        assert!(candidates[0].centroid[0] < candidates[1].centroid[0]);
    }

    #[test]
    fn test_empty_mask_has_no_candidates() {
        let mask = Array2::from_elem((32, 32), false);
        assert!(CandidateExtractor::new(1).extract(mask.view()).is_empty());
    }

    #[test]
    fn test_full_mask_is_one_candidate() {
        let mask = Array2::from_elem((20, 20), true);
        let candidates = CandidateExtractor::new(200).extract(mask.view());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].size, 400);
    }
}
