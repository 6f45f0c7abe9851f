use ndarray::ArrayView2;

use crate::vision::box_blur_mask;

/// Axis-aligned pixel bounding box with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    /// Topmost row
    pub row_min: usize,
    /// Bottommost row
    pub row_max: usize,
    /// Leftmost column
    pub col_min: usize,
    /// Rightmost column
    pub col_max: usize,
}

impl BoundingBox {
    #[inline]
    pub fn new(row_min: usize, row_max: usize, col_min: usize, col_max: usize) -> Self {
        Self {
            row_min,
            row_max,
            col_min,
            col_max,
        }
    }

    /// Tightest box around the set pixels of `mask`, or `None` if none are set.
    pub fn from_mask(mask: ArrayView2<'_, bool>) -> Option<Self> {
        let mut bbox: Option<Self> = None;
        for ((r, c), &set) in mask.indexed_iter() {
            if !set {
                continue;
            }
            bbox = Some(match bbox {
                None => Self::new(r, r, c, c),
                Some(b) => Self::new(
                    b.row_min.min(r),
                    b.row_max.max(r),
                    b.col_min.min(c),
                    b.col_max.max(c),
                ),
            });
        }
        bbox
    }

    /// Convert to (x1, y1, x2, y2) in image coordinates.
    #[inline]
    pub fn to_tlbr(&self) -> [usize; 4] {
        [self.col_min, self.row_min, self.col_max, self.row_max]
    }

    /// Midpoint of the box as (x, y), rounded down.
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        (
            (self.col_min + self.col_max) / 2,
            (self.row_min + self.row_max) / 2,
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.col_max - self.col_min + 1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.row_max - self.row_min + 1
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_min..=self.row_max).contains(&row) && (self.col_min..=self.col_max).contains(&col)
    }
}

/// Reported position of the winning candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxEstimate {
    pub x: i32,
    pub y: i32,
    pub bbox: BoundingBox,
}

/// Turns a winning mask into a bounding box and reported center.
#[derive(Debug, Clone)]
pub struct BoundingBoxEstimator {
    blur_size: usize,
    epsilon: f32,
}

impl BoundingBoxEstimator {
    pub fn new(blur_size: usize, epsilon: f32) -> Self {
        Self { blur_size, epsilon }
    }

    /// Soften the mask boundary, then report the box midpoint.
    ///
    /// The midpoint is used instead of the mass centroid so a lopsided mask
    /// does not drag the reported point. Returns `None` if nothing survives
    /// the re-threshold.
    pub fn estimate(&self, mask: ArrayView2<'_, bool>) -> Option<BoxEstimate> {
        let softened = box_blur_mask(mask, self.blur_size).mapv(|v| v > self.epsilon);
        let bbox = BoundingBox::from_mask(softened.view())?;
        let (x, y) = bbox.center();
        Some(BoxEstimate {
            x: x as i32,
            y: y as i32,
            bbox,
        })
    }
}
