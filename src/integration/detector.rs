//! Trait for neural point-estimation backends.

use ndarray::ArrayView3;

/// Trait for inference backends that regress a single point from a frame.
///
/// Implement this trait to plug a pre-loaded model into the neural mode of
/// [`TrackerPipeline`](super::TrackerPipeline). Model loading and device
/// management stay on the implementor's side.
///
/// # Example
///
/// ```ignore
/// use autoscope_track::PointDetector;
/// use ndarray::ArrayView3;
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl PointDetector for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: ArrayView3<'_, f32>) -> Result<Vec<f32>, Self::Error> {
///         // Run inference and return the raw (x, y) output
///         Ok(vec![200.0, 200.0])
///     }
/// }
/// ```
pub trait PointDetector {
    /// Error type for detection failures.
    type Error: std::fmt::Display;

    /// Run inference on a cropped frame.
    ///
    /// # Arguments
    /// * `input` - Intensities of shape `[3, height, width]`, the single
    ///   channel replicated three times.
    ///
    /// # Returns
    /// The raw model output. A well-formed output is exactly one `(x, y)`
    /// pair in cropped-frame coordinates; see [`IntoPoint`].
    fn detect(&mut self, input: ArrayView3<'_, f32>) -> Result<Vec<f32>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to an `(x, y)` point.
///
/// Returns `None` when the output is not exactly one finite pair.
pub trait IntoPoint {
    fn into_point(self) -> Option<(f32, f32)>;
}

impl IntoPoint for Vec<f32> {
    fn into_point(self) -> Option<(f32, f32)> {
        self.as_slice().into_point()
    }
}

impl IntoPoint for &[f32] {
    fn into_point(self) -> Option<(f32, f32)> {
        match *self {
            [x, y] => (x, y).into_point(),
            _ => None,
        }
    }
}

impl IntoPoint for (f32, f32) {
    fn into_point(self) -> Option<(f32, f32)> {
        (self.0.is_finite() && self.1.is_finite()).then_some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_point() {
        assert_eq!(vec![3.0, 4.5].into_point(), Some((3.0, 4.5)));
        assert_eq!(vec![3.0].into_point(), None);
        assert_eq!(vec![1.0, 2.0, 3.0].into_point(), None);
        assert_eq!((f32::NAN, 1.0).into_point(), None);
    }
}
