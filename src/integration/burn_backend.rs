//! Burn inference backend for the neural point mode.
//!
//! This module provides a `BurnPointDetector` that implements `PointDetector`
//! for running point-regression models built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use autoscope_track::integration::{BurnPointDetector, BurnPointModel};
//! use burn::backend::NdArray;
//!
//! // Implement BurnPointModel for your regression model
//! struct MyPointModel { /* ... */ }
//!
//! impl BurnPointModel<NdArray> for MyPointModel {
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> Vec<f32> {
//!         // Run inference
//!     }
//! }
//!
//! let model = MyPointModel::load("model.bin");
//! let detector = BurnPointDetector::new(model, Default::default());
//! ```

use burn::prelude::*;
use burn::tensor::Tensor;
use ndarray::ArrayView3;
use thiserror::Error;

use super::PointDetector;

/// Error type for Burn point-detection failures.
#[derive(Debug, Clone, Error)]
pub enum BurnDetectorError {
    /// Input tensor has dimensions the model does not accept.
    #[error("invalid input dimensions: expected {expected:?}, got {got:?}")]
    InvalidInputDimensions {
        expected: (usize, usize, usize),
        got: (usize, usize, usize),
    },
    /// Model output is not a single (x, y) pair.
    #[error("malformed model output: {0} values")]
    MalformedOutput(usize),
}

/// Trait for Burn-based point-regression models.
///
/// Implement this trait for your specific model architecture.
pub trait BurnPointModel<B: Backend>: Send + Sync {
    /// Run forward pass on the input tensor.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [1, 3, height, width]
    ///
    /// # Returns
    /// The flattened first output row, expected to be `[x, y]`.
    fn forward(&self, input: Tensor<B, 4>) -> Vec<f32>;

    /// Get the expected input size (channels, height, width).
    fn input_size(&self) -> (usize, usize, usize) {
        (3, 400, 400) // 512x512 frame minus a 56 pixel margin
    }

    /// Scale applied to raw intensities before inference.
    fn input_scale(&self) -> f32 {
        1.0
    }
}

/// Burn-based point detector implementing `PointDetector`.
pub struct BurnPointDetector<B: Backend, M: BurnPointModel<B>> {
    model: M,
    device: B::Device,
}

impl<B: Backend, M: BurnPointModel<B>> BurnPointDetector<B, M> {
    /// Create a new Burn point detector with the given model and device.
    pub fn new(model: M, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Convert a `[3, H, W]` view to a `[1, 3, H, W]` Burn tensor.
    pub fn preprocess(&self, input: ArrayView3<'_, f32>) -> Result<Tensor<B, 4>, BurnDetectorError> {
        let expected = self.model.input_size();
        let got = input.dim();
        if got != expected {
            return Err(BurnDetectorError::InvalidInputDimensions { expected, got });
        }

        let scale = self.model.input_scale();
        let data: Vec<f32> = input.iter().map(|&v| v * scale).collect();
        let (channels, height, width) = got;

        Ok(Tensor::<B, 1>::from_floats(data.as_slice(), &self.device)
            .reshape([1, channels, height, width]))
    }
}

impl<B: Backend, M: BurnPointModel<B>> PointDetector for BurnPointDetector<B, M> {
    type Error = BurnDetectorError;

    fn detect(&mut self, input: ArrayView3<'_, f32>) -> Result<Vec<f32>, Self::Error> {
        let tensor = self.preprocess(input)?;
        let output = self.model.forward(tensor);
        if output.len() != 2 {
            return Err(BurnDetectorError::MalformedOutput(output.len()));
        }
        Ok(output)
    }
}
