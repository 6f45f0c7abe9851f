//! Conversions between `ndarray` grids and `image` buffers.

use image::{GrayImage, ImageBuffer, Luma};
use ndarray::{Array2, ArrayView2};

/// Copy an intensity grid into a `GrayImage` (`x` = column, `y` = row).
pub fn to_gray_image(src: ArrayView2<'_, u8>) -> GrayImage {
    let (ny, nx) = src.dim();
    GrayImage::from_fn(nx as u32, ny as u32, |x, y| {
        Luma([src[[y as usize, x as usize]]])
    })
}

/// Copy a mask into a `GrayImage`, set pixels as 255.
pub fn mask_to_gray_image(mask: ArrayView2<'_, bool>) -> GrayImage {
    let (ny, nx) = mask.dim();
    GrayImage::from_fn(nx as u32, ny as u32, |x, y| {
        Luma([if mask[[y as usize, x as usize]] { 255 } else { 0 }])
    })
}

/// Copy a single-channel buffer back into a grid.
pub fn from_gray_image<T>(img: &ImageBuffer<Luma<T>, Vec<T>>) -> Array2<T>
where
    T: image::Primitive,
{
    let (nx, ny) = img.dimensions();
    Array2::from_shape_fn((ny as usize, nx as usize), |(r, c)| {
        img.get_pixel(c as u32, r as u32)[0]
    })
}
