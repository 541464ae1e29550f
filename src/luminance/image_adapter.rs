//! Luminance factories for `image` crate buffers

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use super::{GrayLuminanceSource, LuminanceFactory, LuminanceSource};
use crate::error::Result;

impl GrayLuminanceSource {
    /// Copy an 8-bit luma buffer
    pub fn from_gray_image(image: &GrayImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::new(image.as_raw().clone(), width as usize, height as usize)
    }

    /// Convert any decoded image; 8-bit luma is copied, everything else goes through RGB(A)
    pub fn from_dynamic_image(image: &DynamicImage) -> Result<Self> {
        match image {
            DynamicImage::ImageLuma8(gray) => Self::from_gray_image(gray),
            DynamicImage::ImageRgb8(rgb) => Self::from_rgb_image(rgb),
            DynamicImage::ImageRgba8(rgba) => Self::from_rgba_image(rgba),
            other => Self::from_rgba_image(&other.to_rgba8()),
        }
    }

    /// Convert an RGB buffer
    pub fn from_rgb_image(image: &RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_rgb(image.as_raw(), width as usize, height as usize)
    }

    /// Convert an RGBA buffer
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_rgba(image.as_raw(), width as usize, height as usize)
    }

    /// Open and decode an image file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(path)?;
        Self::from_dynamic_image(&image)
    }
}

/// Luminance factory for the `image` crate's buffer types
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLuminanceFactory;

impl LuminanceFactory<DynamicImage> for ImageLuminanceFactory {
    fn create_luminance_source(&self, image: &DynamicImage) -> Result<Box<dyn LuminanceSource>> {
        Ok(Box::new(GrayLuminanceSource::from_dynamic_image(image)?))
    }
}

impl LuminanceFactory<GrayImage> for ImageLuminanceFactory {
    fn create_luminance_source(&self, image: &GrayImage) -> Result<Box<dyn LuminanceSource>> {
        Ok(Box::new(GrayLuminanceSource::from_gray_image(image)?))
    }
}

impl LuminanceFactory<RgbImage> for ImageLuminanceFactory {
    fn create_luminance_source(&self, image: &RgbImage) -> Result<Box<dyn LuminanceSource>> {
        Ok(Box::new(GrayLuminanceSource::from_rgb_image(image)?))
    }
}
