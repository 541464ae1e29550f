//! Luminance sources
//!
//! A [`LuminanceSource`] is the orchestrator's only view of an image: 8-bit
//! grayscale intensities plus optional rotate/crop capabilities. Callers plug
//! their own image type in through a [`LuminanceFactory`].
//!
//! - [`GrayLuminanceSource`]: owned grayscale buffer, rotatable and croppable
//! - [`convert`]: RGB/RGBA to luma conversion
//! - [`image_adapter`]: factories for `image` crate buffers

use std::borrow::Cow;

use crate::error::{BarcodeError, Result};

pub mod convert;
pub mod gray;
pub mod image_adapter;

pub use gray::GrayLuminanceSource;
pub use image_adapter::ImageLuminanceFactory;

/// Grayscale intensity access for an image
///
/// Implementations are immutable: rotation and cropping return new sources.
pub trait LuminanceSource: Send + Sync {
    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// Whole image, row-major, one byte per pixel (0 = black, 255 = white)
    fn matrix(&self) -> Cow<'_, [u8]>;

    /// One row of luminance values
    fn row(&self, y: usize) -> Cow<'_, [u8]> {
        let width = self.width();
        let start = y * width;
        match self.matrix() {
            Cow::Borrowed(all) => Cow::Borrowed(&all[start..start + width]),
            Cow::Owned(all) => Cow::Owned(all[start..start + width].to_vec()),
        }
    }

    /// Whether [`LuminanceSource::rotate_counter_clockwise`] is available
    fn is_rotate_supported(&self) -> bool {
        false
    }

    /// A new source showing this image turned 90° counterclockwise
    fn rotate_counter_clockwise(&self) -> Result<Box<dyn LuminanceSource>> {
        Err(BarcodeError::Unsupported {
            operation: "rotate_counter_clockwise",
        })
    }

    /// Whether [`LuminanceSource::crop`] is available
    fn is_crop_supported(&self) -> bool {
        false
    }

    /// A new source showing the given sub-rectangle
    fn crop(
        &self,
        _left: usize,
        _top: usize,
        _width: usize,
        _height: usize,
    ) -> Result<Box<dyn LuminanceSource>> {
        Err(BarcodeError::Unsupported { operation: "crop" })
    }
}

/// Converts a caller image of type `I` into a luminance source
///
/// Any `Fn(&I) -> Result<Box<dyn LuminanceSource>>` closure is a factory.
pub trait LuminanceFactory<I: ?Sized> {
    /// Build a source for `image`
    fn create_luminance_source(&self, image: &I) -> Result<Box<dyn LuminanceSource>>;
}

impl<I, F> LuminanceFactory<I> for F
where
    I: ?Sized,
    F: Fn(&I) -> Result<Box<dyn LuminanceSource>>,
{
    fn create_luminance_source(&self, image: &I) -> Result<Box<dyn LuminanceSource>> {
        self(image)
    }
}
