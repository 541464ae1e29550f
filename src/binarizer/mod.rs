//! Thresholding strategies
//!
//! A [`Binarizer`] turns a luminance source into a [`BitMatrix`]; the
//! orchestrators wrap the result in a [`BinaryBitmap`] and hand it to the
//! decode engine. [`DEFAULT_BINARIZER`] is used unless the caller installs
//! its own strategy.

use crate::error::Result;
use crate::luminance::LuminanceSource;
use crate::models::BitMatrix;

/// Global Otsu threshold
pub mod global;
/// Local-mean adaptive threshold
pub mod hybrid;

pub use global::GlobalHistogramBinarizer;
pub use hybrid::HybridBinarizer;

/// Process-wide default thresholding strategy
pub static DEFAULT_BINARIZER: HybridBinarizer = HybridBinarizer::new();

/// Converts a luminance source into a thresholded bit matrix
pub trait Binarizer: Send + Sync {
    /// Threshold the whole image (true = black)
    fn black_matrix(&self, source: &dyn LuminanceSource) -> Result<BitMatrix>;
}

/// Thresholded view of one luminance source, as seen by a decode engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBitmap {
    matrix: BitMatrix,
}

impl BinaryBitmap {
    /// Threshold `source` with `binarizer`
    pub fn new(source: &dyn LuminanceSource, binarizer: &dyn Binarizer) -> Result<Self> {
        Ok(Self {
            matrix: binarizer.black_matrix(source)?,
        })
    }

    /// Wrap an already thresholded matrix
    pub fn from_matrix(matrix: BitMatrix) -> Self {
        Self { matrix }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.matrix.height()
    }

    /// The thresholded matrix
    pub fn black_matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    /// One thresholded row
    pub fn black_row(&self, y: usize) -> Vec<bool> {
        self.matrix.row(y)
    }

    /// A new bitmap over the given sub-rectangle (clamped to the bounds)
    pub fn crop(&self, left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            matrix: self.matrix.crop(left, top, width, height),
        }
    }
}
