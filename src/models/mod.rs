pub mod format;
pub mod matrix;
pub mod point;
pub mod result;

pub use format::{BarcodeFormat, UnknownFormat};
pub use matrix::BitMatrix;
pub use point::{ResultPoint, bounding_box};
pub use result::{DecodeResult, MetadataValue, ResultMetadataType};
