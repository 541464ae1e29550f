//! barcode_reader - barcode decode orchestration
//!
//! Turns caller images into luminance sources, thresholds them and drives a
//! pluggable decode engine, retrying in 90° steps when auto-rotation is on.
//! Results carry their orientation and are published to subscribers.
//!
//! ```no_run
//! use barcode_reader::{BarcodeReader, DecodeOptions, ImageLuminanceFactory, Reader};
//!
//! fn scan(engine: impl Reader + 'static) -> barcode_reader::Result<()> {
//!     let image = image::open("label.png")?;
//!     let mut reader: BarcodeReader<image::DynamicImage> = BarcodeReader::new(engine)
//!         .with_luminance_factory(ImageLuminanceFactory)
//!         .with_options(DecodeOptions::from_env().with_auto_rotate(true));
//!     if let Some(result) = reader.decode(&image)? {
//!         println!("{}: {}", result.format, result.text);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Thresholding strategies and the binary bitmap they produce
pub mod binarizer;
/// Decode engine traits
pub mod engine;
/// Error type and result alias
pub mod error;
/// Subscriber lists for result and result-point notifications
pub mod events;
/// Structured decode hints
pub mod hints;
/// Tracing subscriber setup
pub mod logging;
/// Luminance sources and factories
pub mod luminance;
/// Core data structures (formats, results, points, bit matrices)
pub mod models;
/// Multi-result orchestration
pub mod multi;
/// Option store with change tracking
pub mod options;
/// Single-result orchestration
pub mod reader;
/// Inspection helpers used by the demo binary
pub mod tools;

pub use binarizer::{
    Binarizer, BinaryBitmap, DEFAULT_BINARIZER, GlobalHistogramBinarizer, HybridBinarizer,
};
pub use engine::{MultipleReader, Reader};
pub use error::{BarcodeError, Result};
pub use events::{SubscriptionId, Subscribers};
pub use hints::{DecodeHintType, DecodeHints, ResultPointCallback};
pub use logging::init_tracing;
pub use luminance::{GrayLuminanceSource, ImageLuminanceFactory, LuminanceFactory, LuminanceSource};
pub use models::{
    BarcodeFormat, BitMatrix, DecodeResult, MetadataValue, ResultMetadataType, ResultPoint,
};
pub use multi::{FAST_PATH_FORMAT, GenericMultipleReader, MultiBarcodeReader};
pub use options::DecodeOptions;
pub use reader::{BarcodeReader, ROTATION_ATTEMPTS, ReaderState};
