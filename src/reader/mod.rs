//! Single-result decode orchestration
//!
//! [`BarcodeReader`] converts a caller image into a luminance source,
//! thresholds it and asks the decode engine for a symbol, rotating the
//! source between attempts when auto-rotation is on. It also decides
//! between the engine's full search and its stateful fast path:
//!
//! - `Fresh`: next attempt runs a full decode with the current hints, then
//!   the reader turns `Warm`
//! - `Warm`: attempts use `decode_with_state`
//!
//! The reader remembers the hint revision its warm state was built from.
//! Any hint change, including swapping in a whole new options value, sends it
//! back to `Fresh` before its next decode.

use tracing::debug;

use crate::binarizer::{Binarizer, DEFAULT_BINARIZER};
use crate::engine::Reader;
use crate::error::{BarcodeError, Result};
use crate::events::{SubscriptionId, Subscribers};
use crate::luminance::LuminanceFactory;
use crate::models::DecodeResult;
use crate::options::DecodeOptions;

/// Shared rotation-retry loop
pub mod rotation;

pub use rotation::ROTATION_ATTEMPTS;
use rotation::decode_with_rotation;

/// Whether the engine holds dispatch state built from the current hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderState {
    /// Next attempt performs a full decode
    #[default]
    Fresh,
    /// Attempts may use the engine's stateful fast path
    Warm,
}

/// Decodes at most one barcode per image of type `I`
pub struct BarcodeReader<I: ?Sized> {
    options: DecodeOptions,
    luminance_factory: Option<Box<dyn LuminanceFactory<I>>>,
    binarizer: Option<Box<dyn Binarizer>>,
    engine: Box<dyn Reader>,
    /// Hint revision the engine's dispatch state was built from
    warm_revision: Option<u64>,
    result_found: Subscribers<DecodeResult>,
}

impl<I: ?Sized> BarcodeReader<I> {
    /// Reader over `engine` with default options and no luminance factory
    pub fn new(engine: impl Reader + 'static) -> Self {
        Self {
            options: DecodeOptions::default(),
            luminance_factory: None,
            binarizer: None,
            engine: Box::new(engine),
            warm_revision: None,
            result_found: Subscribers::new(),
        }
    }

    /// Set the image-to-luminance strategy
    pub fn with_luminance_factory(mut self, factory: impl LuminanceFactory<I> + 'static) -> Self {
        self.set_luminance_factory(factory);
        self
    }

    /// Replace the thresholding strategy
    pub fn with_binarizer(mut self, binarizer: impl Binarizer + 'static) -> Self {
        self.set_binarizer(binarizer);
        self
    }

    /// Replace the options; the next decode starts `Fresh`
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self.warm_revision = None;
        self
    }

    /// Set the image-to-luminance strategy
    pub fn set_luminance_factory(&mut self, factory: impl LuminanceFactory<I> + 'static) {
        self.luminance_factory = Some(Box::new(factory));
    }

    /// Replace the thresholding strategy
    pub fn set_binarizer(&mut self, binarizer: impl Binarizer + 'static) {
        self.binarizer = Some(Box::new(binarizer));
    }

    /// Current options
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Mutable options; hint changes take effect on the next decode
    pub fn options_mut(&mut self) -> &mut DecodeOptions {
        &mut self.options
    }

    /// Fast-path state; any hint change since the last full decode reads as `Fresh`
    pub fn state(&self) -> ReaderState {
        if self.warm_revision == Some(self.options.revision()) {
            ReaderState::Warm
        } else {
            ReaderState::Fresh
        }
    }

    /// Get notified of every result, after orientation is reconciled
    pub fn subscribe_result_found<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DecodeResult) + Send + Sync + 'static,
    {
        self.result_found.subscribe(callback)
    }

    /// Stop notifying a result subscriber
    pub fn unsubscribe_result_found(&mut self, id: SubscriptionId) -> bool {
        self.result_found.unsubscribe(id)
    }

    /// Decode one barcode from `image`
    ///
    /// Returns `Ok(None)` when no attempt found anything. Fails with
    /// [`BarcodeError::Configuration`] when no luminance factory is set and
    /// with [`BarcodeError::Argument`] when `image` is `None`, in both cases
    /// before any work. Errors from the factory, binarizer or engine are
    /// returned unchanged.
    pub fn decode<'a>(&mut self, image: impl Into<Option<&'a I>>) -> Result<Option<DecodeResult>>
    where
        I: 'a,
    {
        let factory = self
            .luminance_factory
            .as_deref()
            .ok_or_else(|| BarcodeError::configuration("no luminance factory configured"))?;
        let image = image
            .into()
            .ok_or_else(|| BarcodeError::argument("image must not be None"))?;

        let revision = self.options.revision();
        if self.warm_revision.is_some_and(|built_from| built_from != revision) {
            debug!("hints changed, dropping warm engine state");
            self.warm_revision = None;
        }

        let source = factory.create_luminance_source(image)?;
        let binarizer = self.binarizer.as_deref().unwrap_or(&DEFAULT_BINARIZER);
        let hints = self.options.hints();
        let engine = &mut self.engine;
        let warm_revision = &mut self.warm_revision;

        let found = decode_with_rotation(source, binarizer, self.options.auto_rotate(), |bitmap| {
            if warm_revision.is_some() {
                return engine.decode_with_state(bitmap);
            }
            debug!(?hints, revision, "full decode");
            let result = engine.decode(bitmap, hints)?;
            *warm_revision = Some(revision);
            Ok(result)
        })?;

        let Some((mut result, rotation)) = found else {
            debug!("no barcode found");
            return Ok(None);
        };

        result.add_rotation(rotation);
        debug!(
            format = %result.format,
            rotation,
            orientation = result.orientation(),
            subscribers = self.result_found.len(),
            "barcode found"
        );
        self.result_found.publish(&result);
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binarizer::BinaryBitmap;
    use crate::hints::DecodeHints;
    use crate::luminance::{GrayLuminanceSource, LuminanceSource};
    use crate::models::BarcodeFormat;

    #[derive(Default)]
    struct Counting {
        full: usize,
        stateful: usize,
    }

    impl Reader for Counting {
        fn decode(&mut self, _: &BinaryBitmap, _: &DecodeHints) -> Result<Option<DecodeResult>> {
            self.full += 1;
            Ok(Some(DecodeResult::new(BarcodeFormat::QrCode, "ok")))
        }

        fn decode_with_state(&mut self, _: &BinaryBitmap) -> Result<Option<DecodeResult>> {
            self.stateful += 1;
            Ok(Some(DecodeResult::new(BarcodeFormat::QrCode, "ok")))
        }
    }

    fn gray(pixels: &Vec<u8>) -> Result<Box<dyn LuminanceSource>> {
        Ok(Box::new(GrayLuminanceSource::new(pixels.clone(), 2, 2)?))
    }

    #[test]
    fn test_state_transitions() {
        let mut reader = BarcodeReader::new(Counting::default()).with_luminance_factory(gray);
        let image = vec![0u8, 255, 255, 0];
        assert_eq!(reader.state(), ReaderState::Fresh);

        reader.decode(&image).unwrap();
        assert_eq!(reader.state(), ReaderState::Warm);

        reader.decode(&image).unwrap();
        assert_eq!(reader.state(), ReaderState::Warm);

        reader.options_mut().set_pure_barcode(true);
        assert_eq!(reader.state(), ReaderState::Fresh);
        reader.decode(&image).unwrap();
        assert_eq!(reader.state(), ReaderState::Warm);

        // auto-rotate is not a hint and keeps the reader warm
        reader.options_mut().set_auto_rotate(true);
        assert_eq!(reader.state(), ReaderState::Warm);

        // A replaced store has never been decoded with
        let previous = std::mem::take(reader.options_mut());
        assert_eq!(reader.state(), ReaderState::Fresh);
        reader.decode(&image).unwrap();
        assert_eq!(reader.state(), ReaderState::Warm);

        // Putting back the old store is a change too
        *reader.options_mut() = previous;
        assert_eq!(reader.state(), ReaderState::Fresh);
        reader.decode(&image).unwrap();
        assert_eq!(reader.state(), ReaderState::Warm);
    }

    #[test]
    fn test_preconditions() {
        let mut unconfigured: BarcodeReader<Vec<u8>> = BarcodeReader::new(Counting::default());
        assert!(matches!(
            unconfigured.decode(&vec![0u8; 4]),
            Err(BarcodeError::Configuration { .. })
        ));

        let mut reader = BarcodeReader::new(Counting::default()).with_luminance_factory(gray);
        assert!(matches!(
            reader.decode(None),
            Err(BarcodeError::Argument { .. })
        ));
    }
}
