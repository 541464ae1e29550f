//! Multi-result decode orchestration
//!
//! [`MultiBarcodeReader`] shares the single reader's preconditions and
//! rotation loop but has no fast path. Each call picks a multi-result
//! strategy from the current hints before the first attempt.

use tracing::debug;

use crate::binarizer::{Binarizer, DEFAULT_BINARIZER};
use crate::engine::{MultipleReader, Reader};
use crate::error::{BarcodeError, Result};
use crate::events::{SubscriptionId, Subscribers};
use crate::luminance::LuminanceFactory;
use crate::models::{BarcodeFormat, DecodeResult};
use crate::options::DecodeOptions;
use crate::reader::rotation::decode_with_rotation;

mod generic;

pub use generic::GenericMultipleReader;

/// Format served by the specialized multi-result reader
pub const FAST_PATH_FORMAT: BarcodeFormat = BarcodeFormat::QrCode;

/// Decodes every barcode it can find in an image of type `I`
pub struct MultiBarcodeReader<I: ?Sized> {
    options: DecodeOptions,
    luminance_factory: Option<Box<dyn LuminanceFactory<I>>>,
    binarizer: Option<Box<dyn Binarizer>>,
    engine: Box<dyn Reader>,
    specialized: Box<dyn MultipleReader>,
    result_found: Subscribers<DecodeResult>,
}

impl<I: ?Sized> MultiBarcodeReader<I> {
    /// `engine` backs the generic search, `specialized` handles
    /// [`FAST_PATH_FORMAT`]-only searches
    pub fn new(engine: impl Reader + 'static, specialized: impl MultipleReader + 'static) -> Self {
        Self {
            options: DecodeOptions::default(),
            luminance_factory: None,
            binarizer: None,
            engine: Box::new(engine),
            specialized: Box::new(specialized),
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

    /// Replace the options
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
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

    /// Mutable options
    pub fn options_mut(&mut self) -> &mut DecodeOptions {
        &mut self.options
    }

    /// Whether the next call will use the specialized reader
    pub fn uses_specialized_reader(&self) -> bool {
        self.options.hints().is_only_format(FAST_PATH_FORMAT)
    }

    /// Get notified of every result, in order, after orientation is reconciled
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

    /// Decode every barcode in `image`
    ///
    /// Same preconditions and error behavior as
    /// [`BarcodeReader::decode`](crate::BarcodeReader::decode). Stops at the
    /// first rotation that yields a non-empty set; `Ok(None)` when none does.
    pub fn decode_multiple<'a>(
        &mut self,
        image: impl Into<Option<&'a I>>,
    ) -> Result<Option<Vec<DecodeResult>>>
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

        let source = factory.create_luminance_source(image)?;
        let binarizer = self.binarizer.as_deref().unwrap_or(&DEFAULT_BINARIZER);
        let hints = self.options.hints();
        let use_specialized = hints.is_only_format(FAST_PATH_FORMAT);
        debug!(specialized = use_specialized, "multi decode strategy");

        let mut generic;
        let reader: &mut dyn MultipleReader = if use_specialized {
            &mut self.specialized
        } else {
            generic = GenericMultipleReader::new(&mut self.engine);
            &mut generic
        };

        let found = decode_with_rotation(source, binarizer, self.options.auto_rotate(), |bitmap| {
            Ok(reader
                .decode_multiple(bitmap, hints)?
                .filter(|results| !results.is_empty()))
        })?;

        let Some((mut results, rotation)) = found else {
            debug!("no barcodes found");
            return Ok(None);
        };

        for result in &mut results {
            result.add_rotation(rotation);
        }
        debug!(count = results.len(), rotation, "barcodes found");
        for result in &results {
            self.result_found.publish(result);
        }
        Ok(Some(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binarizer::BinaryBitmap;
    use crate::hints::DecodeHints;
    use crate::luminance::{GrayLuminanceSource, LuminanceSource};

    struct Nothing;

    impl Reader for Nothing {
        fn decode(&mut self, _: &BinaryBitmap, _: &DecodeHints) -> Result<Option<DecodeResult>> {
            Ok(None)
        }
        fn decode_with_state(&mut self, _: &BinaryBitmap) -> Result<Option<DecodeResult>> {
            Ok(None)
        }
    }

    struct Pair;

    impl MultipleReader for Pair {
        fn decode_multiple(
            &mut self,
            _: &BinaryBitmap,
            _: &DecodeHints,
        ) -> Result<Option<Vec<DecodeResult>>> {
            Ok(Some(vec![
                DecodeResult::new(BarcodeFormat::QrCode, "a"),
                DecodeResult::new(BarcodeFormat::QrCode, "b"),
            ]))
        }
    }

    fn gray(pixels: &Vec<u8>) -> Result<Box<dyn LuminanceSource>> {
        Ok(Box::new(GrayLuminanceSource::new(pixels.clone(), 2, 2)?))
    }

    #[test]
    fn test_strategy_follows_possible_formats() {
        let mut reader = MultiBarcodeReader::new(Nothing, Pair).with_luminance_factory(gray);
        let image = vec![0u8, 255, 255, 0];
        assert!(!reader.uses_specialized_reader());
        assert!(reader.decode_multiple(&image).unwrap().is_none());

        reader
            .options_mut()
            .set_possible_formats(Some(vec![BarcodeFormat::QrCode]));
        assert!(reader.uses_specialized_reader());
        let results = reader.decode_multiple(&image).unwrap().unwrap();
        let texts: Vec<_> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["a", "b"]);
    }

    #[test]
    fn test_preconditions() {
        let mut reader: MultiBarcodeReader<Vec<u8>> = MultiBarcodeReader::new(Nothing, Pair);
        assert!(matches!(
            reader.decode_multiple(None),
            Err(BarcodeError::Configuration { .. })
        ));
    }
}
