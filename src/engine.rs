//! Decode engine boundary
//!
//! The orchestrators never look for symbols themselves. They hand a
//! [`BinaryBitmap`] to an implementation of these traits and take back
//! whatever it found. `Ok(None)` means "nothing here"; an `Err` is passed
//! to the caller untouched.

use crate::binarizer::BinaryBitmap;
use crate::error::Result;
use crate::hints::DecodeHints;
use crate::models::DecodeResult;

/// Single-result decode engine
pub trait Reader {
    /// Full search using `hints`
    ///
    /// An engine may retain dispatch state derived from `hints` (which
    /// format readers to try, in which order) for later
    /// [`Reader::decode_with_state`] calls.
    fn decode(&mut self, image: &BinaryBitmap, hints: &DecodeHints)
    -> Result<Option<DecodeResult>>;

    /// Fast search reusing state retained by the last [`Reader::decode`]
    ///
    /// Only called after at least one full decode with the current hints.
    fn decode_with_state(&mut self, image: &BinaryBitmap) -> Result<Option<DecodeResult>>;
}

/// Engine that may find several symbols in one bitmap
pub trait MultipleReader {
    /// Search for every symbol; `Ok(None)` or an empty vector when there is none
    fn decode_multiple(
        &mut self,
        image: &BinaryBitmap,
        hints: &DecodeHints,
    ) -> Result<Option<Vec<DecodeResult>>>;
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn decode(
        &mut self,
        image: &BinaryBitmap,
        hints: &DecodeHints,
    ) -> Result<Option<DecodeResult>> {
        (**self).decode(image, hints)
    }

    fn decode_with_state(&mut self, image: &BinaryBitmap) -> Result<Option<DecodeResult>> {
        (**self).decode_with_state(image)
    }
}

impl<R: Reader + ?Sized> Reader for &mut R {
    fn decode(
        &mut self,
        image: &BinaryBitmap,
        hints: &DecodeHints,
    ) -> Result<Option<DecodeResult>> {
        (**self).decode(image, hints)
    }

    fn decode_with_state(&mut self, image: &BinaryBitmap) -> Result<Option<DecodeResult>> {
        (**self).decode_with_state(image)
    }
}

impl<M: MultipleReader + ?Sized> MultipleReader for Box<M> {
    fn decode_multiple(
        &mut self,
        image: &BinaryBitmap,
        hints: &DecodeHints,
    ) -> Result<Option<Vec<DecodeResult>>> {
        (**self).decode_multiple(image, hints)
    }
}
