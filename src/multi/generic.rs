use tracing::trace;

use crate::binarizer::BinaryBitmap;
use crate::engine::{MultipleReader, Reader};
use crate::error::Result;
use crate::hints::DecodeHints;
use crate::models::{DecodeResult, bounding_box};

/// Regions narrower (or shorter) than this are not searched again
const MIN_DIMENSION_TO_RECUR: usize = 100;
const MAX_DEPTH: usize = 4;

/// Finds several symbols with a single-result engine
///
/// After each hit the regions left of, above, right of and below the hit's
/// bounding box are searched again, down to [`MAX_DEPTH`] levels. Points are
/// mapped back to full-image coordinates and repeated payloads are dropped.
pub struct GenericMultipleReader<R> {
    delegate: R,
}

impl<R: Reader> GenericMultipleReader<R> {
    /// Wrap a single-result engine
    pub fn new(delegate: R) -> Self {
        Self { delegate }
    }

    fn search(
        &mut self,
        image: &BinaryBitmap,
        hints: &DecodeHints,
        results: &mut Vec<DecodeResult>,
        offset: (usize, usize),
        depth: usize,
    ) -> Result<()> {
        if depth > MAX_DEPTH {
            return Ok(());
        }
        let Some(result) = self.delegate.decode(image, hints)? else {
            return Ok(());
        };
        trace!(depth, x = offset.0, y = offset.1, format = %result.format, "sub-region hit");

        let (x_offset, y_offset) = offset;
        let duplicate = results
            .iter()
            .any(|r| r.format == result.format && r.text == result.text);
        let bounds = bounding_box(&result.result_points);
        if !duplicate {
            let mut translated = result;
            translated.translate_points(x_offset as f32, y_offset as f32);
            results.push(translated);
        }

        let Some((min_x, min_y, max_x, max_y)) = bounds else {
            return Ok(());
        };
        let (width, height) = (image.width(), image.height());
        let min_x = min_x.max(0.0) as usize;
        let min_y = min_y.max(0.0) as usize;
        let max_x = (max_x.max(0.0) as usize).min(width);
        let max_y = (max_y.max(0.0) as usize).min(height);

        if min_x > MIN_DIMENSION_TO_RECUR {
            let left = image.crop(0, 0, min_x, height);
            self.search(&left, hints, results, (x_offset, y_offset), depth + 1)?;
        }
        if min_y > MIN_DIMENSION_TO_RECUR {
            let above = image.crop(0, 0, width, min_y);
            self.search(&above, hints, results, (x_offset, y_offset), depth + 1)?;
        }
        if max_x + MIN_DIMENSION_TO_RECUR < width {
            let right = image.crop(max_x, 0, width - max_x, height);
            self.search(&right, hints, results, (x_offset + max_x, y_offset), depth + 1)?;
        }
        if max_y + MIN_DIMENSION_TO_RECUR < height {
            let below = image.crop(0, max_y, width, height - max_y);
            self.search(&below, hints, results, (x_offset, y_offset + max_y), depth + 1)?;
        }
        Ok(())
    }
}

impl<R: Reader> MultipleReader for GenericMultipleReader<R> {
    fn decode_multiple(
        &mut self,
        image: &BinaryBitmap,
        hints: &DecodeHints,
    ) -> Result<Option<Vec<DecodeResult>>> {
        let mut results = Vec::new();
        self.search(image, hints, &mut results, (0, 0), 0)?;
        Ok((!results.is_empty()).then_some(results))
    }
}
