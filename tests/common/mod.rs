//! Scripted collaborators shared by the integration tests
//!
//! Test images are 3x2 grayscale with a single black pixel in the top-left
//! corner. Each 90° counterclockwise turn walks that pixel to the next
//! corner, so the fake engines can tell which rotation they were handed.
#![allow(dead_code)]

use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use barcode_reader::{
    BarcodeError, BarcodeFormat, BinaryBitmap, DecodeHints, DecodeResult, GrayLuminanceSource,
    LuminanceSource, MetadataValue, MultipleReader, Reader, Result, ResultMetadataType,
    ResultPoint,
};

/// Caller-side image type handed to the orchestrators
pub struct TestImage {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl TestImage {
    pub fn marked() -> Self {
        Self {
            pixels: vec![0, 255, 255, 255, 255, 255],
            width: 3,
            height: 2,
        }
    }
}

/// Rotatable source
pub fn gray_factory(image: &TestImage) -> Result<Box<dyn LuminanceSource>> {
    Ok(Box::new(GrayLuminanceSource::new(
        image.pixels.clone(),
        image.width,
        image.height,
    )?))
}

/// Source that cannot rotate
pub fn fixed_factory(image: &TestImage) -> Result<Box<dyn LuminanceSource>> {
    Ok(Box::new(FixedSource(GrayLuminanceSource::new(
        image.pixels.clone(),
        image.width,
        image.height,
    )?)))
}

pub fn failing_factory(_: &TestImage) -> Result<Box<dyn LuminanceSource>> {
    Err(BarcodeError::engine("unreadable image"))
}

pub struct FixedSource(GrayLuminanceSource);

impl LuminanceSource for FixedSource {
    fn width(&self) -> usize {
        self.0.width()
    }
    fn height(&self) -> usize {
        self.0.height()
    }
    fn matrix(&self) -> Cow<'_, [u8]> {
        self.0.matrix()
    }
}

/// Counterclockwise quarter turns applied to a marked image
pub fn rotation_of(bitmap: &BinaryBitmap) -> u32 {
    let matrix = bitmap.black_matrix();
    let (w, h) = (matrix.width(), matrix.height());
    for y in 0..h {
        for x in 0..w {
            if matrix.get(x, y) {
                return match (x == 0, y == 0) {
                    (true, true) => 0,
                    (true, false) => 1,
                    (false, false) => 2,
                    (false, true) => 3,
                };
            }
        }
    }
    panic!("marker pixel missing from {w}x{h} bitmap");
}

/// One engine invocation, with the rotation it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Full(u32),
    Stateful(u32),
}

/// Shared view of what an engine was asked to do
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }
}

/// Single-result engine that succeeds only at the listed rotations
pub struct ScriptedEngine {
    pub log: CallLog,
    pub succeed_at: Vec<u32>,
    pub orientation: Option<MetadataValue>,
    pub error: Option<&'static str>,
    /// Format restriction seen by the last full decode
    pub seen_formats: Arc<Mutex<Option<Vec<BarcodeFormat>>>>,
}

impl ScriptedEngine {
    pub fn succeeding_at(rotations: &[u32]) -> Self {
        Self {
            log: CallLog::default(),
            succeed_at: rotations.to_vec(),
            orientation: None,
            error: None,
            seen_formats: Arc::default(),
        }
    }

    pub fn never() -> Self {
        Self::succeeding_at(&[])
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            error: Some(message),
            ..Self::never()
        }
    }

    pub fn with_orientation(mut self, value: MetadataValue) -> Self {
        self.orientation = Some(value);
        self
    }

    fn answer(&self, rotation: u32) -> Result<Option<DecodeResult>> {
        if let Some(message) = self.error {
            return Err(BarcodeError::engine(message));
        }
        if !self.succeed_at.contains(&rotation) {
            return Ok(None);
        }
        let mut result = DecodeResult::new(BarcodeFormat::QrCode, format!("found at {rotation}"));
        if let Some(value) = &self.orientation {
            result.put_metadata(ResultMetadataType::Orientation, value.clone());
        }
        Ok(Some(result))
    }
}

impl Reader for ScriptedEngine {
    fn decode(&mut self, image: &BinaryBitmap, hints: &DecodeHints) -> Result<Option<DecodeResult>> {
        let rotation = rotation_of(image);
        self.log.push(Call::Full(rotation));
        *self.seen_formats.lock().unwrap() = hints.possible_formats.clone();
        hints.found_result_point(&ResultPoint::new(rotation as f32, 0.0));
        self.answer(rotation)
    }

    fn decode_with_state(&mut self, image: &BinaryBitmap) -> Result<Option<DecodeResult>> {
        let rotation = rotation_of(image);
        self.log.push(Call::Stateful(rotation));
        self.answer(rotation)
    }
}

/// Multi-result engine returning fixed texts at the listed rotations
pub struct ScriptedMultiReader {
    pub log: CallLog,
    pub succeed_at: Vec<u32>,
    pub texts: Vec<&'static str>,
    pub orientation: Option<MetadataValue>,
}

impl ScriptedMultiReader {
    pub fn new(succeed_at: &[u32], texts: &[&'static str]) -> Self {
        Self {
            log: CallLog::default(),
            succeed_at: succeed_at.to_vec(),
            texts: texts.to_vec(),
            orientation: None,
        }
    }

    pub fn with_orientation(mut self, value: MetadataValue) -> Self {
        self.orientation = Some(value);
        self
    }
}

impl MultipleReader for ScriptedMultiReader {
    fn decode_multiple(
        &mut self,
        image: &BinaryBitmap,
        _: &DecodeHints,
    ) -> Result<Option<Vec<DecodeResult>>> {
        let rotation = rotation_of(image);
        self.log.push(Call::Full(rotation));
        if !self.succeed_at.contains(&rotation) {
            // An empty set counts as nothing found
            return Ok(Some(Vec::new()));
        }
        Ok(Some(
            self.texts
                .iter()
                .map(|text| {
                    let mut result = DecodeResult::new(BarcodeFormat::QrCode, *text);
                    if let Some(value) = &self.orientation {
                        result.put_metadata(ResultMetadataType::Orientation, value.clone());
                    }
                    result
                })
                .collect(),
        ))
    }
}

/// Collects published results
pub fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |value: &T| sink.lock().unwrap().push(value.clone()))
}
