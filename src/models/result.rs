use std::collections::HashMap;
use std::time::SystemTime;

use super::{BarcodeFormat, ResultPoint};

/// Kinds of metadata a decode engine may attach to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultMetadataType {
    /// Unspecified engine-specific value
    Other,
    /// Degrees of rotation, relative to the supplied image, at which the symbol was read
    Orientation,
    /// Raw byte segments (e.g. QR byte mode)
    ByteSegments,
    /// Error correction level as reported by the symbology
    ErrorCorrectionLevel,
    /// Number of errors corrected
    ErrorsCorrected,
    /// Issue number (PDF417 and others)
    IssueNumber,
    /// Suggested retail price extension
    SuggestedPrice,
    /// Possible country of origin (UPC/EAN)
    PossibleCountry,
    /// UPC/EAN extension payload
    UpcEanExtension,
    /// Structured append sequence number
    StructuredAppendSequence,
    /// Structured append parity
    StructuredAppendParity,
    /// AIM symbology identifier
    SymbologyIdentifier,
}

/// A metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Integer value (orientation, counts, sequence numbers)
    Int(i32),
    /// Text value
    Text(String),
    /// One or more raw byte segments
    Bytes(Vec<Vec<u8>>),
}

/// A decoded symbol
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    /// Symbology the payload was read from
    pub format: BarcodeFormat,
    /// Decoded text
    pub text: String,
    /// Raw payload bytes, when the engine exposes them
    pub raw_bytes: Option<Vec<u8>>,
    /// Geometric points of interest in image coordinates
    pub result_points: Vec<ResultPoint>,
    /// Metadata keyed by kind
    pub metadata: HashMap<ResultMetadataType, MetadataValue>,
    /// When the result was created
    pub timestamp: SystemTime,
}

impl DecodeResult {
    /// Create a result with no raw bytes, points or metadata
    pub fn new(format: BarcodeFormat, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
            raw_bytes: None,
            result_points: Vec::new(),
            metadata: HashMap::new(),
            timestamp: SystemTime::now(),
        }
    }

    /// Attach raw payload bytes
    pub fn with_raw_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.raw_bytes = Some(bytes);
        self
    }

    /// Attach result points
    pub fn with_points(mut self, points: Vec<ResultPoint>) -> Self {
        self.result_points = points;
        self
    }

    /// Attach one metadata entry
    pub fn with_metadata(mut self, kind: ResultMetadataType, value: MetadataValue) -> Self {
        self.metadata.insert(kind, value);
        self
    }

    /// Insert or replace a metadata entry
    pub fn put_metadata(&mut self, kind: ResultMetadataType, value: MetadataValue) {
        self.metadata.insert(kind, value);
    }

    /// Orientation in degrees, if present and integral
    pub fn orientation(&self) -> Option<i32> {
        match self.metadata.get(&ResultMetadataType::Orientation) {
            Some(MetadataValue::Int(degrees)) => Some(*degrees),
            _ => None,
        }
    }

    /// Fold the rotation applied before this result was found into its orientation.
    ///
    /// `rotations` counts 90° counterclockwise turns of the luminance source. An
    /// orientation already reported by the engine is taken as relative to the
    /// rotated frame, so the two are summed modulo 360. A non-integral
    /// orientation entry is treated as absent.
    pub fn add_rotation(&mut self, rotations: u32) {
        let applied = (rotations % 4) as i32 * 90;
        let degrees = match self.orientation() {
            Some(existing) => (existing.rem_euclid(360) + applied) % 360,
            None => applied,
        };
        self.put_metadata(ResultMetadataType::Orientation, MetadataValue::Int(degrees));
    }

    /// Shift every result point by (dx, dy)
    pub fn translate_points(&mut self, dx: f32, dy: f32) {
        for point in &mut self.result_points {
            *point = point.translate(dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_without_orientation() {
        let mut result = DecodeResult::new(BarcodeFormat::QrCode, "hello");
        result.add_rotation(2);
        assert_eq!(result.orientation(), Some(180));
    }

    #[test]
    fn test_rotation_zero_still_records_orientation() {
        let mut result = DecodeResult::new(BarcodeFormat::Ean13, "4006381333931");
        result.add_rotation(0);
        assert_eq!(result.orientation(), Some(0));
    }

    #[test]
    fn test_rotation_with_extreme_orientation() {
        let mut near_max = DecodeResult::new(BarcodeFormat::QrCode, "x")
            .with_metadata(ResultMetadataType::Orientation, MetadataValue::Int(i32::MAX));
        near_max.add_rotation(3);
        assert_eq!(near_max.orientation(), Some((i32::MAX % 360 + 270) % 360));

        let mut negative = DecodeResult::new(BarcodeFormat::QrCode, "x")
            .with_metadata(ResultMetadataType::Orientation, MetadataValue::Int(i32::MIN));
        negative.add_rotation(1);
        assert_eq!(negative.orientation(), Some((i32::MIN.rem_euclid(360) + 90) % 360));

        let mut below_zero = DecodeResult::new(BarcodeFormat::QrCode, "x")
            .with_metadata(ResultMetadataType::Orientation, MetadataValue::Int(-90));
        below_zero.add_rotation(2);
        assert_eq!(below_zero.orientation(), Some(90));
    }

    #[test]
    fn test_rotation_wraps_existing_orientation() {
        let mut result = DecodeResult::new(BarcodeFormat::QrCode, "hello")
            .with_metadata(ResultMetadataType::Orientation, MetadataValue::Int(270));
        result.add_rotation(3);
        assert_eq!(result.orientation(), Some(180));

        let mut engine_corrected = DecodeResult::new(BarcodeFormat::QrCode, "x")
            .with_metadata(ResultMetadataType::Orientation, MetadataValue::Int(90));
        engine_corrected.add_rotation(0);
        assert_eq!(engine_corrected.orientation(), Some(90));
    }

    #[test]
    fn test_non_integral_orientation_is_replaced() {
        let mut result = DecodeResult::new(BarcodeFormat::QrCode, "hello").with_metadata(
            ResultMetadataType::Orientation,
            MetadataValue::Text("up".to_string()),
        );
        result.add_rotation(1);
        assert_eq!(result.orientation(), Some(90));
    }

    #[test]
    fn test_translate_points() {
        let mut result = DecodeResult::new(BarcodeFormat::Code128, "abc")
            .with_points(vec![ResultPoint::new(1.0, 2.0)]);
        result.translate_points(10.0, 20.0);
        assert_eq!(result.result_points, vec![ResultPoint::new(11.0, 22.0)]);
    }
}
