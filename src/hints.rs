//! Decode hints handed to the decode engine
//!
//! Hints are a structured record rather than an open key/value map. An
//! option that is off or unset counts as absent; [`DecodeHints::keys`] lists
//! the present ones.

use std::fmt;
use std::sync::Arc;

use crate::models::{BarcodeFormat, ResultPoint};

/// Callback an engine invokes for each point of interest found while searching
pub type ResultPointCallback = Arc<dyn Fn(&ResultPoint) + Send + Sync>;

/// Hint keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeHintType {
    /// Spend more time looking for a symbol
    TryHarder,
    /// The image contains only the symbol
    PureBarcode,
    /// Text encoding override
    CharacterSet,
    /// Restrict the search to these formats
    PossibleFormats,
    /// Forward result points to the installed callback
    NeedResultPointCallback,
    /// Treat the payload as GS1
    AssumeGs1,
    /// Keep Codabar start/stop characters in the text
    ReturnCodabarStartEnd,
    /// Decode Code 39 full-ASCII
    UseCode39ExtendedMode,
    /// Accept only these payload lengths
    AllowedLengths,
    /// Also search the inverted image
    TryInverted,
}

/// The hint set passed with every full decode
#[derive(Clone, Default)]
pub struct DecodeHints {
    /// Deeper, slower search
    pub try_harder: bool,
    /// Image is expected to contain only the symbol
    pub pure_barcode: bool,
    /// Text encoding override, e.g. `ISO-8859-1`
    pub character_set: Option<String>,
    /// Ordered set of formats to search for
    pub possible_formats: Option<Vec<BarcodeFormat>>,
    /// Installed by the result-point subscription registry
    pub need_result_point_callback: Option<ResultPointCallback>,
    /// Treat the payload as GS1
    pub assume_gs1: bool,
    /// Keep Codabar start/stop characters
    pub return_codabar_start_end: bool,
    /// Decode Code 39 full-ASCII
    pub use_code_39_extended_mode: bool,
    /// Accepted payload lengths for variable-length 1D formats
    pub allowed_lengths: Option<Vec<u32>>,
    /// Also search the inverted image
    pub try_inverted: bool,
}

impl DecodeHints {
    /// Whether `key` is present
    pub fn contains(&self, key: DecodeHintType) -> bool {
        match key {
            DecodeHintType::TryHarder => self.try_harder,
            DecodeHintType::PureBarcode => self.pure_barcode,
            DecodeHintType::CharacterSet => self.character_set.is_some(),
            DecodeHintType::PossibleFormats => self.possible_formats.is_some(),
            DecodeHintType::NeedResultPointCallback => self.need_result_point_callback.is_some(),
            DecodeHintType::AssumeGs1 => self.assume_gs1,
            DecodeHintType::ReturnCodabarStartEnd => self.return_codabar_start_end,
            DecodeHintType::UseCode39ExtendedMode => self.use_code_39_extended_mode,
            DecodeHintType::AllowedLengths => self.allowed_lengths.is_some(),
            DecodeHintType::TryInverted => self.try_inverted,
        }
    }

    /// Present keys
    pub fn keys(&self) -> Vec<DecodeHintType> {
        const ALL: [DecodeHintType; 10] = [
            DecodeHintType::TryHarder,
            DecodeHintType::PureBarcode,
            DecodeHintType::CharacterSet,
            DecodeHintType::PossibleFormats,
            DecodeHintType::NeedResultPointCallback,
            DecodeHintType::AssumeGs1,
            DecodeHintType::ReturnCodabarStartEnd,
            DecodeHintType::UseCode39ExtendedMode,
            DecodeHintType::AllowedLengths,
            DecodeHintType::TryInverted,
        ];
        ALL.into_iter().filter(|k| self.contains(*k)).collect()
    }

    /// True when no key is present
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Whether the search is restricted to exactly `format`
    pub fn is_only_format(&self, format: BarcodeFormat) -> bool {
        matches!(self.possible_formats.as_deref(), Some([only]) if *only == format)
    }

    /// Forward a point to the installed callback, if any
    pub fn found_result_point(&self, point: &ResultPoint) {
        if let Some(callback) = &self.need_result_point_callback {
            callback(point);
        }
    }
}

impl fmt::Debug for DecodeHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeHints")
            .field("try_harder", &self.try_harder)
            .field("pure_barcode", &self.pure_barcode)
            .field("character_set", &self.character_set)
            .field("possible_formats", &self.possible_formats)
            .field(
                "need_result_point_callback",
                &self.need_result_point_callback.is_some(),
            )
            .field("assume_gs1", &self.assume_gs1)
            .field("return_codabar_start_end", &self.return_codabar_start_end)
            .field("use_code_39_extended_mode", &self.use_code_39_extended_mode)
            .field("allowed_lengths", &self.allowed_lengths)
            .field("try_inverted", &self.try_inverted)
            .finish()
    }
}

/// Remove duplicates while keeping first occurrences in order
pub(crate) fn dedup_ordered<T: PartialEq + Copy>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
