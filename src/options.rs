//! Configuration store shared by both orchestrators
//!
//! [`DecodeOptions`] owns the hint record, the auto-rotate flag and the
//! result-point subscription registry. Each store carries a hint revision:
//! a new store starts at a never-seen value and every setter for a
//! hint-backed option moves it on. The owning orchestrator compares the
//! revision its warm engine state was built from against the current one at
//! the start of every decode, so replacing the whole store also counts.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::events::{SubscriptionId, Subscribers};
use crate::hints::{DecodeHints, dedup_ordered};
use crate::models::{BarcodeFormat, ResultPoint};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_string(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

/// All-or-nothing: one unknown name rejects the whole list
fn parse_formats(value: &str) -> Option<Vec<BarcodeFormat>> {
    let raw = parse_string(value)?;
    let mut formats = Vec::new();
    for token in raw.split(',') {
        match token.trim().parse::<BarcodeFormat>() {
            Ok(format) => formats.push(format),
            Err(_) => {
                warn!(token = token.trim(), "unknown barcode format, ignoring format list");
                return None;
            }
        }
    }
    Some(formats)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_bool(name: &str) -> Option<bool> {
    let value = env_value(name)?;
    let parsed = parse_bool(&value);
    if parsed.is_none() {
        warn!(name, value = %value, "unparseable boolean, keeping default");
    }
    parsed
}

/// Decode options: hints, auto-rotation and result-point subscribers
#[derive(Debug)]
pub struct DecodeOptions {
    hints: DecodeHints,
    auto_rotate: bool,
    result_points: Subscribers<ResultPoint>,
    revision: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            hints: DecodeHints::default(),
            auto_rotate: false,
            result_points: Subscribers::new(),
            revision: next_revision(),
        }
    }
}

impl DecodeOptions {
    /// All hints absent, auto-rotation off
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by environment variables
    ///
    /// Reads `BARCODE_TRY_HARDER`, `BARCODE_PURE_BARCODE`,
    /// `BARCODE_CHARACTER_SET`, `BARCODE_POSSIBLE_FORMATS` (comma-separated
    /// names such as `QR_CODE,EAN_13`), `BARCODE_TRY_INVERTED` and
    /// `BARCODE_AUTO_ROTATE`. Unset or unparseable variables keep the default;
    /// a format list with any unknown name is ignored as a whole.
    pub fn from_env() -> Self {
        let mut options = Self::new();
        if let Some(v) = env_bool("BARCODE_TRY_HARDER") {
            options.set_try_harder(v);
        }
        if let Some(v) = env_bool("BARCODE_PURE_BARCODE") {
            options.set_pure_barcode(v);
        }
        if let Some(v) = env_value("BARCODE_CHARACTER_SET").as_deref().and_then(parse_string) {
            options.set_character_set(Some(v));
        }
        if let Some(v) = env_value("BARCODE_POSSIBLE_FORMATS").as_deref().and_then(parse_formats) {
            options.set_possible_formats(Some(v));
        }
        if let Some(v) = env_bool("BARCODE_TRY_INVERTED") {
            options.set_try_inverted(v);
        }
        if let Some(v) = env_bool("BARCODE_AUTO_ROTATE") {
            options.set_auto_rotate(v);
        }
        options
    }

    /// Current hint set
    pub fn hints(&self) -> &DecodeHints {
        &self.hints
    }

    fn hint_changed(&mut self, name: &'static str) {
        self.revision = next_revision();
        debug!(hint = name, revision = self.revision, "decode hint changed");
    }

    /// Identifies the current hint values; unique across all stores
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    /// Deeper search in the decode engine
    pub fn try_harder(&self) -> bool {
        self.hints.try_harder
    }

    /// Enable or disable deeper search
    pub fn set_try_harder(&mut self, value: bool) {
        self.hints.try_harder = value;
        self.hint_changed("try_harder");
    }

    /// Image contains only the symbol
    pub fn pure_barcode(&self) -> bool {
        self.hints.pure_barcode
    }

    /// Declare that images contain only the symbol
    pub fn set_pure_barcode(&mut self, value: bool) {
        self.hints.pure_barcode = value;
        self.hint_changed("pure_barcode");
    }

    /// Text encoding override
    pub fn character_set(&self) -> Option<&str> {
        self.hints.character_set.as_deref()
    }

    /// Set or clear the text encoding override
    pub fn set_character_set(&mut self, value: Option<String>) {
        self.hints.character_set = value;
        self.hint_changed("character_set");
    }

    /// Formats the engine is restricted to
    pub fn possible_formats(&self) -> Option<&[BarcodeFormat]> {
        self.hints.possible_formats.as_deref()
    }

    /// Set or clear the format restriction; duplicates are dropped, order kept
    pub fn set_possible_formats(&mut self, value: Option<Vec<BarcodeFormat>>) {
        self.hints.possible_formats = value.map(|formats| dedup_ordered(formats));
        self.hint_changed("possible_formats");
    }

    /// GS1 interpretation of the payload
    pub fn assume_gs1(&self) -> bool {
        self.hints.assume_gs1
    }

    /// Enable or disable GS1 interpretation
    pub fn set_assume_gs1(&mut self, value: bool) {
        self.hints.assume_gs1 = value;
        self.hint_changed("assume_gs1");
    }

    /// Codabar start/stop characters kept in the text
    pub fn return_codabar_start_end(&self) -> bool {
        self.hints.return_codabar_start_end
    }

    /// Keep or strip Codabar start/stop characters
    pub fn set_return_codabar_start_end(&mut self, value: bool) {
        self.hints.return_codabar_start_end = value;
        self.hint_changed("return_codabar_start_end");
    }

    /// Code 39 full-ASCII decoding
    pub fn use_code_39_extended_mode(&self) -> bool {
        self.hints.use_code_39_extended_mode
    }

    /// Enable or disable Code 39 full-ASCII decoding
    pub fn set_use_code_39_extended_mode(&mut self, value: bool) {
        self.hints.use_code_39_extended_mode = value;
        self.hint_changed("use_code_39_extended_mode");
    }

    /// Accepted payload lengths
    pub fn allowed_lengths(&self) -> Option<&[u32]> {
        self.hints.allowed_lengths.as_deref()
    }

    /// Set or clear the accepted payload lengths
    pub fn set_allowed_lengths(&mut self, value: Option<Vec<u32>>) {
        self.hints.allowed_lengths = value;
        self.hint_changed("allowed_lengths");
    }

    /// Inverted-image search
    pub fn try_inverted(&self) -> bool {
        self.hints.try_inverted
    }

    /// Enable or disable inverted-image search in the engine
    pub fn set_try_inverted(&mut self, value: bool) {
        self.hints.try_inverted = value;
        self.hint_changed("try_inverted");
    }

    /// Whether the retry loop rotates the image
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Enable or disable rotation retries; does not touch engine state
    pub fn set_auto_rotate(&mut self, value: bool) {
        self.auto_rotate = value;
    }

    /// Builder form of [`DecodeOptions::set_try_harder`]
    pub fn with_try_harder(mut self, value: bool) -> Self {
        self.set_try_harder(value);
        self
    }

    /// Builder form of [`DecodeOptions::set_pure_barcode`]
    pub fn with_pure_barcode(mut self, value: bool) -> Self {
        self.set_pure_barcode(value);
        self
    }

    /// Builder form of [`DecodeOptions::set_character_set`]
    pub fn with_character_set(mut self, value: impl Into<String>) -> Self {
        self.set_character_set(Some(value.into()));
        self
    }

    /// Builder form of [`DecodeOptions::set_possible_formats`]
    pub fn with_possible_formats(mut self, formats: impl IntoIterator<Item = BarcodeFormat>) -> Self {
        self.set_possible_formats(Some(formats.into_iter().collect()));
        self
    }

    /// Builder form of [`DecodeOptions::set_auto_rotate`]
    pub fn with_auto_rotate(mut self, value: bool) -> Self {
        self.set_auto_rotate(value);
        self
    }

    /// Subscribe to result points found during the search
    ///
    /// The first subscriber installs one forwarding callback in the hints;
    /// later subscribers reuse it.
    pub fn subscribe_result_points<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ResultPoint) + Send + Sync + 'static,
    {
        let id = self.result_points.subscribe(callback);
        if self.hints.need_result_point_callback.is_none() {
            debug!("installing result point forwarder");
            self.hints.need_result_point_callback = Some(self.result_points.forwarder());
        }
        id
    }

    /// Remove a result-point subscriber; the last removal uninstalls the forwarder
    pub fn unsubscribe_result_points(&mut self, id: SubscriptionId) -> bool {
        let removed = self.result_points.unsubscribe(id);
        if self.result_points.is_empty() && self.hints.need_result_point_callback.is_some() {
            debug!("removing result point forwarder");
            self.hints.need_result_point_callback = None;
        }
        removed
    }

    /// Number of result-point subscribers
    pub fn result_point_subscribers(&self) -> usize {
        self.result_points.len()
    }
}
