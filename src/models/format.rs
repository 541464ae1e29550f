use std::fmt;
use std::str::FromStr;

/// Symbology identifiers understood by decode engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BarcodeFormat {
    /// Aztec 2D
    Aztec,
    /// Codabar 1D
    Codabar,
    /// Code 39 1D
    Code39,
    /// Code 93 1D
    Code93,
    /// Code 128 1D
    Code128,
    /// Data Matrix 2D
    DataMatrix,
    /// EAN-8 1D
    Ean8,
    /// EAN-13 1D
    Ean13,
    /// Interleaved 2 of 5
    Itf,
    /// MaxiCode 2D
    MaxiCode,
    /// PDF417 stacked
    Pdf417,
    /// QR Code 2D
    QrCode,
    /// GS1 DataBar (RSS-14)
    Rss14,
    /// GS1 DataBar Expanded
    RssExpanded,
    /// UPC-A 1D
    UpcA,
    /// UPC-E 1D
    UpcE,
    /// UPC/EAN 2- or 5-digit extension
    UpcEanExtension,
    /// MSI Plessey
    Msi,
    /// Plessey
    Plessey,
    /// USPS Intelligent Mail
    Imb,
}

impl BarcodeFormat {
    /// Every known format, in declaration order
    pub const ALL: [BarcodeFormat; 20] = [
        BarcodeFormat::Aztec,
        BarcodeFormat::Codabar,
        BarcodeFormat::Code39,
        BarcodeFormat::Code93,
        BarcodeFormat::Code128,
        BarcodeFormat::DataMatrix,
        BarcodeFormat::Ean8,
        BarcodeFormat::Ean13,
        BarcodeFormat::Itf,
        BarcodeFormat::MaxiCode,
        BarcodeFormat::Pdf417,
        BarcodeFormat::QrCode,
        BarcodeFormat::Rss14,
        BarcodeFormat::RssExpanded,
        BarcodeFormat::UpcA,
        BarcodeFormat::UpcE,
        BarcodeFormat::UpcEanExtension,
        BarcodeFormat::Msi,
        BarcodeFormat::Plessey,
        BarcodeFormat::Imb,
    ];

    /// Canonical upper-snake name, e.g. `QR_CODE`
    pub fn name(&self) -> &'static str {
        match self {
            BarcodeFormat::Aztec => "AZTEC",
            BarcodeFormat::Codabar => "CODABAR",
            BarcodeFormat::Code39 => "CODE_39",
            BarcodeFormat::Code93 => "CODE_93",
            BarcodeFormat::Code128 => "CODE_128",
            BarcodeFormat::DataMatrix => "DATA_MATRIX",
            BarcodeFormat::Ean8 => "EAN_8",
            BarcodeFormat::Ean13 => "EAN_13",
            BarcodeFormat::Itf => "ITF",
            BarcodeFormat::MaxiCode => "MAXICODE",
            BarcodeFormat::Pdf417 => "PDF_417",
            BarcodeFormat::QrCode => "QR_CODE",
            BarcodeFormat::Rss14 => "RSS_14",
            BarcodeFormat::RssExpanded => "RSS_EXPANDED",
            BarcodeFormat::UpcA => "UPC_A",
            BarcodeFormat::UpcE => "UPC_E",
            BarcodeFormat::UpcEanExtension => "UPC_EAN_EXTENSION",
            BarcodeFormat::Msi => "MSI",
            BarcodeFormat::Plessey => "PLESSEY",
            BarcodeFormat::Imb => "IMB",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a format name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown barcode format `{}`", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for BarcodeFormat {
    type Err = UnknownFormat;

    /// Accepts canonical names case-insensitively, with `-` or `_` separators
    /// or none at all (`qr_code`, `QR-CODE`, `qrcode`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        BarcodeFormat::ALL
            .iter()
            .copied()
            .find(|f| f.name().replace('_', "") == wanted)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
