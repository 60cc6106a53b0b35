pub mod rxing;
pub mod trigger;

use ::rxing::BarcodeFormat;
use serde::Serialize;

use crate::config::settings::Settings;
use crate::error::ScanError;

/// Accepted names for `possible_formats`, matched case-insensitively.
const FORMAT_NAMES: &[(&str, BarcodeFormat)] = &[
    ("aztec", BarcodeFormat::AZTEC),
    ("codabar", BarcodeFormat::CODABAR),
    ("code39", BarcodeFormat::CODE_39),
    ("code93", BarcodeFormat::CODE_93),
    ("code128", BarcodeFormat::CODE_128),
    ("datamatrix", BarcodeFormat::DATA_MATRIX),
    ("ean8", BarcodeFormat::EAN_8),
    ("ean13", BarcodeFormat::EAN_13),
    ("itf", BarcodeFormat::ITF),
    ("maxicode", BarcodeFormat::MAXICODE),
    ("pdf417", BarcodeFormat::PDF_417),
    ("qrcode", BarcodeFormat::QR_CODE),
    ("rss14", BarcodeFormat::RSS_14),
    ("rssexpanded", BarcodeFormat::RSS_EXPANDED),
    ("upca", BarcodeFormat::UPC_A),
    ("upce", BarcodeFormat::UPC_E),
    ("upceanextension", BarcodeFormat::UPC_EAN_EXTENSION),
];

/// Look up a format by name. `_`, `-` and spaces are ignored, so `qr_code`,
/// `QR-Code` and `qrcode` are the same format.
pub fn parse_format(name: &str) -> crate::error::Result<BarcodeFormat> {
    let normalized: String = name
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect::<String>()
        .to_ascii_lowercase();

    FORMAT_NAMES
        .iter()
        .find(|(n, _)| *n == normalized)
        .map(|(_, f)| f)
        .cloned()
        .ok_or_else(|| ScanError::config(format!("Unknown barcode format: '{name}'")))
}

/// Name used for a format in reports, the same spelling `parse_format` accepts.
pub fn format_name(format: &BarcodeFormat) -> String {
    FORMAT_NAMES
        .iter()
        .find(|(_, f)| f == format)
        .map(|(n, _)| (*n).to_string())
        .unwrap_or_else(|| {
            format!("{format:?}")
                .chars()
                .filter(|c| *c != '_')
                .collect::<String>()
                .to_ascii_lowercase()
        })
}

/// Immutable decoder hints, built once and passed into every decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeHints {
    pub try_harder: bool,
    /// Empty means every supported format.
    pub possible_formats: Vec<BarcodeFormat>,
}

impl Default for DecodeHints {
    fn default() -> Self {
        Self {
            try_harder: true,
            possible_formats: Vec::new(),
        }
    }
}

impl DecodeHints {
    pub fn from_settings(settings: &Settings) -> crate::error::Result<Self> {
        let mut possible_formats = Vec::new();
        for name in &settings.possible_formats {
            let format = parse_format(name)?;
            if !possible_formats.contains(&format) {
                possible_formats.push(format);
            }
        }
        Ok(Self {
            try_harder: settings.try_harder,
            possible_formats,
        })
    }
}

/// One decoded symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedBarcode {
    pub text: String,
    pub format: String,
}

impl DecodedBarcode {
    pub fn new(text: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: format.into(),
        }
    }
}

/// Why a decoder produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    NotFound,
    Malformed(String),
}

/// Multi-symbol barcode decoder over a luma buffer.
///
/// `luma` holds `width * height` bytes, row-major.
pub trait Decoder: Sync {
    fn decode_multi(
        &self,
        luma: &[u8],
        width: u32,
        height: u32,
        hints: &DecodeHints,
    ) -> Result<Vec<DecodedBarcode>, DecodeFailure>;
}

impl<T: Decoder + ?Sized> Decoder for &T {
    fn decode_multi(
        &self,
        luma: &[u8],
        width: u32,
        height: u32,
        hints: &DecodeHints,
    ) -> Result<Vec<DecodedBarcode>, DecodeFailure> {
        (**self).decode_multi(luma, width, height, hints)
    }
}

/// Decode result for one surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SurfaceOutcome {
    Decoded { barcodes: Vec<DecodedBarcode> },
    NoSymbols,
    Malformed { reason: String },
}

impl SurfaceOutcome {
    pub fn from_result(result: Result<Vec<DecodedBarcode>, DecodeFailure>) -> Self {
        match result {
            Ok(barcodes) if barcodes.is_empty() => SurfaceOutcome::NoSymbols,
            Ok(barcodes) => SurfaceOutcome::Decoded { barcodes },
            Err(DecodeFailure::NotFound) => SurfaceOutcome::NoSymbols,
            Err(DecodeFailure::Malformed(reason)) => SurfaceOutcome::Malformed { reason },
        }
    }

    pub fn barcodes(&self) -> &[DecodedBarcode] {
        match self {
            SurfaceOutcome::Decoded { barcodes } => barcodes,
            _ => &[],
        }
    }
}

/// Outcomes for every surface, in surface order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub outcomes: Vec<SurfaceOutcome>,
}

impl DecodeReport {
    /// All decoded texts, surface order first, then decode order within a surface.
    pub fn texts(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .flat_map(|o| o.barcodes())
            .map(|b| b.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_normalizes_names() {
        assert_eq!(parse_format("qrcode").unwrap(), BarcodeFormat::QR_CODE);
        assert_eq!(parse_format("qrcode").unwrap(), BarcodeFormat::QR_CODE);
        assert_eq!(parse_format("qr-code").unwrap(), BarcodeFormat::QR_CODE);
        assert_eq!(parse_format("ITF").unwrap(), BarcodeFormat::ITF);
        assert_eq!(parse_format("Code 128").unwrap(), BarcodeFormat::CODE_128);
    }

    #[test]
    fn test_parse_format_unknown() {
        assert!(matches!(
            parse_format("hologram"),
            Err(ScanError::ConfigError(_))
        ));
    }

    #[test]
    fn test_format_name_matches_config_spelling() {
        assert_eq!(format_name(&BarcodeFormat::QR_CODE), "qrcode");
        assert_eq!(format_name(&BarcodeFormat::CODE_128), "code128");
        assert_eq!(format_name(&BarcodeFormat::MICRO_QR_CODE), "microqrcode");
        for (name, format) in FORMAT_NAMES {
            assert_eq!(parse_format(&format_name(format)).unwrap(), *format, "{name}");
        }
    }

    #[test]
    fn test_hints_from_default_settings() {
        let hints = DecodeHints::from_settings(&Settings::default()).unwrap();
        assert_eq!(hints, DecodeHints::default());
        assert!(hints.try_harder);
        assert!(hints.possible_formats.is_empty());
    }

    #[test]
    fn test_hints_dedup_formats() {
        let settings = Settings {
            possible_formats: vec!["itf".into(), "qrcode".into(), "ITF".into()],
            try_harder: false,
            ..Settings::default()
        };
        let hints = DecodeHints::from_settings(&settings).unwrap();
        assert!(!hints.try_harder);
        assert_eq!(
            hints.possible_formats,
            vec![BarcodeFormat::ITF, BarcodeFormat::QR_CODE]
        );
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(
            SurfaceOutcome::from_result(Ok(vec![])),
            SurfaceOutcome::NoSymbols
        );
        assert_eq!(
            SurfaceOutcome::from_result(Err(DecodeFailure::NotFound)),
            SurfaceOutcome::NoSymbols
        );
        assert_eq!(
            SurfaceOutcome::from_result(Err(DecodeFailure::Malformed("bad".into()))),
            SurfaceOutcome::Malformed {
                reason: "bad".into()
            }
        );
        let decoded = SurfaceOutcome::from_result(Ok(vec![DecodedBarcode::new("A", "qrcode")]));
        assert_eq!(decoded.barcodes().len(), 1);
    }

    #[test]
    fn test_report_texts_preserve_order() {
        let report = DecodeReport {
            outcomes: vec![
                SurfaceOutcome::Decoded {
                    barcodes: vec![
                        DecodedBarcode::new("first", "qrcode"),
                        DecodedBarcode::new("second", "itf"),
                    ],
                },
                SurfaceOutcome::NoSymbols,
                SurfaceOutcome::Decoded {
                    barcodes: vec![DecodedBarcode::new("third", "qrcode")],
                },
            ],
        };
        assert_eq!(report.texts(), vec!["first", "second", "third"]);
    }
}
