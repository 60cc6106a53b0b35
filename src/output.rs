// Output area: decoded text or a user-facing error message

use serde::Serialize;

use crate::config::messages::Messages;
use crate::decode::DecodeReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    Normal,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    pub text: String,
    pub style: OutputStyle,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            text: String::new(),
            style: OutputStyle::Normal,
        }
    }
}

impl Output {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Normal,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Error,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_error(&self) -> bool {
        self.style == OutputStyle::Error
    }
}

/// Decoded texts joined by newlines, or the "no barcode found" message.
pub fn present(report: &DecodeReport, messages: &Messages) -> Output {
    let texts = report.texts();
    if texts.is_empty() {
        Output::error(messages.no_barcode_found)
    } else {
        Output::normal(texts.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodedBarcode, SurfaceOutcome};

    #[test]
    fn test_present_empty_report_is_error() {
        let output = present(&DecodeReport::default(), &Messages::default());
        assert_eq!(output, Output::error("no barcode found"));
    }

    #[test]
    fn test_present_joins_with_newlines() {
        let report = DecodeReport {
            outcomes: vec![
                SurfaceOutcome::Decoded {
                    barcodes: vec![
                        DecodedBarcode::new("ABC123", "qrcode"),
                        DecodedBarcode::new("XYZ", "ITF"),
                    ],
                },
                SurfaceOutcome::Malformed {
                    reason: "bad".into(),
                },
                SurfaceOutcome::Decoded {
                    barcodes: vec![DecodedBarcode::new("42", "EAN_13")],
                },
            ],
        };
        let output = present(&report, &Messages::default());
        assert_eq!(output, Output::normal("ABC123\nXYZ\n42"));
    }

    #[test]
    fn test_clear_keeps_nothing_visible() {
        let mut output = Output::error("boom");
        output.clear();
        assert!(output.text.is_empty());
        assert!(!output.is_error());
    }
}
