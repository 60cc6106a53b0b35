// rxing wrapper: luma buffer -> decoded symbols

use std::collections::{HashMap, HashSet};
use std::panic::{AssertUnwindSafe, catch_unwind};

use ::rxing::{DecodeHintType, DecodeHintValue, DecodingHintDictionary, Exceptions};

use super::{DecodeFailure, DecodeHints, DecodedBarcode, Decoder, format_name};

/// [`Decoder`] backed by rxing's multi-barcode reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct RxingDecoder;

impl RxingDecoder {
    pub fn new() -> Self {
        Self
    }
}

/// TRY_HARDER is always set: the rxing helper turns it on when it is absent.
fn to_rxing_hints(hints: &DecodeHints) -> DecodingHintDictionary {
    let mut rx = HashMap::new();
    rx.insert(
        DecodeHintType::TRY_HARDER,
        DecodeHintValue::TryHarder(hints.try_harder),
    );
    if !hints.possible_formats.is_empty() {
        let formats: HashSet<::rxing::BarcodeFormat> =
            hints.possible_formats.iter().copied().collect();
        rx.insert(
            DecodeHintType::POSSIBLE_FORMATS,
            DecodeHintValue::PossibleFormats(formats),
        );
    }
    rx
}

impl Decoder for RxingDecoder {
    fn decode_multi(
        &self,
        luma: &[u8],
        width: u32,
        height: u32,
        hints: &DecodeHints,
    ) -> Result<Vec<DecodedBarcode>, DecodeFailure> {
        let expected = width as usize * height as usize;
        if luma.len() != expected {
            return Err(DecodeFailure::Malformed(format!(
                "luma buffer has {} bytes, expected {width}x{height} = {expected}",
                luma.len()
            )));
        }
        if expected == 0 {
            return Err(DecodeFailure::NotFound);
        }

        let mut rx_hints = to_rxing_hints(hints);
        let buffer = luma.to_vec();

        // rxing panics on some degenerate inputs instead of returning an error
        let result = catch_unwind(AssertUnwindSafe(|| {
            ::rxing::helpers::detect_multiple_in_luma_with_hints(buffer, width, height, &mut rx_hints)
        }))
        .map_err(|_| DecodeFailure::Malformed("decoder panicked".to_string()))?;

        match result {
            Ok(results) => Ok(results
                .iter()
                .map(|r| DecodedBarcode::new(r.getText(), format_name(r.getBarcodeFormat())))
                .collect()),
            Err(Exceptions::NotFoundException(_)) => Err(DecodeFailure::NotFound),
            Err(e) => Err(DecodeFailure::Malformed(e.to_string())),
        }
    }
}
