// Per-file scan: select -> decode -> summary

use serde::Serialize;

use crate::decode::{Decoder, SurfaceOutcome};
use crate::input::SelectedFile;
use crate::output::Output;
use crate::pipeline::scanner::Scanner;
use crate::render::PdfEngine;

/// One surface in a [`ScanResult`].
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSummary {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub outcome: SurfaceOutcome,
}

/// Result of scanning a single file.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub file: String,
    pub surfaces: Vec<SurfaceSummary>,
    pub output: Output,
}

impl ScanResult {
    /// Serialize as one JSON line.
    ///
    /// # Errors
    /// Returns `ScanError::ReportError` if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Select `file` and, if that succeeded, decode it.
///
/// A selection error (no file, bad type, load failure) skips decoding and is
/// returned as the output.
pub fn scan_file<D: Decoder, P: PdfEngine>(
    scanner: &mut Scanner<D, P>,
    file: &SelectedFile,
) -> ScanResult {
    if scanner.select_file(Some(file)).is_error() {
        return ScanResult {
            file: file.name.clone(),
            surfaces: Vec::new(),
            output: scanner.output().clone(),
        };
    }

    let report = scanner.decode();
    let surfaces = scanner
        .surfaces()
        .iter()
        .zip(report.outcomes)
        .enumerate()
        .map(|(index, (surface, outcome))| SurfaceSummary {
            index,
            width: surface.width(),
            height: surface.height(),
            outcome,
        })
        .collect();

    ScanResult {
        file: file.name.clone(),
        surfaces,
        output: scanner.output().clone(),
    }
}

/// Scan several files with the same scanner, in order.
/// One file failing does NOT prevent other files from being scanned.
pub fn scan_all<D: Decoder, P: PdfEngine>(
    scanner: &mut Scanner<D, P>,
    files: &[SelectedFile],
) -> Vec<ScanResult> {
    files.iter().map(|f| scan_file(scanner, f)).collect()
}
