// Shared fixtures: fake PDF engine, scripted decoder, generated images.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use barcode_scan::decode::{DecodeFailure, DecodeHints, DecodedBarcode, Decoder};
use barcode_scan::error::{Result, ScanError};
use barcode_scan::render::{PdfEngine, RasterDocument, Viewport};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

// ---- PDF engine ----

/// Page sizes in points; bytes passed to `open` are ignored.
#[derive(Default)]
pub struct FakePdfEngine {
    pub pages: Vec<(f32, f32)>,
    pub fail_open: bool,
    /// 1-based page numbers whose render fails.
    pub failing_renders: Vec<u32>,
    /// 1-based page numbers whose viewport lookup fails.
    pub missing_viewports: Vec<u32>,
}

impl FakePdfEngine {
    pub fn with_pages(pages: &[(f32, f32)]) -> Self {
        Self {
            pages: pages.to_vec(),
            ..Self::default()
        }
    }
}

struct FakeDocument<'a> {
    engine: &'a FakePdfEngine,
}

impl PdfEngine for FakePdfEngine {
    fn open<'a>(&'a self, _data: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>> {
        if self.fail_open {
            return Err(ScanError::pdf_load("not a PDF"));
        }
        Ok(Box::new(FakeDocument { engine: self }))
    }
}

impl RasterDocument for FakeDocument<'_> {
    fn page_count(&self) -> u32 {
        self.engine.pages.len() as u32
    }

    fn viewport(&self, page_number: u32, scale: f32) -> Result<Viewport> {
        if self.engine.missing_viewports.contains(&page_number) {
            return Err(ScanError::render(format!("page {page_number} missing")));
        }
        let (w, h) = self
            .engine
            .pages
            .get(page_number as usize - 1)
            .copied()
            .ok_or_else(|| ScanError::render("page out of range"))?;
        Ok(Viewport::from_points(w, h, scale))
    }

    fn render(&self, page_number: u32, viewport: &Viewport) -> Result<DynamicImage> {
        if self.engine.failing_renders.contains(&page_number) {
            return Err(ScanError::render(format!("page {page_number} exploded")));
        }
        Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            viewport.width,
            viewport.height,
            Rgba([255, 255, 255, 255]),
        )))
    }
}

// ---- Decoder ----

/// Answers by surface width; widths without a script are "not found".
/// Records the hints of every call.
#[derive(Default)]
pub struct ScriptedDecoder {
    pub by_width: HashMap<u32, std::result::Result<Vec<DecodedBarcode>, DecodeFailure>>,
    pub seen_hints: Mutex<Vec<DecodeHints>>,
}

impl ScriptedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decodes(mut self, width: u32, texts: &[&str]) -> Self {
        let barcodes = texts
            .iter()
            .map(|t| DecodedBarcode::new(*t, "QR_CODE"))
            .collect();
        self.by_width.insert(width, Ok(barcodes));
        self
    }

    pub fn fails(mut self, width: u32) -> Self {
        self.by_width
            .insert(width, Err(DecodeFailure::Malformed("scripted failure".into())));
        self
    }
}

impl Decoder for ScriptedDecoder {
    fn decode_multi(
        &self,
        _luma: &[u8],
        width: u32,
        _height: u32,
        hints: &DecodeHints,
    ) -> std::result::Result<Vec<DecodedBarcode>, DecodeFailure> {
        self.seen_hints
            .lock()
            .expect("hints lock poisoned")
            .push(hints.clone());
        self.by_width
            .get(&width)
            .cloned()
            .unwrap_or(Err(DecodeFailure::NotFound))
    }
}

// ---- Images ----

pub fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encoding PNG should succeed");
    buf.into_inner()
}

pub fn blank_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([255, 255, 255, 255]),
    )))
}

/// A QR code for `text` drawn black on white with a wide margin.
pub fn qr_image(text: &str) -> DynamicImage {
    use rxing::{BarcodeFormat, MultiFormatWriter, Writer};

    let matrix = MultiFormatWriter::default()
        .encode(text, &BarcodeFormat::QR_CODE, 240, 240)
        .expect("QR encoding should succeed");

    let margin = 40;
    let width = matrix.getWidth() + margin * 2;
    let height = matrix.getHeight() + margin * 2;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for y in 0..matrix.getHeight() {
        for x in 0..matrix.getWidth() {
            if matrix.get(x, y) {
                img.put_pixel(x + margin, y + margin, Rgba([0, 0, 0, 255]));
            }
        }
    }
    DynamicImage::ImageRgba8(img)
}

pub fn qr_png(text: &str) -> Vec<u8> {
    encode_png(&qr_image(text))
}
