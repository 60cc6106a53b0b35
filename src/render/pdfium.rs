// pdfium-render wrapper: PDF bytes -> page viewports -> DynamicImage (in-memory only)

use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::PathBuf;

use super::{PdfEngine, RasterDocument, Viewport};
use crate::error::ScanError;

/// Resolves the path to the pdfium shared library.
///
/// Search order:
/// 1. `PDFIUM_DYNAMIC_LIB_PATH` environment variable
/// 2. `vendor/pdfium/lib/` relative to the project root (for development)
///
/// Returns `Ok(None)` when neither is present so the caller can fall back to
/// the system library.
fn resolve_pdfium_lib_path() -> crate::error::Result<Option<PathBuf>> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        return Err(ScanError::render(format!(
            "PDFIUM_DYNAMIC_LIB_PATH is set to '{}' but the path does not exist",
            path
        )));
    }

    // In development, CARGO_MANIFEST_DIR points to the project root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let vendor_path = PathBuf::from(&manifest_dir).join("vendor/pdfium/lib");
        if vendor_path.exists() {
            return Ok(Some(vendor_path));
        }
    }

    Ok(None)
}

/// Creates a new Pdfium instance by dynamically loading the shared library.
fn create_pdfium() -> crate::error::Result<Pdfium> {
    let bindings = match resolve_pdfium_lib_path()? {
        Some(lib_path) => {
            let lib_path_str = lib_path.to_str().ok_or_else(|| {
                ScanError::render("pdfium library path contains non-UTF-8 characters")
            })?;
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(lib_path_str))
        }
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| {
        ScanError::render(format!(
            "pdfium library not found ({e}): set PDFIUM_DYNAMIC_LIB_PATH or place libpdfium in vendor/pdfium/lib/"
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// [`PdfEngine`] backed by a dynamically loaded pdfium library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind to pdfium once; the engine is reused for every PDF.
    ///
    /// # Errors
    /// Returns `ScanError::RenderError` if the shared library cannot be found or bound.
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self {
            pdfium: create_pdfium()?,
        })
    }
}

impl PdfEngine for PdfiumEngine {
    fn open<'a>(&'a self, data: &'a [u8]) -> crate::error::Result<Box<dyn RasterDocument + 'a>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| ScanError::pdf_load(e.to_string()))?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumDocument<'a> {
    fn page(&self, page_number: u32) -> crate::error::Result<PdfPage<'a>> {
        let page_index = page_number
            .checked_sub(1)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| ScanError::render(format!("invalid page number {page_number}")))?;

        Ok(self.document.pages().get(page_index)?)
    }
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> u32 {
        u32::from(self.document.pages().len())
    }

    fn viewport(&self, page_number: u32, scale: f32) -> crate::error::Result<Viewport> {
        let page = self.page(page_number)?;
        Ok(Viewport::from_points(
            page.width().value,
            page.height().value,
            scale,
        ))
    }

    /// Renders the page so that it exactly fills the viewport.
    ///
    /// # Errors
    /// Returns `ScanError::RenderError` if the page is out of range, the viewport
    /// is empty, or pdfium fails to render.
    fn render(&self, page_number: u32, viewport: &Viewport) -> crate::error::Result<DynamicImage> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(ScanError::render(format!(
                "page {page_number} has an empty viewport ({}x{})",
                viewport.width, viewport.height
            )));
        }

        let page = self.page(page_number)?;

        let width_px = i32::try_from(viewport.width)
            .map_err(|_| ScanError::render("viewport width exceeds i32 range"))?;
        let height_px = i32::try_from(viewport.height)
            .map_err(|_| ScanError::render("viewport height exceeds i32 range"))?;

        let config = PdfRenderConfig::new()
            .set_target_width(width_px)
            .set_target_height(height_px);

        let bitmap = page.render_with_config(&config)?;

        Ok(bitmap.as_image())
    }
}
