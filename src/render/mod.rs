#[cfg(feature = "pdfium")]
pub mod pdfium;

use image::DynamicImage;

/// Page geometry at a scale factor, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

impl Viewport {
    /// Multiply page size in points by `scale` and floor to whole pixels.
    pub fn from_points(width_pts: f32, height_pts: f32, scale: f32) -> Self {
        Self {
            width: to_pixels(width_pts, scale),
            height: to_pixels(height_pts, scale),
            scale,
        }
    }
}

fn to_pixels(points: f32, scale: f32) -> u32 {
    let px = (points * scale).floor();
    if px.is_finite() && px > 0.0 {
        px as u32
    } else {
        0
    }
}

/// An opened PDF document.
///
/// Page numbers are 1-based.
pub trait RasterDocument {
    fn page_count(&self) -> u32;

    fn viewport(&self, page_number: u32, scale: f32) -> crate::error::Result<Viewport>;

    fn render(&self, page_number: u32, viewport: &Viewport) -> crate::error::Result<DynamicImage>;
}

/// Something that can open PDF bytes.
pub trait PdfEngine {
    fn open<'a>(&'a self, data: &'a [u8]) -> crate::error::Result<Box<dyn RasterDocument + 'a>>;
}

impl<T: PdfEngine + ?Sized> PdfEngine for Box<T> {
    fn open<'a>(&'a self, data: &'a [u8]) -> crate::error::Result<Box<dyn RasterDocument + 'a>> {
        (**self).open(data)
    }
}

/// Engine that refuses every PDF, used when no PDF backend is available.
#[derive(Debug, Clone)]
pub struct UnavailablePdfEngine {
    reason: String,
}

impl UnavailablePdfEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailablePdfEngine {
    fn default() -> Self {
        Self::new("built without PDF support (enable the `pdfium` feature)")
    }
}

impl PdfEngine for UnavailablePdfEngine {
    fn open<'a>(&'a self, _data: &'a [u8]) -> crate::error::Result<Box<dyn RasterDocument + 'a>> {
        Err(crate::error::ScanError::pdf_load(self.reason.clone()))
    }
}
