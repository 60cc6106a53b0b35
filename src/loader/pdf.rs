// PDF file -> one surface per page at a fixed scale
//
// Surfaces are created in page order first, then every page is rendered and
// delivered before returning, so callers never see a half-rendered page.

use crate::render::{PdfEngine, Viewport};
use crate::surface::{SurfaceContainer, SurfaceTicket};

/// Rasterize every page of `data` into `container`.
///
/// Returns the number of surfaces created (the page count).
///
/// # Errors
/// - `ScanError::PdfLoadError` if the engine cannot open the document
/// - `ScanError::RenderError` if a page's viewport cannot be obtained
///
/// A failed render of one page is logged and leaves that surface blank.
pub fn load_pdf(
    engine: &dyn PdfEngine,
    container: &mut SurfaceContainer,
    data: &[u8],
    scale: f32,
) -> crate::error::Result<usize> {
    let document = engine.open(data)?;
    let page_count = document.page_count();

    // Phase A: viewports and surfaces, strictly in page order
    let mut pending: Vec<(u32, Viewport, SurfaceTicket)> = Vec::new();
    for page_number in 1..=page_count {
        let viewport = document.viewport(page_number, scale)?;
        let ticket = container.append(viewport.width, viewport.height);
        pending.push((page_number, viewport, ticket));
    }

    // Phase B: render and deliver
    for (page_number, viewport, ticket) in &pending {
        match document.render(*page_number, viewport) {
            Ok(bitmap) => {
                container.deliver(*ticket, &bitmap);
            }
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "page render failed");
            }
        }
    }

    tracing::info!(pages = page_count, scale, "pdf loaded");
    Ok(pending.len())
}
