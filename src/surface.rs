// Drawing surfaces and their container
//
// A surface is an RGBA pixel buffer, the target of image drawing and page
// rendering and the source of luma extraction for decoding.

use image::{DynamicImage, GrayImage, RgbaImage};

/// One drawing surface. A new surface is filled with transparent black.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Draw `image` with its top-left corner at (0, 0). Overflow is clipped.
    pub fn draw_at_origin(&mut self, image: &DynamicImage) {
        let rgba = image.to_rgba8();
        image::imageops::replace(&mut self.pixels, &rgba, 0, 0);
    }

    /// Single-channel luminance buffer. Alpha is ignored.
    pub fn to_luma(&self) -> GrayImage {
        image::imageops::grayscale(&self.pixels)
    }
}

/// Handle for a surface appended to a [`SurfaceContainer`].
///
/// Tickets issued before the last [`SurfaceContainer::clear`] are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceTicket {
    pub generation: u64,
    pub index: usize,
}

/// Ordered surfaces; order is append order.
#[derive(Debug, Default)]
pub struct SurfaceContainer {
    surfaces: Vec<Surface>,
    generation: u64,
}

impl SurfaceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every surface and start a new generation.
    pub fn clear(&mut self) {
        self.surfaces.clear();
        self.generation += 1;
    }

    /// Append a transparent surface of the given size and return its ticket.
    pub fn append(&mut self, width: u32, height: u32) -> SurfaceTicket {
        let index = self.surfaces.len();
        self.surfaces
            .push(Surface::new(width, height));
        SurfaceTicket {
            generation: self.generation,
            index,
        }
    }

    /// Draw a finished render onto the ticket's surface.
    ///
    /// Returns `false` and drops the image when the ticket predates the last clear.
    pub fn deliver(&mut self, ticket: SurfaceTicket, image: &DynamicImage) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale render"
            );
            return false;
        }
        match self.surfaces.get_mut(ticket.index) {
            Some(surface) => {
                surface.draw_at_origin(image);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, ticket: SurfaceTicket) -> Option<&Surface> {
        if ticket.generation != self.generation {
            return None;
        }
        self.surfaces.get(ticket.index)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
