// Image file -> one surface at natural size

use crate::surface::{SurfaceContainer, SurfaceTicket};

/// Decode `data` and draw it onto a new surface sized to the image.
///
/// Nothing is appended when decoding fails.
///
/// # Errors
/// Returns `ScanError::ImageLoadError` if the bytes are not a decodable image.
pub fn load_image(
    container: &mut SurfaceContainer,
    data: &[u8],
) -> crate::error::Result<SurfaceTicket> {
    let image = ::image::load_from_memory(data)?;

    let ticket = container.append(image.width(), image.height());
    container.deliver(ticket, &image);

    tracing::info!(
        width = image.width(),
        height = image.height(),
        "image loaded"
    );
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use ::image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([10, 20, 30, 255]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)
            .expect("encoding PNG should succeed");
        buf.into_inner()
    }

    #[test]
    fn test_load_image_creates_one_surface_at_natural_size() {
        let mut container = SurfaceContainer::new();
        let ticket = load_image(&mut container, &png_bytes(37, 11)).expect("load should succeed");

        assert_eq!(container.len(), 1);
        let surface = container.get(ticket).expect("surface should exist");
        assert_eq!(surface.width(), 37);
        assert_eq!(surface.height(), 11);
        assert_eq!(surface.pixels().get_pixel(36, 10).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_load_image_garbage_fails_without_surface() {
        let mut container = SurfaceContainer::new();
        let result = load_image(&mut container, b"definitely not an image");

        assert!(matches!(result, Err(ScanError::ImageLoadError(_))));
        assert!(container.is_empty());
    }
}
