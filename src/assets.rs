use crate::error::{AgifError, AgifResult};

/// A frame image decoded to straight-alpha RGBA8.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub rgba8: Vec<u8>,
}

/// Decode an encoded still image (PNG etc.) into RGBA8 pixels.
///
/// This is the default image-decode capability used by host implementations
/// and the CLI; playback load funnels frame payloads through it.
pub fn decode_image_rgba8(bytes: &[u8]) -> AgifResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| AgifError::asset_decode(format!("decode frame image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PreparedImage {
        width,
        height,
        rgba8: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_png_dimensions_and_pixels() {
        let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let prepared = decode_image_rgba8(&buf).unwrap();
        assert_eq!(prepared.width, 1);
        assert_eq!(prepared.height, 1);
        assert_eq!(prepared.rgba8, vec![100, 50, 200, 128]);
    }

    #[test]
    fn garbage_bytes_are_an_asset_decode_error() {
        let err = decode_image_rgba8(b"not an image").unwrap_err();
        assert!(matches!(err, AgifError::AssetDecode(_)), "{err}");
    }
}
