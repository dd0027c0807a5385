//! Image decoding for the spotter pipeline.
//!
//! A thin wrapper around the `image` crate that turns encoded capture
//! buffers (MJPEG frames in practice) into the pipeline's one canonical
//! frame format: HWC `Tensor<u8>` with RGB channels,
//! `[height, width, 3]`.

pub mod error;

pub use error::ImageError;

use spotter_base::Tensor;

/// Decode encoded image bytes into an RGB tensor.
///
/// The format is auto-detected. Whatever the source pixel type, the result
/// is converted to 8-bit RGB; alpha is dropped. This is intentional: every
/// consumer downstream (bridge, presentation, inference preprocess) works
/// on exactly one layout.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the bytes are invalid or the format is
/// unsupported.
pub fn decode_rgb(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let img = image::load_from_memory(data)?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let shape = vec![height as usize, width as usize, 3];
    let tensor = Tensor::new(shape, rgb.into_raw())?;
    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_rgb_shape_and_pixels() {
        let mut img = RgbImage::new(4, 2);
        for (x, _y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgb([x as u8 * 10, 128, 255]);
        }
        let bytes = encode_png(img);

        let tensor = decode_rgb(&bytes).unwrap();
        assert_eq!(tensor.shape, vec![2, 4, 3]);
        // First pixel of the first row
        assert_eq!(&tensor.data[0..3], &[0, 128, 255]);
        // Second pixel
        assert_eq!(&tensor.data[3..6], &[10, 128, 255]);
    }

    #[test]
    fn test_decode_rgb_rejects_garbage() {
        let result = decode_rgb(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_decode_rgb_drops_alpha() {
        let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 200]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();

        let tensor = decode_rgb(&buf).unwrap();
        assert_eq!(tensor.shape, vec![2, 2, 3]);
        assert_eq!(&tensor.data[0..3], &[10, 20, 30]);
    }
}
