use crate::InferError;
use spotter_base::Tensor;

/// Prepare an HWC RGB frame for the model: stretch-resize to a `size` x
/// `size` square (scale-fill, no letterboxing, so normalized boxes map
/// straight back onto the frame), convert to NCHW `[1, 3, size, size]`,
/// and normalize 0-255 to 0-1.
pub fn scale_fill(pixels: &Tensor<u8>, size: u32) -> Result<Tensor<f32>, InferError> {
    let (h, w, c) = pixels.dims_hwc()?;
    if c != 3 {
        return Err(InferError::Shape(format!(
            "expected 3 channels (RGB), got {c}"
        )));
    }
    if h == 0 || w == 0 {
        return Err(InferError::Shape(format!(
            "image dimensions must be non-zero, got {h}x{w}"
        )));
    }

    let size = size as usize;
    let mut data = vec![0.0f32; 3 * size * size];

    // Nearest-neighbor sample per output pixel, writing each channel plane.
    let plane = size * size;
    for oy in 0..size {
        let sy = (oy * h) / size;
        for ox in 0..size {
            let sx = (ox * w) / size;
            let src = (sy * w + sx) * 3;
            let dst = oy * size + ox;
            data[dst] = pixels.data[src] as f32 / 255.0;
            data[plane + dst] = pixels.data[src + 1] as f32 / 255.0;
            data[2 * plane + dst] = pixels.data[src + 2] as f32 / 255.0;
        }
    }

    Ok(Tensor::new(vec![1, 3, size, size], data)?)
}
