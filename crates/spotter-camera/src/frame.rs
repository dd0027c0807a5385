use spotter_base::Tensor;
use std::sync::Arc;

/// One decoded camera frame.
///
/// Pixels are HWC RGB (`[height, width, 3]`) behind an `Arc`, so cloning a
/// frame is cheap: the bridge, the presentation state, and an in-flight
/// classification can all hold "the current frame" without copying pixels.
///
/// `seq` is the capture sequence number, assigned by the producing source in
/// capture order. The pipeline only ever cares about recency; there is no
/// other identity.
#[derive(Clone, Debug)]
pub struct Frame {
    pixels: Arc<Tensor<u8>>,
    seq: u64,
}

impl Frame {
    pub fn new(pixels: Tensor<u8>, seq: u64) -> Self {
        Self {
            pixels: Arc::new(pixels),
            seq,
        }
    }

    pub fn pixels(&self) -> &Tensor<u8> {
        &self.pixels
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn width(&self) -> u32 {
        if self.pixels.shape.len() == 3 {
            self.pixels.shape[1] as u32
        } else {
            0
        }
    }

    pub fn height(&self) -> u32 {
        if self.pixels.shape.len() == 3 {
            self.pixels.shape[0] as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let frame = Frame::new(Tensor::zeros(vec![480, 640, 3]).unwrap(), 7);
        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);
        assert_eq!(frame.seq(), 7);
    }

    #[test]
    fn test_clone_shares_pixels() {
        let frame = Frame::new(Tensor::zeros(vec![4, 4, 3]).unwrap(), 0);
        let copy = frame.clone();
        assert!(Arc::ptr_eq(&frame.pixels, &copy.pixels));
    }
}
