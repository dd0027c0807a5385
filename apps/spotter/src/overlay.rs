use crate::state::Overlay;

/// One-line human summary of an overlay, for the terminal.
pub fn describe(overlay: &Overlay) -> String {
    match overlay {
        Overlay::None => "no result yet".to_string(),
        Overlay::Detections(detections) if detections.is_empty() => {
            "0 objects".to_string()
        }
        Overlay::Detections(detections) => {
            let items: Vec<String> = detections
                .iter()
                .map(|d| {
                    format!(
                        "{} {:.0}% @ ({:.2}, {:.2}) {:.2}x{:.2}",
                        d.label,
                        d.confidence * 100.0,
                        d.bounds.origin.x,
                        d.bounds.origin.y,
                        d.bounds.size.x,
                        d.bounds.size.y
                    )
                })
                .collect();
            format!("{} objects: {}", detections.len(), items.join(", "))
        }
        Overlay::Label(label) => format!("label: {label}"),
    }
}

#[cfg(feature = "display")]
pub mod render {
    use crate::state::{Overlay, Snapshot};
    use spotter_base::Tensor;

    /// Convert HWC RGB pixels to packed ARGB u32 for minifb.
    pub fn rgb_to_argb(pixels: &Tensor<u8>, width: usize, height: usize) -> Vec<u32> {
        debug_assert!(
            pixels.data.len() >= width * height * 3,
            "RGB buffer too small: expected {} bytes, got {}",
            width * height * 3,
            pixels.data.len()
        );
        let mut argb = Vec::with_capacity(width * height);
        for i in 0..width * height {
            let idx = i * 3;
            let r = pixels.data[idx] as u32;
            let g = pixels.data[idx + 1] as u32;
            let b = pixels.data[idx + 2] as u32;
            argb.push((r << 16) | (g << 8) | b);
        }
        argb
    }

    const BOX_COLOR: u32 = 0x00ff_3030;

    /// Draw a 2px rectangle outline into an ARGB buffer.
    fn stroke_rect(buf: &mut [u32], width: usize, height: usize, x0: usize, y0: usize, x1: usize, y1: usize) {
        let x1 = x1.min(width.saturating_sub(1));
        let y1 = y1.min(height.saturating_sub(1));
        for t in 0..2usize {
            for x in x0..=x1 {
                for &y in &[y0 + t, y1.saturating_sub(t)] {
                    if y < height {
                        buf[y * width + x] = BOX_COLOR;
                    }
                }
            }
            for y in y0..=y1 {
                for &x in &[x0 + t, x1.saturating_sub(t)] {
                    if x < width {
                        buf[y * width + x] = BOX_COLOR;
                    }
                }
            }
        }
    }

    /// Render a snapshot into an ARGB frame buffer. Returns `None` until
    /// the first frame arrives.
    pub fn compose(snapshot: &Snapshot) -> Option<(Vec<u32>, usize, usize)> {
        let frame = snapshot.frame.as_ref()?;
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        if width == 0 || height == 0 {
            return None;
        }

        let mut buf = rgb_to_argb(frame.pixels(), width, height);
        if let Overlay::Detections(detections) = &snapshot.overlay {
            for detection in detections {
                let px = detection.bounds.to_pixels(width as u32, height as u32);
                let x0 = px.origin.x.max(0.0) as usize;
                let y0 = px.origin.y.max(0.0) as usize;
                let x1 = (px.origin.x + px.size.x).max(0.0) as usize;
                let y1 = (px.origin.y + px.size.y).max(0.0) as usize;
                stroke_rect(&mut buf, width, height, x0, y0, x1, y1);
            }
        }
        Some((buf, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotter_base::{Rect, Vec2};
    use spotter_infer::Detection;

    #[test]
    fn test_describe_empty_detections() {
        assert_eq!(describe(&Overlay::Detections(vec![])), "0 objects");
    }

    #[test]
    fn test_describe_label() {
        assert_eq!(
            describe(&Overlay::Label("dog".to_string())),
            "label: dog"
        );
    }

    #[test]
    fn test_describe_detections_lists_each() {
        let overlay = Overlay::Detections(vec![Detection {
            label: "cat".to_string(),
            bounds: Rect::new(Vec2::new(0.25, 0.5), Vec2::new(0.1, 0.2)),
            confidence: 0.75,
        }]);
        let text = describe(&overlay);
        assert!(text.starts_with("1 objects"));
        assert!(text.contains("cat 75%"));
    }

    #[test]
    fn test_describe_no_result() {
        assert_eq!(describe(&Overlay::None), "no result yet");
    }
}
