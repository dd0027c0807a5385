use spotter_base::Rect;

/// One recognized object within a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Semantic category name.
    pub label: String,
    /// Bounding box normalized to the unit square (origin + size in [0,1]).
    pub bounds: Rect<f32>,
    /// Model confidence in [0,1].
    pub confidence: f32,
}
