use std::path::PathBuf;

pub enum ModelSource {
    /// Model weights on disk.
    File(PathBuf),
    /// Model weights already in memory.
    Memory(Vec<u8>),
    /// No weights: the backend brings its own behavior (heuristic backend).
    Builtin,
}
