/// Which model variant an invocation runs.
///
/// Fast trades input resolution for latency; Accurate is the slower,
/// higher-fidelity profile. The profile is chosen before invocation and can
/// be switched between invocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelProfile {
    Fast,
    Accurate,
}

impl ModelProfile {
    /// Square model input edge in pixels for this profile.
    pub fn input_size(self) -> u32 {
        match self {
            ModelProfile::Fast => 320,
            ModelProfile::Accurate => 640,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ModelProfile::Fast => ModelProfile::Accurate,
            ModelProfile::Accurate => ModelProfile::Fast,
        }
    }
}

impl std::fmt::Display for ModelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelProfile::Fast => write!(f, "fast"),
            ModelProfile::Accurate => write!(f, "accurate"),
        }
    }
}
