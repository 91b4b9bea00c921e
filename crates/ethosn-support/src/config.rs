//! Build configuration of the support layer.

/// Settings injected by the host at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportConfig {
    /// Whether the layer is backed by real NPU hardware rather than a stub.
    pub hardware: bool,
}

impl SupportConfig {
    pub fn new(hardware: bool) -> Self {
        Self { hardware }
    }
}

impl Default for SupportConfig {
    /// Hardware presence as selected by the `hw` cargo feature.
    fn default() -> Self {
        Self::new(cfg!(feature = "hw"))
    }
}
