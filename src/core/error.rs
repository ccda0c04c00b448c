use thiserror::Error;

/// Failures the effect can run into. None of these surface to the page; the
/// session logs them and the effect simply does not appear.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("asset `{url}` failed to load: {reason}")]
    Asset { url: String, reason: String },
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("WebGPU unavailable: {0}")]
    Gpu(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidParam { key: &'static str, value: String },
}
