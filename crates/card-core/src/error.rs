/// Convenience result type used across the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Lookup failures at the string boundary between UI controls and the core.
///
/// The compositors and the preset overlay are lenient and never produce these;
/// only explicit lookups by id (catalog selection, single-parameter writes) do.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown effect id: {0}")]
    UnknownEffect(String),

    #[error("unknown preset id: {0}")]
    UnknownPreset(String),

    #[error("unknown environment scene: {0}")]
    UnknownScene(String),

    #[error("unknown lighting preset: {0}")]
    UnknownLighting(String),

    #[error("unknown material settings: {0}")]
    UnknownMaterial(String),
}
