//! Error hierarchy. Configuration errors surface synchronously from
//! validation; pipeline errors surface from `Generator::generate`.
//! Pathfinding failure is not represented here — it is a normal outcome
//! reported through `PathResult::success`, never an `Err`.

use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum ConfigError {
    #[error("unsupported generation algorithm: {0:?} (only Voronoi is implemented)")]
    UnsupportedAlgorithm(crate::config::GenerationAlgorithm),

    #[error("field `{field}` out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Clone, Debug, Error)]
pub enum GenerationError {
    #[error("configuration invalid: {0}")]
    Config(#[from] ConfigError),

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("generation cancelled")]
    Cancelled,
}
