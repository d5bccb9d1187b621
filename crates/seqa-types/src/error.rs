// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for the SEQA kernel.
///
/// The simulation itself is total; errors only arise while building
/// an engine from configuration or when the presentation layer asks
/// for parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeqaError {
    /// Invalid engine configuration (or unparseable JSON).
    #[error("config error: {0}")]
    Config(String),

    /// Simulation parameter outside the recognised domain.
    #[error("validation error: {0}")]
    Validation(String),
}

pub type SeqaResult<T> = Result<T, SeqaError>;
