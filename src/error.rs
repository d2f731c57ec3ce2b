//! Engine error type
//!
//! Only construction-time and I/O problems are errors. Data-shape issues in
//! level plans (unknown symbols, missing player, empty rows) degrade to empty
//! results instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Actor boxes must have non-negative width and height
    #[error("actor size must be non-negative, got ({width}, {height})")]
    NegativeSize { width: f64, height: f64 },

    /// Terrain symbols cannot be bound to actor factories
    #[error("symbol '{0}' is reserved for terrain")]
    ReservedSymbol(char),

    #[error("symbol '{0}' is already bound to an actor factory")]
    DuplicateSymbol(char),

    #[error("malformed level plan data: {0}")]
    PlanFormat(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
