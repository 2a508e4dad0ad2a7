//! Error types for Orrery
//!
//! Degraded visual conditions (pool exhaustion, missed shots, unmounted
//! render targets) are not errors; they fall back silently. `OrreryError`
//! covers genuine misuse: malformed configuration tables and values a
//! scene cannot be built from.

use thiserror::Error;

/// The main error type for Orrery operations
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("Invalid ring config: {0}")]
    InvalidRingConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Empty ring table: a particle field needs at least one ring")]
    EmptyRingTable,

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Convenience Result type for Orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;
