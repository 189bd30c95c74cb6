//! Errors raised by the combat engine.
//!
//! Bad content data (unknown species, moves, statuses, stats) never shows up here: those cases fall
//! back to neutral behaviour. What remains are caller bugs and configuration failures.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A combatant was built with a level outside 1..=100.
    #[error("invalid level {level}: expected 1..=100")]
    InvalidLevel { level: u8 },

    /// A fainted combatant was asked to act.
    #[error("{name} has fainted and cannot act")]
    FaintedCombatant { name: String },

    /// The generator could not be seeded from OS entropy.
    #[error("random source unavailable: {0}")]
    RandomSource(String),

    /// Reference data failed to parse.
    #[error("invalid reference data: {0}")]
    Data(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Data(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
