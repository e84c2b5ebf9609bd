use crate::Thermodynamics::thermo_store::ThermoError;
use thiserror::Error;

/// rate-law kinds and evaluation of the temperature-dependent rate
/// coefficient k(T)
pub mod rate_coefficients;
/// single elementary reactions, irreversible and reversible, with their
/// stoichiometry columns and rate-law parameters
pub mod reactions;
/// a whole reaction system: ordered species list plus the collection of
/// reactions sharing the stoichiometry matrix pair
pub mod reaction_system;
/// parser of the JSON reaction-definition document into the in-memory record
/// consumed by the reaction system constructor
pub mod reaction_parser;

#[cfg(test)]
pub mod reaction_system_tests;

#[derive(Debug, Error)]
pub enum KineticsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("overflow in evaluation of rate coefficient at T = {temperature} K")]
    Overflow { temperature: f64 },
    #[error("underflow in evaluation of rate coefficient at T = {temperature} K")]
    Underflow { temperature: f64 },
    #[error("reaction index {index} is out of range, the system holds {len} reactions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid reaction document: {0}")]
    InvalidStructure(String),
    #[error("empty reaction document")]
    EmptyInput,
    #[error(transparent)]
    Thermo(#[from] ThermoError),
}
