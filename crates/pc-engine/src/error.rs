use std::fmt;

use pc_core::CircuitError;

#[derive(Debug)]
pub enum EngineError {
    Circuit(CircuitError),
    InvalidConfig(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Circuit(e) => write!(f, "plate circuit error: {e}"),
            EngineError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<CircuitError> for EngineError {
    fn from(e: CircuitError) -> Self {
        EngineError::Circuit(e)
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::InvalidConfig(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
