/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::io;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("destination must differ from origin (origin {origin}, destination {destination})")]
    InvalidPassenger { origin: u8, destination: u8 },

    #[error("a building needs at least 2 floors, got {0}")]
    InvalidFloorCount(u8),

    #[error("invalid spawn interval [{min}, {max}] ms")]
    InvalidSpawnInterval { min: f64, max: f64 },

    #[error("invalid elevator configuration: {0}")]
    InvalidElevatorConfig(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<toml::de::Error> for SimError {
    fn from(err: toml::de::Error) -> Self {
        SimError::Config(err.to_string())
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
