use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Teams have not been assigned: {0}")]
    TeamsNotAssigned(&'static str),

    #[error("Game modifiers not initialized: call initialize_game_modifiers() first")]
    ModifiersNotInitialized,

    #[error("Invalid roster for {team}: {reason}")]
    InvalidRoster { team: String, reason: String },

    #[error("Schema version mismatch: found {found}, expected {expected}")]
    SchemaVersionMismatch { found: u8, expected: u8 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SimError {
    /// Whether the caller can recover by fixing its own setup sequence.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SimError::TeamsNotAssigned(_) | SimError::ModifiersNotInitialized
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            SimError::Deserialization(err.to_string())
        } else {
            SimError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
