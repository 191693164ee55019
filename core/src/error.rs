use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChoreoError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Host rejected game state: {reason}")]
    Host { reason: String },

    #[error("Roster mismatch: choreography needs {expected} drones, got {actual}")]
    RosterMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ChoreoResult<T> = Result<T, ChoreoError>;
