use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Ball {ball} is outside 1..={ball_count}")]
    BallOutOfRange { ball: u32, ball_count: u32 },

    #[error("No outcome at index {0}")]
    OutcomeNotFound(usize),

    #[error("No outcome labelled '{0}'")]
    UnknownOutcome(String),

    #[error("Outcome '{text}' already has all {capacity} balls assigned")]
    OutcomeFull { text: String, capacity: u32 },

    #[error("All {ball_count} balls are already allotted to outcomes")]
    NoCapacity { ball_count: u32 },

    #[error("Assignments are incomplete: {0}")]
    Incomplete(String),

    #[error("Ball {0} has already been drawn")]
    AlreadyDrawn(u32),

    #[error("Ball {0} is still being revealed")]
    DrawInFlight(u32),

    #[error("No reveal in progress")]
    NoRevealPending,

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GameError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for ordinary rule rejections: the game carries on unchanged.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::Config(_) | Self::Serialization(_) | Self::Internal(_)
        )
    }
}
