//! Error taxonomy for the reel pipeline

/// Convenience result type used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors surfaced by loading, configuring, and encoding.
///
/// Simulation itself never fails: degenerate vectors are resolved in place
/// and the bounce phase is bounded by a frame cap.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Sprite image missing, unreadable, or the wrong shape.
    #[error("asset error: {0}")]
    Asset(String),

    /// Configuration values that cannot produce an animation.
    #[error("config error: {0}")]
    Config(String),

    /// The animation encoder rejected the frames.
    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl ReelError {
    /// Build a [`ReelError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ReelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
