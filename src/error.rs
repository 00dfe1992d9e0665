use thiserror::Error;

/// Result type alias for tracker construction.
pub type Result<T> = std::result::Result<T, TrackError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("invalid frame size {width}x{height}: both dimensions must be non-zero")]
    InvalidFrameSize { width: u32, height: u32 },
    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),
}

impl TrackError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
