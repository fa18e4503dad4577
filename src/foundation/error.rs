pub type ReplayResult<T> = Result<T, ReplayError>;

#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("rotation store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReplayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that mean "nothing to show yet" rather than a fault.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable(_))
    }
}
