use thiserror::Error;

/// Errors raised by the landing page controllers and their DOM bindings.
///
/// Controllers never let a `MissingTarget` escape: a page without a countdown
/// display still gets a working carousel and working modals.
#[derive(Debug, Error)]
pub enum LandingError {
    #[error("render target not found: {id}")]
    MissingTarget { id: String },

    #[error("feature index {index} out of range for {count} items")]
    InvalidIndex { index: usize, count: usize },

    #[error("{field} value {value} exceeds maximum {max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("invalid landing config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("invalid landing config: {0}")]
    ConfigValue(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl LandingError {
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingTarget { id: id.into() }
    }

    pub fn is_missing_target(&self) -> bool {
        matches!(self, Self::MissingTarget { .. })
    }
}

pub type Result<T> = std::result::Result<T, LandingError>;
