/// Convenience result type used across pigment.
pub type PigmentResult<T> = Result<T, PigmentError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PigmentError {
    /// Invalid caller-provided arguments (opacity, dimensions, buffer sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Pixel formats that cannot be combined by the requested operation.
    #[error("format error: {0}")]
    Format(String),

    /// Failures while converting between color models or profiles.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// Worker pool construction or scheduling failures.
    #[error("pool error: {0}")]
    Pool(String),

    /// Errors when serializing or deserializing options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PigmentError {
    /// Build a [`PigmentError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PigmentError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`PigmentError::Conversion`] value.
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Build a [`PigmentError::Pool`] value.
    pub fn pool(msg: impl Into<String>) -> Self {
        Self::Pool(msg.into())
    }

    /// Build a [`PigmentError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
