/// Convenience result type used across Loom.
pub type LoomResult<T> = Result<T, LoomError>;

/// Top-level error taxonomy used by library APIs.
///
/// None of these are fatal to an interactive session: the controller decides the fallback for
/// each boundary (see [`crate::LoomApp`]).
#[derive(thiserror::Error, Debug)]
pub enum LoomError {
    /// Invalid user-provided input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Key-value persistence was unavailable, full, or returned unusable data.
    #[error("storage error: {0}")]
    Storage(String),

    /// The card could not be rasterized.
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding, clipboard, or download failures.
    #[error("export error: {0}")]
    Export(String),

    /// Host environment queries or lifecycle signals failed.
    #[error("host error: {0}")]
    Host(String),

    /// Errors when serializing or deserializing persisted data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoomError {
    /// Build a [`LoomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LoomError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`LoomError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LoomError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`LoomError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`LoomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LoomError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
