use crate::expression::error::ExpressionError;
use crate::template::error::CompileError;

/// Convenience result type used across sceneplate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by the public template APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Structural compilation of a template failed.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// Validation or evaluation of a data-binding expression failed.
    #[error("expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Invalid caller-supplied options.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`SceneError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Source line of the template node that caused the error, when known.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Compile(e) => Some(e.line),
            Self::Expression(e) => e.line,
            Self::Serde(_) | Self::Config(_) | Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
