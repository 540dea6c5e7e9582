use crate::lint::visual::GeometryViolations;
use crate::schema::validate::SchemaErrors;

/// Convenience result type used across scenesmith.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid caller-provided data (bad options, malformed ids, unsupported values).
    #[error("validation error: {0}")]
    Validation(String),

    /// The scene document does not have the expected shape. Carries every violation found.
    #[error("schema error:\n{0}")]
    Schema(SchemaErrors),

    /// A visual-lint rule rejected the scene.
    #[error("geometry error: {0}")]
    Geometry(GeometryViolations),

    /// A file or external asset could not be located or read.
    #[error("resource error: {0}")]
    Resource(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for structural failures (schema shape or visual lint).
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Schema(_) | Self::Geometry(_))
    }
}

impl From<SchemaErrors> for SceneError {
    fn from(value: SchemaErrors) -> Self {
        Self::Schema(value)
    }
}

impl From<GeometryViolations> for SceneError {
    fn from(value: GeometryViolations) -> Self {
        Self::Geometry(value)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
