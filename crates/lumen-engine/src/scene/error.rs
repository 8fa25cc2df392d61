use std::fmt;

use crate::render::ShaderError;

use super::SceneSelector;

/// Errors raised while activating a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No factory is registered for the selector.
    UnknownScene(SceneSelector),

    /// Shader compilation or program linking failed during `init`.
    Shader(ShaderError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownScene(sel) => write!(f, "unknown scene {sel}"),
            SceneError::Shader(err) => write!(f, "scene shader error: {err}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Shader(err) => Some(err),
            SceneError::UnknownScene(_) => None,
        }
    }
}

impl From<ShaderError> for SceneError {
    fn from(err: ShaderError) -> Self {
        SceneError::Shader(err)
    }
}
