use std::fmt;

/// Opaque scene identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SceneSelector(pub u32);

impl SceneSelector {
    /// Built-in editor scene.
    pub const LEVEL_EDITOR: SceneSelector = SceneSelector(0);

    /// Built-in level scene.
    pub const LEVEL: SceneSelector = SceneSelector(1);
}

impl fmt::Display for SceneSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
