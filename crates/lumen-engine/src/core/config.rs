use crate::paint::Color;
use crate::scene::SceneSelector;

/// Application-level configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Color the framebuffer is cleared to at the start of every frame.
    pub clear_color: Color,

    /// Scene activated when the application starts.
    pub initial_scene: SceneSelector,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::WHITE,
            initial_scene: SceneSelector::LEVEL_EDITOR,
        }
    }
}
