//! Built-in scenes.

mod editor;
mod level;

pub use editor::EditorScene;
pub use level::LevelScene;
