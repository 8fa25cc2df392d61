use std::collections::BTreeMap;

use super::{Scene, SceneError, SceneSelector};

/// Constructor for a fresh, uninitialized scene.
pub type SceneFactory = Box<dyn Fn() -> Box<dyn Scene>>;

struct Entry {
    name: String,
    factory: SceneFactory,
}

/// Maps selectors to scene constructors.
#[derive(Default)]
pub struct SceneRegistry {
    entries: BTreeMap<SceneSelector, Entry>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in scenes (`LEVEL_EDITOR`, `LEVEL`).
    pub fn builtin() -> Self {
        use crate::scenes::{EditorScene, LevelScene};

        let mut registry = Self::new();
        registry.register(SceneSelector::LEVEL_EDITOR, "level-editor", || {
            Box::new(EditorScene::new())
        });
        registry.register(SceneSelector::LEVEL, "level", || Box::new(LevelScene::new()));
        registry
    }

    /// Registers (or replaces) the factory for `selector`.
    pub fn register<F>(&mut self, selector: SceneSelector, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Scene> + 'static,
    {
        let name = name.into();
        if self.entries.contains_key(&selector) {
            log::warn!("scene {selector} re-registered as {name:?}");
        }
        self.entries.insert(
            selector,
            Entry {
                name,
                factory: Box::new(factory),
            },
        );
    }

    pub fn contains(&self, selector: SceneSelector) -> bool {
        self.entries.contains_key(&selector)
    }

    pub fn name(&self, selector: SceneSelector) -> Option<&str> {
        self.entries.get(&selector).map(|e| e.name.as_str())
    }

    /// Looks a selector up by its registered name.
    pub fn selector_by_name(&self, name: &str) -> Option<SceneSelector> {
        self.entries
            .iter()
            .find(|(_, e)| e.name == name)
            .map(|(sel, _)| *sel)
    }

    pub fn selectors(&self) -> impl Iterator<Item = SceneSelector> + '_ {
        self.entries.keys().copied()
    }

    /// Builds a new, uninitialized scene for `selector`.
    pub fn create(&self, selector: SceneSelector) -> Result<Box<dyn Scene>, SceneError> {
        let entry = self
            .entries
            .get(&selector)
            .ok_or(SceneError::UnknownScene(selector))?;
        Ok((entry.factory)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GraphicsApi;
    use crate::scene::SceneCtx;

    struct Named(&'static str);

    impl Scene for Named {
        fn init(&mut self, _gfx: &mut dyn GraphicsApi) -> Result<(), SceneError> {
            Ok(())
        }

        fn update(&mut self, _ctx: &mut SceneCtx<'_>) {}

        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn unknown_selector_is_an_error() {
        let registry = SceneRegistry::new();
        let err = registry.create(SceneSelector(7)).err();
        assert_eq!(err, Some(SceneError::UnknownScene(SceneSelector(7))));
    }

    #[test]
    fn create_builds_a_fresh_scene_each_time() {
        let mut registry = SceneRegistry::new();
        registry.register(SceneSelector(3), "named", || Box::new(Named("named")));

        let a = registry.create(SceneSelector(3)).unwrap();
        let b = registry.create(SceneSelector(3)).unwrap();
        assert_eq!(a.name(), "named");
        assert_eq!(b.name(), "named");
    }

    #[test]
    fn builtin_registers_editor_and_level() {
        let registry = SceneRegistry::builtin();
        assert!(registry.contains(SceneSelector::LEVEL_EDITOR));
        assert!(registry.contains(SceneSelector::LEVEL));
        assert!(!registry.contains(SceneSelector(2)));
        assert_eq!(registry.selector_by_name("level"), Some(SceneSelector::LEVEL));
        assert_eq!(registry.name(SceneSelector::LEVEL_EDITOR), Some("level-editor"));
        assert_eq!(registry.selectors().count(), 2);
    }

    #[test]
    fn re_registering_replaces_the_factory() {
        let mut registry = SceneRegistry::new();
        registry.register(SceneSelector(0), "first", || Box::new(Named("first")));
        registry.register(SceneSelector(0), "second", || Box::new(Named("second")));

        assert_eq!(registry.create(SceneSelector(0)).unwrap().name(), "second");
        assert_eq!(registry.selector_by_name("first"), None);
    }
}
