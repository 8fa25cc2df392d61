use std::collections::HashSet;

use super::types::Key;

/// Set of currently held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys_down: HashSet<Key>,
}

impl KeyboardState {
    pub fn on_key(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Releases every held key.
    pub fn clear(&mut self) {
        self.keys_down.clear();
    }

    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys_down.iter().copied()
    }
}
