use super::keyboard::KeyboardState;
use super::mouse::MouseState;
use super::types::InputEvent;

/// Input context for a window.
///
/// Mutated only by the runtime when it dispatches device events, read by the
/// active scene through `SceneCtx`.
#[derive(Debug, Default)]
pub struct InputState {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,

    /// Whether the window is focused.
    pub focused: bool,
}

impl InputState {
    /// Routes a platform-agnostic event to the matching tracker.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y } => self.mouse.on_pointer_move(x, y),

            InputEvent::PointerButton { button, state } => {
                self.mouse.on_button_event(button.id(), state.is_pressed());
            }

            InputEvent::MouseWheel { delta } => {
                let (dx, dy) = delta.in_lines();
                self.mouse.on_scroll(dx, dy);
            }

            InputEvent::Key { key, state, .. } => self.keyboard.on_key(key, state.is_pressed()),

            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Key-up events are not delivered while unfocused.
                    self.keyboard.clear();
                }
            }
        }
    }

    /// Closes the current frame. Called once per completed frame.
    pub fn end_frame(&mut self) {
        self.mouse.end_frame();
    }
}
