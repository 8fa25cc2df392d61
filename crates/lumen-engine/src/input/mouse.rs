/// Number of tracked mouse buttons (left, right, middle).
pub const TRACKED_BUTTONS: usize = 3;

/// Frame-scoped pointer state.
///
/// Device callbacks mutate this between frames; scene logic reads it during
/// `update`. Deltas follow the `previous - current` convention, so moving the
/// pointer right yields a negative `dx`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseState {
    position: (f64, f64),
    previous: (f64, f64),
    scroll: (f64, f64),
    buttons_down: [bool; TRACKED_BUTTONS],
    dragging: bool,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer move.
    ///
    /// The current position shifts into `previous` before the new one is
    /// stored. Dragging becomes true if any tracked button is held.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.previous = self.position;
        self.position = (x, y);
        self.dragging = self.buttons_down.iter().any(|down| *down);
    }

    /// Records a button press or release.
    ///
    /// A release of any tracked button clears `dragging`, even when other
    /// buttons are still held. Ids outside `0..TRACKED_BUTTONS` are ignored.
    pub fn on_button_event(&mut self, button: i32, pressed: bool) {
        let Some(slot) = slot(button) else { return };

        self.buttons_down[slot] = pressed;
        if !pressed {
            self.dragging = false;
        }
    }

    /// Stores the scroll offset for this frame, replacing any earlier value.
    pub fn on_scroll(&mut self, dx: f64, dy: f64) {
        self.scroll = (dx, dy);
    }

    /// Closes the frame: scroll is zeroed and the pointer delta collapses.
    pub fn end_frame(&mut self) {
        self.scroll = (0.0, 0.0);
        self.previous = self.position;
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    #[inline]
    pub fn previous_position(&self) -> (f64, f64) {
        self.previous
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.0 as f32
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.1 as f32
    }

    #[inline]
    pub fn dx(&self) -> f32 {
        (self.previous.0 - self.position.0) as f32
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        (self.previous.1 - self.position.1) as f32
    }

    #[inline]
    pub fn scroll_x(&self) -> f32 {
        self.scroll.0 as f32
    }

    #[inline]
    pub fn scroll_y(&self) -> f32 {
        self.scroll.1 as f32
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns whether `button` is held. Untracked ids report `false`.
    pub fn button_down(&self, button: i32) -> bool {
        slot(button).is_some_and(|i| self.buttons_down[i])
    }
}

fn slot(button: i32) -> Option<usize> {
    usize::try_from(button)
        .ok()
        .filter(|i| *i < TRACKED_BUTTONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn move_shifts_current_into_previous() {
        let mut m = MouseState::new();
        let moves = [(3.0, 4.0), (10.0, -2.5), (10.0, -2.5), (0.0, 100.0)];

        for (x, y) in moves {
            let before = m.position();
            m.on_pointer_move(x, y);
            assert_eq!(m.previous_position(), before);
            assert_eq!(m.position(), (x, y));
            assert_eq!(m.dx(), (before.0 - x) as f32);
            assert_eq!(m.dy(), (before.1 - y) as f32);
        }
    }

    #[test]
    fn delta_reads_are_stable_within_a_frame() {
        let mut m = MouseState::new();
        m.on_pointer_move(10.0, 10.0);
        m.on_pointer_move(15.0, 12.0);

        assert_eq!((m.dx(), m.dy()), (-5.0, -2.0));
        assert_eq!((m.dx(), m.dy()), (-5.0, -2.0));
    }

    #[test]
    fn end_frame_collapses_delta() {
        let mut m = MouseState::new();
        m.on_pointer_move(1.0, 1.0);
        m.on_pointer_move(4.0, 9.0);
        m.end_frame();

        assert_eq!((m.dx(), m.dy()), (0.0, 0.0));
        assert_eq!((m.x(), m.y()), (4.0, 9.0));
    }

    // ── scroll ────────────────────────────────────────────────────────────

    #[test]
    fn scroll_overwrites_instead_of_accumulating() {
        let mut m = MouseState::new();
        m.on_scroll(1.0, 2.0);
        m.on_scroll(0.0, -3.0);

        assert_eq!(m.scroll_x(), 0.0);
        assert_eq!(m.scroll_y(), -3.0);
    }

    #[test]
    fn end_frame_zeroes_scroll() {
        let mut m = MouseState::new();
        m.on_scroll(2.0, 7.0);
        m.end_frame();
        assert_eq!((m.scroll_x(), m.scroll_y()), (0.0, 0.0));

        // Unconditional: also when nothing was scrolled.
        m.end_frame();
        assert_eq!((m.scroll_x(), m.scroll_y()), (0.0, 0.0));
    }

    // ── buttons / drag ────────────────────────────────────────────────────

    #[test]
    fn press_then_move_starts_drag() {
        let mut m = MouseState::new();
        m.on_button_event(0, true);
        assert!(!m.is_dragging());

        m.on_pointer_move(5.0, 5.0);
        assert!(m.is_dragging());
        assert!(m.button_down(0));
    }

    #[test]
    fn any_release_clears_drag_even_with_buttons_held() {
        let mut m = MouseState::new();
        m.on_button_event(0, true);
        m.on_button_event(1, true);
        m.on_pointer_move(5.0, 5.0);
        assert!(m.is_dragging());

        m.on_button_event(1, false);
        assert!(!m.is_dragging());
        assert!(m.button_down(0));

        // Next move with button 0 still held resumes the drag.
        m.on_pointer_move(6.0, 5.0);
        assert!(m.is_dragging());
    }

    #[test]
    fn move_without_buttons_is_not_a_drag() {
        let mut m = MouseState::new();
        m.on_pointer_move(1.0, 2.0);
        m.on_pointer_move(3.0, 4.0);
        assert!(!m.is_dragging());
    }

    #[test]
    fn out_of_range_buttons_are_ignored() {
        let mut m = MouseState::new();
        for id in [-1, 3, 4, 7, i32::MAX, i32::MIN] {
            m.on_button_event(id, true);
            assert!(!m.button_down(id));
        }
        assert_eq!(m, MouseState::new());

        m.on_button_event(2, true);
        m.on_pointer_move(1.0, 1.0);
        m.on_button_event(5, false);
        assert!(m.is_dragging(), "ignored release must not clear drag");
        assert!(m.button_down(2));
    }

    // ── scenario ──────────────────────────────────────────────────────────

    #[test]
    fn pointer_drag_scroll_scenario() {
        let mut m = MouseState::new();

        m.on_pointer_move(10.0, 10.0);
        m.on_pointer_move(15.0, 10.0);
        assert_eq!((m.dx(), m.dy()), (-5.0, 0.0));

        m.on_button_event(0, true);
        m.on_pointer_move(20.0, 10.0);
        assert!(m.is_dragging());

        m.on_button_event(0, false);
        assert!(!m.is_dragging());

        m.on_scroll(0.0, 5.0);
        assert_eq!(m.scroll_y(), 5.0);
        m.end_frame();
        assert_eq!(m.scroll_y(), 0.0);
    }
}
