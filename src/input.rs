use raylib::prelude::*;

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

const NAV_KEYS: [KeyboardKey; 6] = [
    KeyboardKey::KEY_LEFT,
    KeyboardKey::KEY_UP,
    KeyboardKey::KEY_RIGHT,
    KeyboardKey::KEY_DOWN,
    KeyboardKey::KEY_SPACE,
    KeyboardKey::KEY_ENTER,
];

pub fn nav_for_key(key: KeyboardKey) -> Option<Direction> {
    match key {
        KeyboardKey::KEY_LEFT | KeyboardKey::KEY_UP => Some(Direction::Backward),
        KeyboardKey::KEY_RIGHT | KeyboardKey::KEY_DOWN | KeyboardKey::KEY_SPACE | KeyboardKey::KEY_ENTER => {
            Some(Direction::Forward)
        }
        _ => None,
    }
}

/// Everything the show reads from the window in one frame.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub screen: Vector2,
    pub resized: bool,
    pub key_nav: Option<Direction>,
    /// Wheel notches this frame, positive away from the user
    pub wheel: f32,
    pub pointer: Vector2,
    pub pointer_delta: Vector2,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl FrameInput {
    #[cfg(test)]
    pub fn idle(width: f32, height: f32) -> Self {
        Self {
            screen: Vector2::new(width, height),
            resized: false,
            key_nav: None,
            wheel: 0.0,
            pointer: Vector2::new(-1.0, -1.0),
            pointer_delta: Vector2::new(0.0, 0.0),
            pressed: false,
            down: false,
            released: false,
        }
    }

    pub fn capture(rl: &RaylibHandle) -> Self {
        let key_nav = NAV_KEYS
            .iter()
            .filter(|key| rl.is_key_pressed(**key))
            .find_map(|key| nav_for_key(*key));

        Self {
            screen: Vector2::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32),
            resized: rl.is_window_resized(),
            key_nav,
            wheel: rl.get_mouse_wheel_move(),
            pointer: rl.get_mouse_position(),
            pointer_delta: rl.get_mouse_delta(),
            pressed: rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
            down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
            released: rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT),
        }
    }
}

/// Turns wheel and vertical swipe travel into discrete directions once the
/// accumulated travel crosses a tolerance.
#[derive(Debug, Clone)]
pub struct GestureObserver {
    tolerance: f32,
    travel: f32,
}

impl GestureObserver {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance, travel: 0.0 }
    }

    /// Positive `dy` means scrolling down or swiping up, which reads as "next".
    pub fn feed(&mut self, dy: f32) -> Option<Direction> {
        if dy == 0.0 {
            return None;
        }
        if self.travel != 0.0 && self.travel.signum() != dy.signum() {
            self.travel = 0.0;
        }
        self.travel += dy;
        if self.travel.abs() < self.tolerance {
            return None;
        }
        let direction = if self.travel > 0.0 { Direction::Forward } else { Direction::Backward };
        self.travel = 0.0;
        Some(direction)
    }

    /// Feed one frame of input: wheel notches always, pointer travel only while
    /// the button is held.
    pub fn observe(&mut self, input: &FrameInput) -> Option<Direction> {
        if input.pressed {
            self.reset();
        }
        if input.wheel != 0.0 {
            return self.feed(-input.wheel * WHEEL_NOTCH);
        }
        if input.down && !input.pressed {
            return self.feed(-input.pointer_delta.y);
        }
        None
    }

    pub fn reset(&mut self) {
        self.travel = 0.0;
    }
}

impl Default for GestureObserver {
    fn default() -> Self {
        Self::new(GESTURE_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(nav_for_key(KeyboardKey::KEY_LEFT), Some(Direction::Backward));
        assert_eq!(nav_for_key(KeyboardKey::KEY_UP), Some(Direction::Backward));
        assert_eq!(nav_for_key(KeyboardKey::KEY_SPACE), Some(Direction::Forward));
        assert_eq!(nav_for_key(KeyboardKey::KEY_ENTER), Some(Direction::Forward));
        assert_eq!(nav_for_key(KeyboardKey::KEY_A), None);
    }

    #[test]
    fn gesture_fires_only_past_tolerance() {
        let mut observer = GestureObserver::new(10.0);
        assert_eq!(observer.feed(4.0), None);
        assert_eq!(observer.feed(4.0), None);
        assert_eq!(observer.feed(4.0), Some(Direction::Forward));
        assert_eq!(observer.feed(-11.0), Some(Direction::Backward));
    }

    #[test]
    fn reversing_direction_discards_travel() {
        let mut observer = GestureObserver::new(10.0);
        assert_eq!(observer.feed(9.0), None);
        assert_eq!(observer.feed(-2.0), None);
        assert_eq!(observer.feed(9.0), None);
    }

    #[test]
    fn wheel_down_is_forward() {
        let mut observer = GestureObserver::default();
        let mut input = FrameInput::idle(800.0, 600.0);
        input.wheel = -1.0;
        assert_eq!(observer.observe(&input), Some(Direction::Forward));
        input.wheel = 1.0;
        assert_eq!(observer.observe(&input), Some(Direction::Backward));
    }

    #[test]
    fn swipe_counts_only_while_held() {
        let mut observer = GestureObserver::default();
        let mut input = FrameInput::idle(800.0, 600.0);
        input.pointer_delta = Vector2::new(0.0, -30.0);
        assert_eq!(observer.observe(&input), None);
        input.down = true;
        assert_eq!(observer.observe(&input), Some(Direction::Forward));
    }
}
