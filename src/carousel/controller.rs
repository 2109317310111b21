use crate::carousel::transition::{SlideParts, Transition};
use crate::input::Direction;

/// Slide index, transition lock and auto-advance countdown.
pub struct Carousel {
    parts: Vec<SlideParts>,
    current: usize,
    transition: Option<Transition>,
    interval: f32,
    idle_timer: f32,
}

impl Carousel {
    pub fn new(parts: Vec<SlideParts>, interval: f32) -> Self {
        Self {
            parts,
            current: 0,
            transition: None,
            interval,
            idle_timer: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn parts(&self, index: usize) -> SlideParts {
        self.parts.get(index).copied().unwrap_or_default()
    }

    /// Start a transition to `target` (wrapped into range). Dropped, not
    /// queued, while another transition is in flight.
    pub fn goto(&mut self, target: isize, direction: Direction) -> bool {
        if self.transition.is_some() || self.parts.len() < 2 {
            return false;
        }
        let to = target.rem_euclid(self.parts.len() as isize) as usize;
        if to == self.current {
            return false;
        }

        tracing::debug!(from = self.current, to, ?direction, "slide transition");
        self.transition = Some(Transition::new(
            self.current,
            to,
            direction,
            self.parts(self.current),
            self.parts(to),
        ));
        self.current = to;
        self.idle_timer = 0.0;
        true
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        self.goto(self.current as isize + direction.step(), direction)
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(transition) = self.transition.as_mut() {
            if transition.update(dt) {
                self.transition = None;
                self.idle_timer = 0.0;
            }
            return;
        }

        self.idle_timer += dt;
        if self.idle_timer >= self.interval {
            self.idle_timer = 0.0;
            self.step(Direction::Forward);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TRANSITION_DURATION;

    fn carousel(n: usize) -> Carousel {
        Carousel::new(vec![SlideParts { heading: true, overlay: true }; n], 3.0)
    }

    fn finish(c: &mut Carousel) {
        c.update(TRANSITION_DURATION + 0.01);
        assert!(!c.is_animating());
    }

    #[test]
    fn navigation_while_animating_is_dropped() {
        let mut c = carousel(4);
        assert!(c.goto(1, Direction::Forward));
        assert!(!c.goto(3, Direction::Forward));
        assert!(!c.step(Direction::Backward));
        assert_eq!(c.current(), 1);
        finish(&mut c);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn wraps_in_both_directions() {
        let mut c = carousel(3);
        c.goto(2, Direction::Forward);
        finish(&mut c);
        assert!(c.goto(3, Direction::Forward));
        assert_eq!(c.current(), 0);
        finish(&mut c);
        assert!(c.goto(-1, Direction::Backward));
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn auto_advance_after_interval() {
        let mut c = carousel(3);
        c.update(2.9);
        assert_eq!(c.current(), 0);
        c.update(0.2);
        assert_eq!(c.current(), 1);
        assert!(c.is_animating());
    }

    #[test]
    fn manual_navigation_restarts_countdown() {
        let mut c = carousel(3);
        c.update(2.5);
        assert!(c.step(Direction::Forward));
        finish(&mut c);
        assert_eq!(c.idle_timer, 0.0);
        c.update(2.9);
        assert_eq!(c.current(), 1);
        c.update(0.2);
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn goto_current_slide_is_a_no_op() {
        let mut c = carousel(3);
        c.update(1.0);
        assert!(!c.goto(0, Direction::Forward));
        assert!(!c.goto(3, Direction::Forward));
        assert!(!c.is_animating());
        assert_eq!(c.current(), 0);
        assert_eq!(c.idle_timer, 1.0);
    }

    #[test]
    fn single_slide_never_moves() {
        let mut c = carousel(1);
        assert!(!c.step(Direction::Forward));
        c.update(10.0);
        assert_eq!(c.current(), 0);
        assert!(!c.is_animating());
    }

    #[test]
    fn three_slide_scenario() {
        let mut c = carousel(3);
        assert!(c.goto(1, Direction::Forward));
        assert_eq!(c.current(), 1);

        let mut in_flight = c.transition().cloned().unwrap();
        in_flight.update(TRANSITION_DURATION);
        assert_eq!(in_flight.incoming().outer_x_percent, 0.0);
        assert_eq!(in_flight.counter(), 2);
        finish(&mut c);

        assert!(c.goto(0, Direction::Backward));
        assert!(!c.goto(0, Direction::Backward));
        assert_eq!(c.transition().map(|t| t.from), Some(1));
        finish(&mut c);
        assert_eq!(c.current(), 0);
    }
}
