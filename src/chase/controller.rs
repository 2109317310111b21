use rand::Rng;
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::chase::mascot::{Bounds, Mascot, Motion, MotionEvent, Role};
use crate::input::FrameInput;

const FOLLOWER_SPREAD: f32 = 30.0;

/// Two mascots sharing a drag area: a leader that wanders and rests, and a
/// follower that chases it while it moves.
pub struct Chase {
    pub leader: Mascot,
    pub follower: Mascot,
    area: Rectangle,
    grabbed: Option<Role>,
}

impl Chase {
    /// Returns `None` when `area` cannot hold a mascot of `size`.
    pub fn new(rng: &mut impl Rng, area: Rectangle, size: f32) -> Option<Self> {
        let size = Vector2::new(size, size);
        let bounds = Bounds::for_area(area, size);
        if !bounds.is_valid() {
            warn!("Drag area {}x{} is too small for the mascots, skipping", area.width, area.height);
            return None;
        }

        let center = bounds.center();
        let offset = Vector2::new(
            rng.random_range(-FOLLOWER_SPREAD..=FOLLOWER_SPREAD),
            rng.random_range(-FOLLOWER_SPREAD..=FOLLOWER_SPREAD),
        );
        let mut leader = Mascot::new(Role::Leader, center, size, bounds);
        let mut follower = Mascot::new(Role::Follower, Vector2::new(center.x + offset.x, center.y + offset.y), size, bounds);
        leader.wander(rng);
        follower.pursue();

        Some(Self {
            leader,
            follower,
            area,
            grabbed: None,
        })
    }

    #[cfg(test)]
    pub fn area(&self) -> Rectangle {
        self.area
    }

    fn mascot_mut(&mut self, role: Role) -> &mut Mascot {
        match role {
            Role::Leader => &mut self.leader,
            Role::Follower => &mut self.follower,
        }
    }

    /// Route one frame of pointer input. Returns `true` when a mascot took it.
    pub fn pointer(&mut self, input: &FrameInput, dt: f32, rng: &mut impl Rng) -> bool {
        let Some(role) = self.grabbed else {
            if !input.pressed {
                return false;
            }
            // The follower is drawn on top
            let role = if self.follower.hit(input.pointer) {
                Role::Follower
            } else if self.leader.hit(input.pointer) {
                Role::Leader
            } else {
                return false;
            };
            debug!("Grabbed {:?}", role);
            self.mascot_mut(role).press(input.pointer);
            self.grabbed = Some(role);
            if role == Role::Leader && !self.follower.is_held() {
                self.follower.pursue();
            }
            return true;
        };

        if input.down && !input.released {
            self.mascot_mut(role).drag(input.pointer, dt);
            return true;
        }

        self.grabbed = None;
        let thrown = self.mascot_mut(role).release();
        debug!("Released {:?}, thrown: {}", role, thrown);
        if !thrown {
            match role {
                Role::Leader => self.leader.rest(rng),
                Role::Follower => self.settle_follower(rng),
            }
        }
        true
    }

    /// The follower's own mode: chase a moving leader, roam while it rests.
    fn settle_follower(&mut self, rng: &mut impl Rng) {
        if matches!(self.leader.motion, Motion::Resting { .. }) {
            self.follower.wander(rng);
        } else {
            self.follower.pursue();
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        let leader_position = self.leader.position;
        match self.leader.step(dt, rng, leader_position, false) {
            Some(MotionEvent::LegFinished) => self.leader.rest(rng),
            Some(MotionEvent::RestFinished | MotionEvent::ThrowFinished) => self.leader.wander(rng),
            None => {}
        }

        if !self.follower.is_held() {
            let leader_rests = matches!(self.leader.motion, Motion::Resting { .. });
            match self.follower.motion {
                Motion::Wandering(_) if !leader_rests => self.follower.pursue(),
                Motion::Pursuing { .. } if leader_rests => self.follower.wander(rng),
                Motion::Resting { .. } => self.settle_follower(rng),
                _ => {}
            }
        }

        let snap = matches!(self.leader.motion, Motion::Dragging { .. });
        match self.follower.step(dt, rng, self.leader.position, snap) {
            Some(MotionEvent::LegFinished) => self.follower.wander(rng),
            Some(MotionEvent::ThrowFinished) => self.settle_follower(rng),
            _ => {}
        }
    }

    /// Move the drag area, e.g. after a window resize. Keeps the old area
    /// when the new one is too small.
    pub fn set_area(&mut self, area: Rectangle) -> bool {
        let bounds = Bounds::for_area(area, self.leader.size);
        if !bounds.is_valid() {
            warn!("Drag area {}x{} is too small for the mascots, keeping the old one", area.width, area.height);
            return false;
        }
        self.area = area;
        self.leader.set_bounds(bounds);
        self.follower.set_bounds(bounds);
        true
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, leader: Option<&Texture2D>, follower: Option<&Texture2D>, accent: Color) {
        d.draw_rectangle_rounded(self.area, 0.08, 12, Color::new(255, 255, 255, 36));
        let sheen = Rectangle::new(self.area.x, self.area.y, self.area.width, self.area.height * 0.35);
        d.draw_rectangle_rounded(sheen, 0.2, 12, Color::new(255, 255, 255, 22));

        self.leader.draw(d, leader, accent);
        self.follower.draw(d, follower, accent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chase::mascot::distance;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    fn area() -> Rectangle {
        Rectangle::new(0.0, 0.0, 600.0, 400.0)
    }

    fn chase(rng: &mut StdRng) -> Chase {
        Chase::new(rng, area(), 80.0).expect("area fits")
    }

    fn press_at(point: Vector2) -> FrameInput {
        let mut input = FrameInput::idle(1280.0, 720.0);
        input.pointer = point;
        input.pressed = true;
        input.down = true;
        input
    }

    fn hold_at(point: Vector2) -> FrameInput {
        let mut input = FrameInput::idle(1280.0, 720.0);
        input.pointer = point;
        input.down = true;
        input
    }

    fn release_at(point: Vector2) -> FrameInput {
        let mut input = FrameInput::idle(1280.0, 720.0);
        input.pointer = point;
        input.released = true;
        input
    }

    fn center_of(m: &Mascot) -> Vector2 {
        let r = m.footprint();
        Vector2::new(r.x + r.width * 0.5, r.y + r.height * 0.5)
    }

    #[test]
    fn declines_when_area_is_too_small() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Chase::new(&mut rng, Rectangle::new(0.0, 0.0, 50.0, 400.0), 80.0).is_none());
    }

    #[test]
    fn starts_with_leader_wandering_and_follower_nearby() {
        let mut rng = StdRng::seed_from_u64(2);
        let c = chase(&mut rng);
        assert!(matches!(c.leader.motion, Motion::Wandering(_)));
        assert!(matches!(c.follower.motion, Motion::Pursuing { .. }));
        assert!((c.follower.position.x - c.leader.position.x).abs() <= FOLLOWER_SPREAD);
        assert!((c.follower.position.y - c.leader.position.y).abs() <= FOLLOWER_SPREAD);
    }

    #[test]
    fn follower_roams_while_leader_rests() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut c = chase(&mut rng);
        c.leader.motion = Motion::Resting { remaining: 10.0 };
        c.update(DT, &mut rng);
        assert!(matches!(c.follower.motion, Motion::Wandering(_)));

        c.leader.wander(&mut rng);
        c.update(DT, &mut rng);
        assert!(matches!(c.follower.motion, Motion::Pursuing { .. }));
    }

    #[test]
    fn leader_rests_between_legs() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut c = chase(&mut rng);
        let mut rested = false;
        for _ in 0..(60 * 4) {
            c.update(DT, &mut rng);
            if matches!(c.leader.motion, Motion::Resting { .. }) {
                rested = true;
                break;
            }
        }
        assert!(rested);
    }

    #[test]
    fn follower_is_hit_first_and_only_one_mascot_is_held() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = chase(&mut rng);
        // Stack both mascots
        c.follower.position = c.leader.position;
        let point = center_of(&c.follower);
        assert!(c.pointer(&press_at(point), DT, &mut rng));
        assert_eq!(c.grabbed, Some(Role::Follower));
        assert!(!c.leader.is_held());

        // A second press while holding does not grab the leader
        assert!(c.pointer(&press_at(point), DT, &mut rng));
        assert_eq!(c.grabbed, Some(Role::Follower));
        assert!(!c.leader.is_held());
    }

    #[test]
    fn dragged_follower_ignores_leader_mode() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut c = chase(&mut rng);
        let point = center_of(&c.follower);
        c.pointer(&press_at(point), DT, &mut rng);
        c.leader.motion = Motion::Resting { remaining: 10.0 };
        for _ in 0..10 {
            c.pointer(&hold_at(point), DT, &mut rng);
            c.update(DT, &mut rng);
            assert!(matches!(c.follower.motion, Motion::Dragging { .. }));
        }
    }

    #[test]
    fn slow_leader_release_rests_and_follower_roams() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut c = chase(&mut rng);
        c.follower.position = c.leader.bounds().min;
        c.leader.position = c.leader.bounds().max;
        let point = center_of(&c.leader);
        assert!(c.pointer(&press_at(point), DT, &mut rng));
        assert_eq!(c.grabbed, Some(Role::Leader));
        assert!(matches!(c.follower.motion, Motion::Pursuing { .. }));

        c.pointer(&hold_at(point), DT, &mut rng);
        c.pointer(&release_at(point), DT, &mut rng);
        assert_eq!(c.grabbed, None);
        assert!(matches!(c.leader.motion, Motion::Resting { .. }));
        c.update(DT, &mut rng);
        assert!(matches!(c.follower.motion, Motion::Wandering(_)));
    }

    #[test]
    fn follower_snaps_to_dragged_leader() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut c = chase(&mut rng);
        c.follower.position = c.leader.bounds().min;
        c.follower.pursue();
        let point = center_of(&c.leader);
        c.pointer(&press_at(point), DT, &mut rng);
        for _ in 0..60 {
            c.pointer(&hold_at(point), DT, &mut rng);
            c.update(DT, &mut rng);
        }
        assert!(distance(c.follower.position, c.leader.position) < 30.0);
    }

    #[test]
    fn shrinking_area_keeps_mascots_inside() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut c = chase(&mut rng);
        assert!(c.set_area(Rectangle::new(100.0, 50.0, 200.0, 150.0)));
        assert!(c.leader.bounds().contains(c.leader.position));
        assert!(c.follower.bounds().contains(c.follower.position));
        assert!(!c.set_area(Rectangle::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(c.area.width, 200.0);
    }
}
