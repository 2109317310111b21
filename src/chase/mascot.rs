use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Leader,
    Follower,
}

/// One random-walk leg: aimed at `target`, slowed by friction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub target: Vector2,
    pub velocity: Vector2,
    pub remaining: f32,
}

/// What a mascot is doing. Exactly one at a time; replacing it cancels the
/// previous motion immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Wandering(Leg),
    Resting { remaining: f32 },
    Pursuing { target: Vector2, retarget_in: f32 },
    Dragging { grab: Vector2, velocity: Vector2 },
    Throwing { velocity: Vector2 },
}

/// Completion events raised by `Mascot::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    LegFinished,
    RestFinished,
    ThrowFinished,
}

/// Allowed range of the mascot's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds {
    pub fn for_area(area: Rectangle, size: Vector2) -> Self {
        Self {
            min: Vector2::new(area.x, area.y),
            max: Vector2::new(area.x + area.width - size.x, area.y + area.height - size.y),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.max.x >= self.min.x && self.max.y >= self.min.y
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    pub fn clamp(&self, p: Vector2) -> Vector2 {
        Vector2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }

    #[cfg(test)]
    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clamp `p` and reflect `v` off any wall it crossed.
    fn bounce(&self, p: &mut Vector2, v: &mut Vector2, restitution: f32) {
        if p.x < self.min.x || p.x > self.max.x {
            p.x = p.x.clamp(self.min.x, self.max.x);
            v.x = -v.x * restitution;
        }
        if p.y < self.min.y || p.y > self.max.y {
            p.y = p.y.clamp(self.min.y, self.max.y);
            v.y = -v.y * restitution;
        }
    }
}

pub struct Mascot {
    pub role: Role,
    pub position: Vector2,
    pub size: Vector2,
    pub motion: Motion,
    bounds: Bounds,
    bounce: f32,
    press_scale: f32,
    scale: f32,
    scale_tween: Option<ease::Tween>,
    scale_target: f32,
    scale_timer: f32,
    scale_duration: f32,
}

impl Mascot {
    pub fn new(role: Role, position: Vector2, size: Vector2, bounds: Bounds) -> Self {
        let (bounce, press_scale) = match role {
            Role::Leader => (0.5, 1.1),
            Role::Follower => (0.8, 1.2),
        };
        Self {
            role,
            position: bounds.clamp(position),
            size,
            motion: Motion::Resting { remaining: 0.0 },
            bounds,
            bounce,
            press_scale,
            scale: 1.0,
            scale_tween: None,
            scale_target: 1.0,
            scale_timer: 0.0,
            scale_duration: 0.0,
        }
    }

    #[cfg(test)]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.position = bounds.clamp(self.position);
    }

    pub fn is_held(&self) -> bool {
        matches!(self.motion, Motion::Dragging { .. } | Motion::Throwing { .. })
    }

    /// On-screen footprint, grown about its centre by the press scale.
    pub fn footprint(&self) -> Rectangle {
        let w = self.size.x * self.scale;
        let h = self.size.y * self.scale;
        Rectangle::new(
            self.position.x - (w - self.size.x) * 0.5,
            self.position.y - (h - self.size.y) * 0.5,
            w,
            h,
        )
    }

    pub fn hit(&self, point: Vector2) -> bool {
        let r = self.footprint();
        point.x >= r.x && point.x <= r.x + r.width && point.y >= r.y && point.y <= r.y + r.height
    }

    fn tween_scale(&mut self, to: f32, duration: f32) {
        self.scale_tween = Some(ease::Tween::new(ease::quad_out, self.scale, to, duration));
        self.scale_target = to;
        self.scale_timer = 0.0;
        self.scale_duration = duration;
    }

    pub fn wander(&mut self, rng: &mut impl Rng) {
        let lo = Vector2::new(self.bounds.min.x + WANDER_BUFFER, self.bounds.min.y + WANDER_BUFFER);
        let hi = Vector2::new(self.bounds.max.x - WANDER_BUFFER, self.bounds.max.y - WANDER_BUFFER);
        let target = Vector2::new(range_or_mid(rng, lo.x, hi.x), range_or_mid(rng, lo.y, hi.y));

        let speed = rng.random_range(200.0..=400.0);
        let angle = (target.y - self.position.y).atan2(target.x - self.position.x);
        self.motion = Motion::Wandering(Leg {
            target,
            velocity: Vector2::new(angle.cos() * speed, angle.sin() * speed),
            remaining: rng.random_range(1.5..=3.0),
        });
    }

    pub fn rest(&mut self, rng: &mut impl Rng) {
        self.motion = Motion::Resting { remaining: rng.random_range(0.4..=1.2) };
    }

    pub fn pursue(&mut self) {
        self.motion = Motion::Pursuing { target: self.position, retarget_in: 0.0 };
    }

    pub fn press(&mut self, pointer: Vector2) {
        let grab = Vector2::new(pointer.x - self.position.x, pointer.y - self.position.y);
        self.motion = Motion::Dragging { grab, velocity: Vector2::new(0.0, 0.0) };
        self.tween_scale(self.press_scale, 0.1);
    }

    pub fn drag(&mut self, pointer: Vector2, dt: f32) {
        let Motion::Dragging { grab, velocity } = self.motion else {
            return;
        };
        let next = self.bounds.clamp(Vector2::new(pointer.x - grab.x, pointer.y - grab.y));
        let velocity = if dt > 0.0 {
            // Smoothed so a single jittery frame does not decide the throw
            let instant = Vector2::new((next.x - self.position.x) / dt, (next.y - self.position.y) / dt);
            Vector2::new(velocity.x * 0.5 + instant.x * 0.5, velocity.y * 0.5 + instant.y * 0.5)
        } else {
            velocity
        };
        self.position = next;
        self.motion = Motion::Dragging { grab, velocity };
    }

    /// Let go. Returns `true` when released fast enough to be thrown; the
    /// caller picks the next motion otherwise.
    pub fn release(&mut self) -> bool {
        self.tween_scale(1.0, 0.2);
        if let Motion::Dragging { velocity, .. } = self.motion {
            if length(velocity) >= THROW_MIN_SPEED {
                self.motion = Motion::Throwing { velocity };
                return true;
            }
        }
        false
    }

    /// Advance the current motion. `leader` is the position to chase when
    /// pursuing; `snap` tightens the chase.
    pub fn step(&mut self, dt: f32, rng: &mut impl Rng, leader: Vector2, snap: bool) -> Option<MotionEvent> {
        self.step_scale(dt);

        match self.motion {
            Motion::Wandering(mut leg) => {
                leg.velocity = scaled(leg.velocity, (1.0 - WANDER_FRICTION).powf(dt * TICK_RATE));
                self.position = Vector2::new(self.position.x + leg.velocity.x * dt, self.position.y + leg.velocity.y * dt);
                self.bounds.bounce(&mut self.position, &mut leg.velocity, self.bounce);
                leg.remaining -= dt;
                let arrived = distance(self.position, leg.target) <= ARRIVAL_RADIUS;
                self.motion = Motion::Wandering(leg);
                (arrived || leg.remaining <= 0.0).then_some(MotionEvent::LegFinished)
            }
            Motion::Resting { remaining } => {
                let remaining = remaining - dt;
                self.motion = Motion::Resting { remaining };
                (remaining <= 0.0).then_some(MotionEvent::RestFinished)
            }
            Motion::Pursuing { mut target, mut retarget_in } => {
                retarget_in -= dt;
                if retarget_in <= 0.0 {
                    retarget_in = PURSUIT_RETARGET;
                    target = self.bounds.clamp(Vector2::new(
                        leader.x + rng.random_range(-PURSUIT_JITTER..=PURSUIT_JITTER),
                        leader.y + rng.random_range(-PURSUIT_JITTER..=PURSUIT_JITTER),
                    ));
                }
                let tau = if snap { SNAP_TIME_CONSTANT } else { PURSUIT_TIME_CONSTANT };
                let k = 1.0 - (-dt / tau).exp();
                self.position = Vector2::new(
                    self.position.x + (target.x - self.position.x) * k,
                    self.position.y + (target.y - self.position.y) * k,
                );
                self.motion = Motion::Pursuing { target, retarget_in };
                None
            }
            Motion::Dragging { .. } => None,
            Motion::Throwing { mut velocity } => {
                velocity = scaled(velocity, (-THROW_DECAY * dt).exp());
                self.position = Vector2::new(self.position.x + velocity.x * dt, self.position.y + velocity.y * dt);
                self.bounds.bounce(&mut self.position, &mut velocity, self.bounce);
                self.motion = Motion::Throwing { velocity };
                (length(velocity) < THROW_STOP_SPEED).then_some(MotionEvent::ThrowFinished)
            }
        }
    }

    /// Draw with `texture` when one was loaded, otherwise a flat stand-in:
    /// a cake for the leader, a round face for the follower.
    pub fn draw(&self, d: &mut RaylibDrawHandle, texture: Option<&Texture2D>, accent: Color) {
        let r = self.footprint();
        let (x, y, w, h) = (r.x, r.y, r.width, r.height);

        if let Some(texture) = texture {
            d.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Rectangle::new(x, y, w, h),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            );
            return;
        }

        match self.role {
            Role::Leader => {
                d.draw_rectangle_rec(Rectangle::new(x + w * 0.1, y + h * 0.45, w * 0.8, h * 0.5), Color::new(250, 230, 200, 255));
                d.draw_rectangle_rec(Rectangle::new(x + w * 0.1, y + h * 0.45, w * 0.8, h * 0.12), accent);
                d.draw_rectangle_rec(Rectangle::new(x + w * 0.47, y + h * 0.2, w * 0.06, h * 0.25), Color::SKYBLUE);
                d.draw_circle_v(Vector2::new(x + w * 0.5, y + h * 0.15), w * 0.05, Color::GOLD);
            }
            Role::Follower => {
                let center = Vector2::new(x + w * 0.5, y + h * 0.5);
                d.draw_circle_v(center, w * 0.42, accent);
                d.draw_circle_v(Vector2::new(center.x - w * 0.14, center.y - h * 0.08), w * 0.06, Color::WHITE);
                d.draw_circle_v(Vector2::new(center.x + w * 0.14, center.y - h * 0.08), w * 0.06, Color::WHITE);
                d.draw_circle_v(Vector2::new(center.x, center.y + h * 0.14), w * 0.08, Color::PINK);
            }
        }
    }

    fn step_scale(&mut self, dt: f32) {
        let Some(tween) = self.scale_tween.as_mut() else {
            return;
        };
        self.scale = tween.apply(dt);
        self.scale_timer += dt;
        if self.scale_timer >= self.scale_duration {
            self.scale = self.scale_target;
            self.scale_tween = None;
        }
    }
}

// Bounds narrower than twice the buffer collapse to their midpoint.
fn range_or_mid(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { (lo + hi) * 0.5 }
}

fn scaled(v: Vector2, k: f32) -> Vector2 {
    Vector2::new(v.x * k, v.y * k)
}

fn length(v: Vector2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

pub fn distance(a: Vector2, b: Vector2) -> f32 {
    length(Vector2::new(a.x - b.x, a.y - b.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bounds() -> Bounds {
        Bounds::for_area(Rectangle::new(100.0, 100.0, 400.0, 300.0), Vector2::new(50.0, 50.0))
    }

    fn mascot(role: Role) -> Mascot {
        let b = bounds();
        Mascot::new(role, b.center(), Vector2::new(50.0, 50.0), b)
    }

    #[test]
    fn wandering_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut m = mascot(Role::Leader);
        m.wander(&mut rng);
        for _ in 0..(60 * 60) {
            if m.step(1.0 / 60.0, &mut rng, Vector2::new(0.0, 0.0), false).is_some() {
                m.wander(&mut rng);
            }
            assert!(m.bounds().contains(m.position), "escaped to {:?}", m.position);
        }
    }

    #[test]
    fn wander_target_respects_buffer() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut m = mascot(Role::Follower);
        for _ in 0..100 {
            m.wander(&mut rng);
            let Motion::Wandering(leg) = m.motion else { panic!("not wandering") };
            let b = m.bounds();
            assert!(leg.target.x >= b.min.x + WANDER_BUFFER && leg.target.x <= b.max.x - WANDER_BUFFER);
            assert!(leg.target.y >= b.min.y + WANDER_BUFFER && leg.target.y <= b.max.y - WANDER_BUFFER);
            assert!((1.5..=3.0).contains(&leg.remaining));
        }
    }

    #[test]
    fn leg_ends_when_its_time_runs_out() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut m = mascot(Role::Leader);
        m.wander(&mut rng);
        let mut finished = false;
        for _ in 0..(60 * 4) {
            if m.step(1.0 / 60.0, &mut rng, m.position, false) == Some(MotionEvent::LegFinished) {
                finished = true;
                break;
            }
        }
        assert!(finished);
    }

    #[test]
    fn pursuit_closes_in_on_leader() {
        let mut rng = StdRng::seed_from_u64(24);
        let b = bounds();
        let mut m = Mascot::new(Role::Follower, b.min, Vector2::new(50.0, 50.0), b);
        m.pursue();
        let leader = b.max;
        let start = distance(m.position, leader);
        for _ in 0..120 {
            m.step(1.0 / 60.0, &mut rng, leader, false);
        }
        let end = distance(m.position, leader);
        assert!(end < start * 0.1, "{start} -> {end}");
        assert!(end <= PURSUIT_JITTER * 2.0);
        assert!(b.contains(m.position));
    }

    #[test]
    fn fast_release_throws_and_settles() {
        let mut rng = StdRng::seed_from_u64(25);
        let mut m = mascot(Role::Leader);
        let start = m.position;
        m.press(Vector2::new(start.x + 10.0, start.y + 10.0));
        assert!(m.is_held());
        for i in 1..=5 {
            m.drag(Vector2::new(start.x + 10.0 + 8.0 * i as f32, start.y + 10.0), 1.0 / 60.0);
        }
        assert!(m.release());
        assert!(matches!(m.motion, Motion::Throwing { .. }));

        let mut settled = false;
        for _ in 0..(60 * 5) {
            if m.step(1.0 / 60.0, &mut rng, m.position, false) == Some(MotionEvent::ThrowFinished) {
                settled = true;
                break;
            }
            assert!(m.bounds().contains(m.position));
        }
        assert!(settled);
    }

    #[test]
    fn slow_release_is_not_a_throw() {
        let mut m = mascot(Role::Follower);
        m.press(m.position);
        m.drag(m.position, 1.0 / 60.0);
        assert!(!m.release());
        assert!(matches!(m.motion, Motion::Dragging { .. }));
    }

    #[test]
    fn press_scales_up_and_release_scales_back() {
        let mut rng = StdRng::seed_from_u64(26);
        let mut m = mascot(Role::Follower);
        m.press(m.position);
        m.step(0.2, &mut rng, m.position, false);
        assert!((m.scale - 1.2).abs() < 1e-4);
        m.release();
        m.step(0.3, &mut rng, m.position, false);
        assert!((m.scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn drag_is_clamped_to_bounds() {
        let mut m = mascot(Role::Leader);
        m.press(m.position);
        m.drag(Vector2::new(-1000.0, 5000.0), 1.0 / 60.0);
        let b = m.bounds();
        assert_eq!(m.position.x, b.min.x);
        assert_eq!(m.position.y, b.max.y);
    }
}
