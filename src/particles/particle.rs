use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;
use crate::timeline::{Track, eased_progress};

/// Cap radii (as a fraction of half the height) for the seven ribbon
/// silhouettes, from wavy to half-round.
const RIBBON_CAPS: [(f32, f32); 7] = [
    (1.0, 0.2),
    (0.8, 0.6),
    (1.0, 1.0),
    (0.9, 0.3),
    (0.75, 0.75),
    (1.0, 0.0),
    (0.0, 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Dot,
    Ribbon { caps: (f32, f32) },
}

/// Launch parameters: speed in px/s, angle in degrees (0 = +x, 90 = down),
/// gravity in px/s².
#[derive(Debug, Clone, Copy)]
pub struct Launch {
    pub velocity: f32,
    pub angle: f32,
    pub gravity: f32,
}

impl Launch {
    pub fn offset(&self, t: f32) -> Vector2 {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        Vector2::new(
            self.velocity * cos * t,
            self.velocity * sin * t + 0.5 * self.gravity * t * t,
        )
    }
}

#[derive(Debug, Clone)]
pub enum Motion {
    /// Ambient confetti: launched, falls and spins, fades near the end.
    Fall {
        launch: Launch,
        duration: f32,
        spin: f32,
        fade: Track,
    },
    /// Button burst: pops in while flying outward and fading.
    Burst {
        launch: Launch,
        duration: f32,
        spin: f32,
        pop: Track,
    },
    /// Balloon shard: slides to a fixed offset while fading.
    Shard { offset: Vector2, duration: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePose {
    pub position: Vector2,
    pub rotation: f32,
    pub scale: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct Particle {
    origin: Vector2,
    pub color: Color,
    pub size: Vector2,
    pub shape: Shape,
    rotation: f32,
    motion: Motion,
    elapsed: f32,
}

fn pick<T: Copy>(rng: &mut impl Rng, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

// Rounded to a 0.1 step, like the vw sizes it stands for.
fn stepped(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    (rng.random_range(low..=high) * 10.0).round() / 10.0
}

impl Particle {
    pub fn confetti(rng: &mut impl Rng, screen_width: f32, colors: &[Color]) -> Self {
        let vw = screen_width / 100.0;
        let duration = rng.random_range(2.0..=4.0);
        let fade_duration = rng.random_range(0.5..=1.5);
        let fade_start = duration - fade_duration * 0.5;

        Self {
            origin: Vector2::new(rng.random_range(0.0..screen_width.max(1.0)), CONFETTI_START_Y),
            color: pick(rng, colors),
            size: Vector2::new(stepped(rng, 0.6, 1.2) * vw, stepped(rng, 0.3, 0.8) * vw),
            shape: Shape::Ribbon { caps: pick(rng, &RIBBON_CAPS) },
            rotation: rng.random_range(0.0..360.0),
            motion: Motion::Fall {
                launch: Launch {
                    velocity: rng.random_range(150.0..=250.0),
                    angle: rng.random_range(225.0..=315.0),
                    gravity: rng.random_range(400.0..=600.0),
                },
                duration,
                spin: rng.random_range(720.0..=1440.0),
                fade: Track::new(1.0, 0.0, fade_duration, ease::quad_out).delayed(fade_start),
            },
            elapsed: 0.0,
        }
    }

    pub fn burst(rng: &mut impl Rng, origin: Vector2, screen_width: f32, colors: &[Color]) -> Self {
        let side = 1.5 * screen_width / 100.0;
        Self {
            origin,
            color: pick(rng, colors),
            size: Vector2::new(side, side),
            shape: Shape::Dot,
            rotation: 0.0,
            motion: Motion::Burst {
                launch: Launch {
                    velocity: rng.random_range(300.0..=600.0),
                    angle: rng.random_range(0.0..360.0),
                    gravity: rng.random_range(800.0..=1200.0),
                },
                duration: rng.random_range(0.8..=1.5),
                spin: rng.random_range(0.0..=720.0),
                pop: Track::new(0.0, rng.random_range(0.5..=1.5), 0.2, ease::cubic_out),
            },
            elapsed: 0.0,
        }
    }

    pub fn shard(rng: &mut impl Rng, origin: Vector2, color: Color) -> Self {
        Self {
            origin,
            color,
            size: Vector2::new(8.0, 8.0),
            shape: Shape::Dot,
            rotation: 0.0,
            motion: Motion::Shard {
                offset: Vector2::new(rng.random_range(-100.0..=100.0), rng.random_range(-100.0..=100.0)),
                duration: 1.0,
            },
            elapsed: 0.0,
        }
    }

    /// Total time from spawn to removal.
    pub fn lifetime(&self) -> f32 {
        match &self.motion {
            Motion::Fall { duration, fade, .. } => duration.max(fade.end_time()),
            Motion::Burst { duration, pop, .. } => duration.max(pop.end_time()),
            Motion::Shard { duration, .. } => *duration,
        }
    }

    /// Advance by `dt`. Returns `true` once the particle's timeline is done.
    pub fn update(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.lifetime()
    }

    pub fn pose(&self) -> ParticlePose {
        let t = self.elapsed;
        match &self.motion {
            Motion::Fall { launch, duration, spin, fade } => {
                let progress = eased_progress(ease::quad_out, t, *duration);
                ParticlePose {
                    position: add(self.origin, launch.offset(progress * duration)),
                    rotation: self.rotation + spin * progress,
                    scale: 1.0,
                    alpha: fade.sample(t),
                }
            }
            Motion::Burst { launch, duration, spin, pop } => {
                let progress = eased_progress(ease::quad_out, t, *duration);
                ParticlePose {
                    position: add(self.origin, launch.offset(progress * duration)),
                    rotation: self.rotation + spin * progress,
                    scale: pop.sample(t),
                    alpha: 1.0 - progress,
                }
            }
            Motion::Shard { offset, duration } => {
                let progress = eased_progress(ease::quad_out, t, *duration);
                ParticlePose {
                    position: Vector2::new(self.origin.x + offset.x * progress, self.origin.y + offset.y * progress),
                    rotation: 0.0,
                    scale: 1.0,
                    alpha: 1.0 - progress,
                }
            }
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let pose = self.pose();
        if pose.alpha <= 0.0 || pose.scale <= 0.0 {
            return;
        }
        let color = Color::new(self.color.r, self.color.g, self.color.b, (pose.alpha.clamp(0.0, 1.0) * 255.0) as u8);
        let width = self.size.x * pose.scale;
        let height = self.size.y * pose.scale;

        match self.shape {
            Shape::Dot => d.draw_circle_v(pose.position, width * 0.5, color),
            Shape::Ribbon { caps } => {
                d.draw_rectangle_pro(
                    Rectangle::new(pose.position.x, pose.position.y, width, height),
                    Vector2::new(width * 0.5, height * 0.5),
                    pose.rotation,
                    color,
                );
                let (sin, cos) = pose.rotation.to_radians().sin_cos();
                let half = width * 0.5;
                for (sign, cap) in [(-1.0, caps.0), (1.0, caps.1)] {
                    if cap > 0.0 {
                        let end = Vector2::new(pose.position.x + cos * half * sign, pose.position.y + sin * half * sign);
                        d.draw_circle_v(end, height * 0.5 * cap, color);
                    }
                }
            }
        }
    }
}

fn add(a: Vector2, b: Vector2) -> Vector2 {
    Vector2::new(a.x + b.x, a.y + b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn colors() -> Vec<Color> {
        vec![Color::RED, Color::GOLD]
    }

    #[test]
    fn confetti_starts_above_viewport_and_launches_upward() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let mut p = Particle::confetti(&mut rng, 1000.0, &colors());
            let start = p.pose();
            assert_eq!(start.position.y, CONFETTI_START_Y);
            assert!(start.position.x >= 0.0 && start.position.x < 1000.0);
            assert_eq!(start.alpha, 1.0);
            p.update(0.05);
            assert!(p.pose().position.y < CONFETTI_START_Y);
        }
    }

    #[test]
    fn confetti_lifetime_is_bounded_and_ends_invisible() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let mut p = Particle::confetti(&mut rng, 800.0, &colors());
            let life = p.lifetime();
            assert!(life >= 2.0 - 0.75 + 0.5 && life <= 4.75 + 1e-4, "lifetime {life}");
            assert!(!p.update(life * 0.5));
            assert!(p.update(life));
            assert_eq!(p.pose().alpha, 0.0);
        }
    }

    #[test]
    fn burst_pops_in_then_fades() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = Particle::burst(&mut rng, Vector2::new(50.0, 50.0), 1000.0, &colors());
        assert_eq!(p.pose().scale, 0.0);
        assert_eq!(p.size.x, 15.0);
        p.update(0.2);
        let popped = p.pose().scale;
        assert!((0.5..=1.5).contains(&popped));
        assert!(p.update(1.5));
        assert_eq!(p.pose().alpha, 0.0);
    }

    #[test]
    fn shard_travels_at_most_its_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        let origin = Vector2::new(300.0, 300.0);
        let mut p = Particle::shard(&mut rng, origin, Color::BLUE);
        assert!(p.update(1.0));
        let end = p.pose().position;
        assert!((end.x - origin.x).abs() <= 100.0);
        assert!((end.y - origin.y).abs() <= 100.0);
        assert_eq!(p.lifetime(), 1.0);
    }
}
