use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;
use crate::particles::particle::Particle;
use crate::particles::pool::Pool;

/// Ambient falling confetti plus one-off bursts and balloon shards.
pub struct ParticleField {
    ambient: Pool<Particle>,
    bursts: Pool<Particle>,
    colors: Vec<Color>,
    spawn_interval: f32,
    spawn_timer: f32,
    continuous: bool,
}

impl ParticleField {
    pub fn new(colors: Vec<Color>, spawn_interval: f32, continuous: bool) -> Self {
        Self {
            ambient: Pool::with_capacity(CONFETTI_CAPACITY),
            bursts: Pool::with_capacity(BURST_CAPACITY),
            colors,
            spawn_interval: spawn_interval.max(0.001),
            spawn_timer: 0.0,
            continuous,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ambient.len() + self.bursts.len()
    }

    /// Advance every particle, drop the finished ones and emit ambient
    /// confetti for the elapsed time. Returns how many particles were removed.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, screen_width: f32) -> usize {
        let removed = self.ambient.reap(|p| p.update(dt)) + self.bursts.reap(|p| p.update(dt));

        if self.continuous {
            self.spawn_timer += dt;
            while self.spawn_timer >= self.spawn_interval {
                self.spawn_timer -= self.spawn_interval;
                if self.ambient.spawn(Particle::confetti(rng, screen_width, &self.colors)).is_none() {
                    tracing::trace!("ambient confetti pool full");
                }
            }
        }
        removed
    }

    /// 20 to 40 confetti dots exploding from `origin`.
    pub fn burst(&mut self, rng: &mut impl Rng, origin: Vector2, screen_width: f32) -> usize {
        let count = rng.random_range(20..=40);
        (0..count)
            .filter_map(|_| self.bursts.spawn(Particle::burst(rng, origin, screen_width, &self.colors)))
            .count()
    }

    /// Shards scattering from a popped balloon, in its colour.
    pub fn shatter(&mut self, rng: &mut impl Rng, origin: Vector2, color: Color) -> usize {
        (0..BALLOON_SHARDS)
            .filter_map(|_| self.bursts.spawn(Particle::shard(rng, origin, color)))
            .count()
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        for entry in self.ambient.iter().chain(self.bursts.iter()) {
            entry.item.draw(d);
        }
    }
}
