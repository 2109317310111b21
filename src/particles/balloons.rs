use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;
use crate::particles::pool::Pool;
use crate::timeline::{Track, Yoyo};

const BALLOON_COLORS: [(u8, u8, u8); 12] = [
    (0xff, 0x75, 0x97),
    (0xff, 0x7e, 0xb3),
    (0xff, 0x65, 0xa3),
    (0x7a, 0xfc, 0xff),
    (0xfe, 0xff, 0x9c),
    (0xff, 0xf7, 0x40),
    (0xff, 0x9a, 0x8b),
    (0xff, 0x65, 0xa5),
    (0xff, 0x6b, 0x8b),
    (0x6f, 0xc3, 0xdf),
    (0xe0, 0xf9, 0xb5),
    (0xa5, 0xde, 0xe5),
];

#[derive(Debug, Clone)]
pub struct Balloon {
    pub color: Color,
    pub size: f32,
    start_x: f32,
    rise: Track,
    sway: Yoyo,
    elapsed: f32,
}

impl Balloon {
    pub fn random(rng: &mut impl Rng, screen: Vector2) -> Self {
        let (r, g, b) = BALLOON_COLORS[rng.random_range(0..BALLOON_COLORS.len())];
        let size = rng.random_range(60.0..=100.0);
        let sway_amount = rng.random_range(50.0..=150.0);
        Self {
            color: Color::new(r, g, b, 255),
            size,
            start_x: rng.random_range(0.0..screen.x.max(1.0)),
            rise: Track::new(screen.y + size, -size * 2.0, rng.random_range(15.0..=25.0), ease::linear_none),
            sway: Yoyo::new(0.0, sway_amount, rng.random_range(3.0..=6.0), ease::sine_in_out),
            elapsed: 0.0,
        }
    }

    /// Top-left corner of the balloon body.
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.start_x + self.sway.sample(self.elapsed), self.rise.sample(self.elapsed))
    }

    pub fn height(&self) -> f32 {
        self.size * 1.25
    }

    /// Advance by `dt`. Returns `true` once the balloon has floated off the top.
    pub fn update(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.rise.end_time()
    }

    pub fn contains(&self, point: Vector2) -> bool {
        let pos = self.position();
        let rx = self.size * 0.5;
        let ry = self.height() * 0.5;
        let dx = (point.x - (pos.x + rx)) / rx;
        let dy = (point.y - (pos.y + ry)) / ry;
        dx * dx + dy * dy <= 1.0
    }

    pub fn center(&self) -> Vector2 {
        let pos = self.position();
        Vector2::new(pos.x + self.size * 0.5, pos.y + self.height() * 0.5)
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let center = self.center();
        let bottom = center.y + self.height() * 0.5;
        d.draw_line_ex(
            Vector2::new(center.x, bottom),
            Vector2::new(center.x - self.size * 0.1, bottom + self.size * 1.2),
            1.5,
            Color::new(255, 255, 255, 160),
        );
        d.draw_triangle(
            Vector2::new(center.x, bottom - 2.0),
            Vector2::new(center.x - 6.0, bottom + 7.0),
            Vector2::new(center.x + 6.0, bottom + 7.0),
            self.color,
        );
        d.draw_ellipse(center.x as i32, center.y as i32, self.size * 0.5, self.height() * 0.5, self.color);
        d.draw_ellipse(
            (center.x - self.size * 0.18) as i32,
            (center.y - self.height() * 0.2) as i32,
            self.size * 0.09,
            self.height() * 0.14,
            Color::new(255, 255, 255, 90),
        );
    }
}

/// Floating balloons with a population ceiling of `base * 1.5`.
pub struct BalloonFleet {
    pool: Pool<Balloon>,
    base_count: usize,
    spawn_timer: f32,
    screen: Vector2,
}

impl BalloonFleet {
    pub fn new(rng: &mut impl Rng, base_count: usize, screen: Vector2) -> Self {
        let ceiling = (base_count as f32 * BALLOON_CAP_FACTOR).floor() as usize;
        let mut fleet = Self {
            pool: Pool::with_capacity(ceiling),
            base_count,
            spawn_timer: 0.0,
            screen,
        };
        fleet.populate(rng);
        fleet
    }

    fn populate(&mut self, rng: &mut impl Rng) {
        for _ in 0..self.base_count {
            self.pool.spawn(Balloon::random(rng, self.screen));
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[cfg(test)]
    pub fn ceiling(&self) -> usize {
        self.pool.capacity()
    }

    /// Float every balloon, drop those that left the screen and top up the
    /// population every two seconds. Returns how many floated away.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) -> usize {
        let removed = self.pool.reap(|b| b.update(dt));

        self.spawn_timer += dt;
        while self.spawn_timer >= BALLOON_SPAWN_INTERVAL {
            self.spawn_timer -= BALLOON_SPAWN_INTERVAL;
            if !self.pool.is_full() {
                self.pool.spawn(Balloon::random(rng, self.screen));
            }
        }
        removed
    }

    /// Pop the front-most balloon under `point`, if any. Returns where it
    /// was and its colour so the caller can scatter shards.
    pub fn pop_at(&mut self, point: Vector2) -> Option<(Vector2, Color)> {
        let (id, center, color) = self
            .pool
            .iter()
            .filter(|e| e.item.contains(point))
            .max_by_key(|e| e.id)
            .map(|e| (e.id, e.item.center(), e.item.color))?;
        self.pool.remove(id);
        tracing::debug!(id, "balloon popped");
        Some((center, color))
    }

    /// Tear everything down and start over for a new viewport.
    pub fn resize(&mut self, rng: &mut impl Rng, screen: Vector2) {
        let removed = self.pool.clear();
        tracing::debug!(removed, width = screen.x, height = screen.y, "balloons respawned after resize");
        self.screen = screen;
        self.spawn_timer = 0.0;
        self.populate(rng);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let mut ordered: Vec<_> = self.pool.iter().collect();
        ordered.sort_by_key(|e| e.id);
        for entry in ordered {
            entry.item.draw(d);
        }
    }
}
