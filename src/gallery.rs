use rand::Rng;
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::constants::*;
use crate::timeline::Yoyo;

const WOBBLE_ANGLE: f32 = 15.0;      // Degrees either way
const WOBBLE_HALF_PERIOD: f32 = 0.4;
const SPRING_STIFFNESS: f32 = 60.0;
const SPRING_DAMPING: f32 = 8.0;
const THUMB_GAP: f32 = 12.0;
const THUMB_MARGIN: f32 = 24.0;

#[derive(Debug, Clone)]
struct Wobble {
    swing: Yoyo,
    elapsed: f32,
}

/// One thumbnail: rests at `rest`, knocked about by the pointer.
#[derive(Debug, Clone)]
pub struct Thumb {
    pub rest: Rectangle,
    pub offset: Vector2,
    pub velocity: Vector2,
    pub rotation: f32,
    hovered: bool,
    wobble: Option<Wobble>,
}

impl Thumb {
    fn new(rest: Rectangle) -> Self {
        Self {
            rest,
            offset: Vector2::new(0.0, 0.0),
            velocity: Vector2::new(0.0, 0.0),
            rotation: 0.0,
            hovered: false,
            wobble: None,
        }
    }

    #[cfg(test)]
    fn is_settled(&self) -> bool {
        self.wobble.is_none() && self.offset.x.abs() < 0.5 && self.offset.y.abs() < 0.5
    }

    fn contains(&self, p: Vector2) -> bool {
        let x = self.rest.x + self.offset.x;
        let y = self.rest.y + self.offset.y;
        p.x >= x && p.x <= x + self.rest.width && p.y >= y && p.y <= y + self.rest.height
    }

    fn kick(&mut self, rng: &mut impl Rng, delta: Vector2) {
        self.velocity = Vector2::new(
            self.velocity.x + delta.x * GALLERY_KICK,
            self.velocity.y + delta.y * GALLERY_KICK,
        );
        let angle = rng.random_range(-WOBBLE_ANGLE..=WOBBLE_ANGLE);
        self.wobble = Some(Wobble {
            swing: Yoyo::new(0.0, angle, WOBBLE_HALF_PERIOD, ease::sine_in_out),
            elapsed: 0.0,
        });
    }

    fn update(&mut self, dt: f32) {
        // Damped spring back to the rest offset
        let ax = -SPRING_STIFFNESS * self.offset.x - SPRING_DAMPING * self.velocity.x;
        let ay = -SPRING_STIFFNESS * self.offset.y - SPRING_DAMPING * self.velocity.y;
        self.velocity = Vector2::new(self.velocity.x + ax * dt, self.velocity.y + ay * dt);
        self.offset = Vector2::new(self.offset.x + self.velocity.x * dt, self.offset.y + self.velocity.y * dt);

        if let Some(wobble) = self.wobble.as_mut() {
            wobble.elapsed += dt;
            if wobble.elapsed >= WOBBLE_HALF_PERIOD * 2.0 {
                self.rotation = 0.0;
                self.wobble = None;
            } else {
                self.rotation = wobble.swing.sample(wobble.elapsed);
            }
        }
    }
}

/// Strip of slide thumbnails along the bottom edge that wave when the
/// pointer brushes past.
pub struct Gallery {
    thumbs: Vec<Thumb>,
}

impl Gallery {
    /// Returns `None` when there is nothing to show.
    pub fn new(count: usize, screen: Vector2) -> Option<Self> {
        if count == 0 {
            warn!("No images for the gallery, skipping");
            return None;
        }
        let count = count.min(GALLERY_MAX_ITEMS);
        let thumbs = layout(count, screen).into_iter().map(Thumb::new).collect();
        debug!("Gallery with {} thumbnails", count);
        Some(Self { thumbs })
    }

    pub fn relayout(&mut self, screen: Vector2) {
        for (thumb, rest) in self.thumbs.iter_mut().zip(layout(self.thumbs.len(), screen)) {
            thumb.rest = rest;
        }
    }

    /// Track the pointer; a thumbnail it has just entered gets kicked along
    /// the pointer's travel. Returns the number kicked.
    pub fn hover(&mut self, rng: &mut impl Rng, pointer: Vector2, delta: Vector2) -> usize {
        let mut kicked = 0;
        for thumb in &mut self.thumbs {
            let inside = thumb.contains(pointer);
            if inside && !thumb.hovered && (delta.x != 0.0 || delta.y != 0.0) {
                thumb.kick(rng, delta);
                kicked += 1;
            }
            thumb.hovered = inside;
        }
        kicked
    }

    pub fn update(&mut self, dt: f32) {
        let dt = dt * GALLERY_TIME_SCALE;
        for thumb in &mut self.thumbs {
            thumb.update(dt);
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, textures: &[&Texture2D]) {
        for (thumb, texture) in self.thumbs.iter().zip(textures) {
            let rest = thumb.rest;
            let center = Vector2::new(
                rest.x + rest.width * 0.5 + thumb.offset.x,
                rest.y + rest.height * 0.5 + thumb.offset.y,
            );
            let origin = Vector2::new(rest.width * 0.5, rest.height * 0.5);
            let frame = Rectangle::new(center.x, center.y, rest.width + 8.0, rest.height + 8.0);
            d.draw_rectangle_pro(frame, Vector2::new(origin.x + 4.0, origin.y + 4.0), thumb.rotation, Color::WHITE);

            // Square crop from the middle of the image
            let tex_width = texture.width() as f32;
            let tex_height = texture.height() as f32;
            let side = tex_width.min(tex_height);
            d.draw_texture_pro(
                texture,
                Rectangle::new((tex_width - side) * 0.5, (tex_height - side) * 0.5, side, side),
                Rectangle::new(center.x, center.y, rest.width, rest.height),
                origin,
                thumb.rotation,
                Color::WHITE,
            );
        }
    }
}

/// Square slots along the bottom-left edge.
fn layout(count: usize, screen: Vector2) -> Vec<Rectangle> {
    let side = (screen.x * 0.07).clamp(40.0, 110.0);
    let y = screen.y - side - THUMB_MARGIN;
    (0..count)
        .map(|i| Rectangle::new(THUMB_MARGIN + i as f32 * (side + THUMB_GAP), y, side, side))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn screen() -> Vector2 {
        Vector2::new(1280.0, 720.0)
    }

    fn inside(thumb: &Thumb) -> Vector2 {
        Vector2::new(thumb.rest.x + thumb.rest.width * 0.5, thumb.rest.y + thumb.rest.height * 0.5)
    }

    #[test]
    fn declines_without_images_and_caps_the_strip() {
        assert!(Gallery::new(0, screen()).is_none());
        assert_eq!(Gallery::new(3, screen()).map(|g| g.thumbs.len()), Some(3));
        assert_eq!(Gallery::new(20, screen()).map(|g| g.thumbs.len()), Some(GALLERY_MAX_ITEMS));
    }

    #[test]
    fn entering_kicks_once_along_pointer_travel() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut g = Gallery::new(2, screen()).expect("gallery");
        let p = inside(&g.thumbs[0]);
        let delta = Vector2::new(4.0, -2.0);

        assert_eq!(g.hover(&mut rng, p, delta), 1);
        assert_eq!(g.thumbs[0].velocity.x, 4.0 * GALLERY_KICK);
        assert_eq!(g.thumbs[0].velocity.y, -2.0 * GALLERY_KICK);
        assert!(g.thumbs[1].is_settled());

        // Still inside: no second kick
        assert_eq!(g.hover(&mut rng, p, delta), 0);
    }

    #[test]
    fn still_pointer_does_not_kick() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = Gallery::new(1, screen()).expect("gallery");
        let p = inside(&g.thumbs[0]);
        assert_eq!(g.hover(&mut rng, p, Vector2::new(0.0, 0.0)), 0);
    }

    #[test]
    fn wobble_stays_within_angle_and_settles() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = Gallery::new(1, screen()).expect("gallery");
        let p = inside(&g.thumbs[0]);
        g.hover(&mut rng, p, Vector2::new(10.0, 0.0));
        assert!(!g.thumbs[0].is_settled());

        for _ in 0..(60 * 3) {
            g.update(1.0 / 60.0);
            assert!(g.thumbs[0].rotation.abs() <= WOBBLE_ANGLE + 1e-3);
        }
        let thumb = &g.thumbs[0];
        assert!(thumb.is_settled(), "offset {:?}", thumb.offset);
        assert_eq!(thumb.rotation, 0.0);
    }

    #[test]
    fn wobble_runs_faster_than_nominal() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = Gallery::new(1, screen()).expect("gallery");
        let p = inside(&g.thumbs[0]);
        g.hover(&mut rng, p, Vector2::new(1.0, 0.0));
        // 0.8s nominal round trip finishes in 0.8 / 1.2 of wall time
        g.update(WOBBLE_HALF_PERIOD * 2.0 / GALLERY_TIME_SCALE + 0.01);
        assert_eq!(g.thumbs[0].rotation, 0.0);
    }

    #[test]
    fn relayout_follows_the_window() {
        let mut g = Gallery::new(2, screen()).expect("gallery");
        g.relayout(Vector2::new(800.0, 600.0));
        let rest = g.thumbs[0].rest;
        assert!(rest.y + rest.height <= 600.0);
    }
}
