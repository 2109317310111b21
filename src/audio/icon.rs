use raylib::prelude::*;

use crate::constants::ICON_MORPH_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Play,
    Pause,
}

impl Glyph {
    fn progress(self) -> f32 {
        match self {
            Glyph::Play => 0.0,
            Glyph::Pause => 1.0,
        }
    }
}

// Quads in unit space, vertices ordered TL, BL, BR, TR. The play triangle is
// split in two so each half can morph into one pause bar.
const PLAY: [[(f32, f32); 4]; 2] = [
    [(0.30, 0.20), (0.30, 0.80), (0.55, 0.65), (0.55, 0.35)],
    [(0.55, 0.35), (0.55, 0.65), (0.80, 0.50), (0.80, 0.50)],
];
const PAUSE: [[(f32, f32); 4]; 2] = [
    [(0.30, 0.20), (0.30, 0.80), (0.45, 0.80), (0.45, 0.20)],
    [(0.55, 0.20), (0.55, 0.80), (0.70, 0.80), (0.70, 0.20)],
];

/// Play/pause icon that morphs between its two glyphs.
pub struct IconMorph {
    progress: f32,
    target: Glyph,
    tween: Option<ease::Tween>,
    timer: f32,
}

impl IconMorph {
    pub fn new(glyph: Glyph) -> Self {
        Self {
            progress: glyph.progress(),
            target: glyph,
            tween: None,
            timer: 0.0,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> Glyph {
        self.target
    }

    /// Jump straight to `glyph`.
    pub fn set(&mut self, glyph: Glyph) {
        self.target = glyph;
        self.progress = glyph.progress();
        self.tween = None;
    }

    /// Animate from wherever the icon is now to `glyph`.
    pub fn morph_to(&mut self, glyph: Glyph) {
        self.target = glyph;
        self.timer = 0.0;
        self.tween = Some(ease::Tween::new(ease::cubic_in_out, self.progress, glyph.progress(), ICON_MORPH_DURATION)); // Closest raylib curve to a quartic in-out
    }

    pub fn update(&mut self, dt: f32) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        self.progress = tween.apply(dt);
        self.timer += dt;
        if self.timer >= ICON_MORPH_DURATION {
            self.progress = self.target.progress();
            self.tween = None;
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, bounds: Rectangle, color: Color) {
        let t = self.progress;
        for (play, pause) in PLAY.iter().zip(PAUSE.iter()) {
            let v: Vec<Vector2> = play
                .iter()
                .zip(pause.iter())
                .map(|(a, b)| {
                    Vector2::new(
                        bounds.x + bounds.width * (a.0 + (b.0 - a.0) * t),
                        bounds.y + bounds.height * (a.1 + (b.1 - a.1) * t),
                    )
                })
                .collect();
            d.draw_triangle(v[0], v[1], v[2], color);
            d.draw_triangle(v[0], v[2], v[3], color);
        }
    }
}
