use raylib::prelude::*;

use crate::carousel::transition::{HeadingPose, OverlayPose, SlideParts};

const HEADING_FONT_SIZE: i32 = 64;
const HEADING_REFERENCE_WIDTH: f32 = 1920.0;

pub struct Slide {
    pub image: Texture2D,
    pub heading: Option<String>,
    pub overlay: Option<Texture2D>,
}

impl Slide {
    pub fn new(image: Texture2D, heading: Option<String>, overlay: Option<Texture2D>) -> Self {
        Self { image, heading, overlay }
    }

    pub fn parts(&self) -> SlideParts {
        SlideParts {
            heading: self.heading.is_some(),
            overlay: self.overlay.is_some(),
        }
    }

    /// Draw the full-screen section. The outer layer clips, the inner layer
    /// carries the image, so opposite offsets read as two depths.
    pub fn draw_section(
        &self,
        d: &mut RaylibDrawHandle,
        screen: Vector2,
        outer_x_percent: f32,
        inner_x_percent: f32,
        image_scale: f32,
    ) {
        let outer_x = screen.x * outer_x_percent / 100.0;
        let inner_x = screen.x * inner_x_percent / 100.0;
        let clip = Rectangle::new(outer_x.max(0.0), 0.0, (outer_x + screen.x).min(screen.x) - outer_x.max(0.0), screen.y);
        if clip.width <= 0.0 {
            return;
        }

        d.draw_rectangle_rec(clip, Color::new(18, 12, 28, 255));

        // Cover the screen, then apply the transition zoom
        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;
        let cover = (screen.x / tex_width).max(screen.y / tex_height) * image_scale;
        let scaled_width = tex_width * cover;
        let scaled_height = tex_height * cover;
        let dest = Rectangle::new(
            outer_x + inner_x + (screen.x - scaled_width) * 0.5,
            (screen.y - scaled_height) * 0.5,
            scaled_width,
            scaled_height,
        );
        draw_clipped(d, &self.image, dest, clip, Color::WHITE);
    }

    pub fn draw_overlay(&self, d: &mut RaylibDrawHandle, screen: Vector2, pose: OverlayPose) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        let tex_width = overlay.width() as f32;
        let tex_height = overlay.height() as f32;

        // Rests in the right third of the screen
        let fit = (screen.x * 0.28 / tex_width).min(screen.y * 0.45 / tex_height);
        let panel_width = tex_width * fit;
        let width = panel_width * pose.scale_x;
        let height = tex_height * fit * pose.scale_y;
        let center = Vector2::new(screen.x * 0.76 + panel_width * pose.x_percent / 100.0, screen.y * 0.52);

        let alpha = (pose.alpha.clamp(0.0, 1.0) * 255.0) as u8;
        d.draw_texture_pro(
            overlay,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            Rectangle::new(center.x, center.y, width, height),
            Vector2::new(width * 0.5, height * 0.5),
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }

    pub fn draw_heading(&self, d: &mut RaylibDrawHandle, screen: Vector2, pose: HeadingPose, accent: Color) {
        let Some(text) = &self.heading else {
            return;
        };
        let text_width = d.measure_text(text, HEADING_FONT_SIZE) as f32;
        let x = screen.x * 0.08 + text_width * pose.x_percent / 100.0;
        let y = screen.y * 0.70;

        let bar_width = pose.width * screen.x / HEADING_REFERENCE_WIDTH;
        d.draw_rectangle_rec(Rectangle::new(x, y + HEADING_FONT_SIZE as f32 + 8.0, bar_width, 6.0), accent);
        d.draw_text(text, x as i32 + 3, y as i32 + 3, HEADING_FONT_SIZE, Color::new(0, 0, 0, 140));
        d.draw_text(text, x as i32, y as i32, HEADING_FONT_SIZE, Color::WHITE);
    }
}

/// Draw `texture` stretched over `dest`, keeping only the part inside `clip`.
fn draw_clipped(d: &mut RaylibDrawHandle, texture: &Texture2D, dest: Rectangle, clip: Rectangle, tint: Color) {
    let left = dest.x.max(clip.x);
    let top = dest.y.max(clip.y);
    let right = (dest.x + dest.width).min(clip.x + clip.width);
    let bottom = (dest.y + dest.height).min(clip.y + clip.height);
    if right <= left || bottom <= top || dest.width <= 0.0 || dest.height <= 0.0 {
        return;
    }

    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let source = Rectangle::new(
        (left - dest.x) / dest.width * tex_width,
        (top - dest.y) / dest.height * tex_height,
        (right - left) / dest.width * tex_width,
        (bottom - top) / dest.height * tex_height,
    );
    d.draw_texture_pro(
        texture,
        source,
        Rectangle::new(left, top, right - left, bottom - top),
        Vector2::new(0.0, 0.0),
        0.0,
        tint,
    );
}
