use rand::Rng;
use raylib::prelude::*;
use tracing::{debug, info};

use crate::audio::{AudioController, Playback};
use crate::carousel::{Carousel, HeadingPose, OverlayPose, Slide, SlideParts};
use crate::chase::Chase;
use crate::config::{Config, Palette};
use crate::constants::*;
use crate::gallery::Gallery;
use crate::input::{FrameInput, GestureObserver};
use crate::particles::{BalloonFleet, ParticleField};

const BUTTON_INSET: f32 = 56.0;
const BUTTON_RADIUS: f32 = 32.0;
const COUNTER_FONT_SIZE: i32 = 40;

/// Textures the show draws with. Kept apart from the show itself so the
/// frame logic runs without a window.
pub struct ShowAssets {
    pub slides: Vec<Slide>,
    pub cake: Option<Texture2D>,
    pub follower: Option<Texture2D>,
}

impl ShowAssets {
    pub fn parts(&self) -> Vec<SlideParts> {
        self.slides.iter().map(Slide::parts).collect()
    }
}

/// The whole page: carousel, particles, balloons, mascots, gallery and the
/// music button, updated in a fixed order every frame.
pub struct Show<R: Rng> {
    carousel: Carousel,
    particles: ParticleField,
    balloons: Option<BalloonFleet>,
    chase: Option<Chase>,
    gallery: Option<Gallery>,
    audio: AudioController,
    gestures: GestureObserver,
    palette: Palette,
    autoplay: bool,
    screen: Vector2,
    // A press taken by the button or a balloon; the drag that follows is not a swipe
    captured: bool,
    rng: R,
}

impl<R: Rng> Show<R> {
    pub fn new(config: &Config, palette: Palette, parts: Vec<SlideParts>, screen: Vector2, mut rng: R) -> Self {
        let gallery_items = parts.len();
        let carousel = Carousel::new(parts, config.carousel.interval);
        let particles = ParticleField::new(
            palette.confetti_colors().to_vec(),
            config.confetti.spawn_interval,
            config.confetti.enabled,
        );
        let balloons = config
            .balloons
            .enabled
            .then(|| BalloonFleet::new(&mut rng, config.balloons.base_count, screen));
        let chase = if config.chase.enabled {
            Chase::new(&mut rng, chase_area(screen), MASCOT_SIZE)
        } else {
            None
        };
        let gallery = if config.gallery.enabled {
            Gallery::new(gallery_items, screen)
        } else {
            None
        };

        info!(
            slides = carousel.len(),
            balloons = balloons.is_some(),
            chase = chase.is_some(),
            gallery = gallery.is_some(),
            "show ready"
        );

        Self {
            carousel,
            particles,
            balloons,
            chase,
            gallery,
            audio: AudioController::new(),
            gestures: GestureObserver::default(),
            palette,
            autoplay: config.audio.autoplay,
            screen,
            captured: false,
            rng,
        }
    }

    /// Attempt muted autoplay and arm the first-interaction unmute.
    pub fn start(&mut self, backend: &mut impl Playback) {
        self.audio.start(backend, self.autoplay);
    }

    pub fn button_center(&self) -> Vector2 {
        Vector2::new(self.screen.x - BUTTON_INSET, BUTTON_INSET)
    }

    fn button_hit(&self, point: Vector2) -> bool {
        let c = self.button_center();
        let (dx, dy) = (point.x - c.x, point.y - c.y);
        dx * dx + dy * dy <= BUTTON_RADIUS * BUTTON_RADIUS
    }

    fn resize(&mut self, screen: Vector2) {
        debug!(width = screen.x, height = screen.y, "window resized");
        self.screen = screen;
        if let Some(balloons) = self.balloons.as_mut() {
            balloons.resize(&mut self.rng, screen);
        }
        if let Some(chase) = self.chase.as_mut() {
            chase.set_area(chase_area(screen));
        }
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.relayout(screen);
        }
    }

    pub fn update(&mut self, dt: f32, input: &FrameInput, backend: &mut impl Playback) {
        if input.resized || input.screen != self.screen {
            self.resize(input.screen);
        }

        // Input, highest priority first
        let mut consumed = false;
        if input.pressed && self.button_hit(input.pointer) {
            self.audio.toggle(backend);
            let center = self.button_center();
            self.particles.burst(&mut self.rng, center, self.screen.x);
            self.captured = true;
            consumed = true;
        }
        if !consumed && !self.captured {
            if let Some(chase) = self.chase.as_mut() {
                consumed = chase.pointer(input, dt, &mut self.rng);
            }
        }
        if !consumed && input.pressed {
            if let Some((center, color)) = self.balloons.as_mut().and_then(|b| b.pop_at(input.pointer)) {
                self.particles.shatter(&mut self.rng, center, color);
                self.captured = true;
                consumed = true;
            }
        }
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.hover(&mut self.rng, input.pointer, input.pointer_delta);
        }

        let gesture = if consumed || self.captured {
            self.gestures.feed(-input.wheel * WHEEL_NOTCH)
        } else {
            self.gestures.observe(input)
        };
        if let Some(direction) = input.key_nav.or(gesture) {
            self.carousel.step(direction);
        }
        if input.pressed || gesture.is_some() {
            self.audio.first_interaction(backend);
        }
        if input.released {
            self.captured = false;
        }

        // Clocks
        self.carousel.update(dt);
        self.particles.update(dt, &mut self.rng, self.screen.x);
        if let Some(balloons) = self.balloons.as_mut() {
            balloons.update(dt, &mut self.rng);
        }
        if let Some(chase) = self.chase.as_mut() {
            chase.update(dt, &mut self.rng);
        }
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.update(dt);
        }
        self.audio.update(dt);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, assets: &ShowAssets) {
        let screen = self.screen;
        let accent = self.palette.secondary;
        let slide = |i: usize| assets.slides.get(i);

        match self.carousel.transition() {
            Some(t) => {
                let incoming = t.incoming();
                let outgoing = t.outgoing();
                let (from, to) = (slide(t.from), slide(t.to));

                if let Some(s) = from {
                    s.draw_section(d, screen, 0.0, 0.0, 1.0);
                }
                if let Some(s) = to {
                    s.draw_section(d, screen, incoming.outer_x_percent, incoming.inner_x_percent, incoming.image_scale);
                }
                if let (Some(s), Some(pose)) = (from, outgoing.overlay) {
                    s.draw_overlay(d, screen, pose);
                }
                if let (Some(s), Some(pose)) = (to, incoming.overlay) {
                    s.draw_overlay(d, screen, pose);
                }
                if let (Some(s), Some(pose)) = (from, outgoing.heading) {
                    s.draw_heading(d, screen, pose, accent);
                }
                if let (Some(s), Some(pose)) = (to, incoming.heading) {
                    s.draw_heading(d, screen, pose, accent);
                }
            }
            None => {
                if let Some(s) = slide(self.carousel.current()) {
                    s.draw_section(d, screen, 0.0, 0.0, 1.0);
                    s.draw_overlay(d, screen, OverlayPose::REST);
                    s.draw_heading(d, screen, HeadingPose::REST, accent);
                }
            }
        }

        if let Some(balloons) = &self.balloons {
            balloons.draw(d);
        }
        if let Some(gallery) = &self.gallery {
            let textures: Vec<&Texture2D> = assets.slides.iter().map(|s| &s.image).collect();
            gallery.draw(d, &textures);
        }
        if let Some(chase) = &self.chase {
            chase.draw(d, assets.cake.as_ref(), assets.follower.as_ref(), self.palette.primary);
        }
        self.particles.draw(d);
        self.draw_counter(d);
        self.draw_button(d);
    }

    fn draw_counter(&self, d: &mut RaylibDrawHandle) {
        let number = match self.carousel.transition() {
            Some(t) => t.counter(),
            None => self.carousel.current() as u32 + 1,
        };
        let text = format!("{:02} / {:02}", number, self.carousel.len());
        let width = d.measure_text(&text, COUNTER_FONT_SIZE);
        let x = self.screen.x as i32 - width - 32;
        let y = self.screen.y as i32 - COUNTER_FONT_SIZE - 28;
        d.draw_text(&text, x + 2, y + 2, COUNTER_FONT_SIZE, Color::new(0, 0, 0, 140));
        d.draw_text(&text, x, y, COUNTER_FONT_SIZE, Color::WHITE);
    }

    fn draw_button(&self, d: &mut RaylibDrawHandle) {
        let center = self.button_center();
        d.draw_circle_v(center, BUTTON_RADIUS, self.palette.primary_variant);
        d.draw_circle_v(center, BUTTON_RADIUS - 3.0, self.palette.primary);
        let side = BUTTON_RADIUS * 1.2;
        let bounds = Rectangle::new(center.x - side * 0.5, center.y - side * 0.5, side, side);
        self.audio.icon().draw(d, bounds, Color::WHITE);
    }
}

/// Drag area in the lower right of the window.
fn chase_area(screen: Vector2) -> Rectangle {
    Rectangle::new(screen.x * 0.55, screen.y * 0.58, screen.x * 0.4, screen.y * 0.36)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioState;
    use crate::error::AudioError;
    use crate::input::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct Speaker {
        playing: bool,
        muted: bool,
        refuse: bool,
    }

    impl Playback for Speaker {
        fn play(&mut self, muted: bool) -> Result<(), AudioError> {
            if self.refuse {
                return Err(AudioError::PlaybackRejected("refused".to_string()));
            }
            self.playing = true;
            self.muted = muted;
            Ok(())
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn mute(&mut self) {
            self.muted = true;
        }
    }

    fn screen() -> Vector2 {
        Vector2::new(1280.0, 720.0)
    }

    fn show(slides: usize) -> Show<StdRng> {
        let mut config = Config::default();
        config.confetti.enabled = false;
        let parts = vec![SlideParts { heading: true, overlay: false }; slides];
        Show::new(&config, Palette::default(), parts, screen(), StdRng::seed_from_u64(7))
    }

    fn idle() -> FrameInput {
        FrameInput::idle(1280.0, 720.0)
    }

    fn click(point: Vector2) -> FrameInput {
        let mut input = idle();
        input.pointer = point;
        input.pressed = true;
        input.down = true;
        input
    }

    // Top-left corner: clear of the button, the drag area and the gallery
    fn empty_spot() -> Vector2 {
        Vector2::new(5.0, 5.0)
    }

    #[test]
    fn autoplay_starts_muted_and_first_click_unmutes() {
        let mut speaker = Speaker::default();
        let mut s = show(3);
        s.start(&mut speaker);
        assert_eq!(s.audio.state(), AudioState::MutedPlaying);
        assert!(speaker.muted);

        s.update(DT, &click(empty_spot()), &mut speaker);
        assert_eq!(s.audio.state(), AudioState::UnmutedPlaying);
        assert!(speaker.playing && !speaker.muted);
        assert!(!s.audio.is_armed());
    }

    #[test]
    fn button_toggles_and_bursts() {
        let mut speaker = Speaker::default();
        let mut s = show(3);
        s.start(&mut speaker);
        let button = s.button_center();

        s.update(DT, &click(button), &mut speaker);
        assert_eq!(s.audio.state(), AudioState::UnmutedPlaying);
        assert!(s.particles.len() >= 20);

        let mut release = idle();
        release.pointer = button;
        release.released = true;
        s.update(DT, &release, &mut speaker);

        s.update(DT, &click(button), &mut speaker);
        assert_eq!(s.audio.state(), AudioState::Paused);
        assert!(!speaker.playing);
        assert!(speaker.muted);
    }

    #[test]
    fn refused_unmute_keeps_muted_playback() {
        let mut speaker = Speaker::default();
        let mut s = show(2);
        s.start(&mut speaker);
        speaker.refuse = true;
        s.update(DT, &click(empty_spot()), &mut speaker);
        assert_eq!(s.audio.state(), AudioState::MutedPlaying);
        assert!(speaker.muted);
    }

    #[test]
    fn wheel_navigates_and_counts_as_interaction() {
        let mut speaker = Speaker::default();
        let mut s = show(3);
        s.start(&mut speaker);
        let mut input = idle();
        input.wheel = -1.0;
        s.update(DT, &input, &mut speaker);
        assert_eq!(s.carousel.current(), 1);
        assert!(s.carousel.is_animating());
        assert_eq!(s.audio.state(), AudioState::UnmutedPlaying);
    }

    #[test]
    fn keys_navigate_without_unmuting() {
        let mut speaker = Speaker::default();
        let mut s = show(3);
        s.start(&mut speaker);
        let mut input = idle();
        input.key_nav = Some(Direction::Backward);
        s.update(DT, &input, &mut speaker);
        assert_eq!(s.carousel.current(), 2);
        assert_eq!(s.audio.state(), AudioState::MutedPlaying);
    }

    #[test]
    fn swipe_after_button_press_does_not_navigate() {
        let mut speaker = Speaker::default();
        let mut s = show(3);
        let button = s.button_center();
        s.update(DT, &click(button), &mut speaker);

        let mut drag = idle();
        drag.pointer = Vector2::new(button.x, button.y - 60.0);
        drag.pointer_delta = Vector2::new(0.0, -60.0);
        drag.down = true;
        s.update(DT, &drag, &mut speaker);
        assert_eq!(s.carousel.current(), 0);
    }

    #[test]
    fn resize_respawns_balloons_and_moves_drag_area() {
        let mut speaker = Speaker::default();
        let mut s = show(2);
        for _ in 0..(60 * 5) {
            s.update(DT, &idle(), &mut speaker);
        }
        let mut input = FrameInput::idle(800.0, 600.0);
        input.resized = true;
        s.update(DT, &input, &mut speaker);
        assert_eq!(s.balloons.as_ref().map(BalloonFleet::len), Some(BALLOON_BASE_COUNT));
        let area = s.chase.as_ref().map(Chase::area).expect("chase");
        assert_eq!(area.x, 800.0 * 0.55);
    }
}
