use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod audio;
mod carousel;
mod chase;
mod config;
mod constants;
mod error;
mod gallery;
mod input;
mod particles;
mod show;
mod texture_loader;
mod timeline;

use crate::audio::MusicPlayback;
use crate::carousel::Slide;
use crate::config::{Config, Palette};
use crate::input::FrameInput;
use crate::show::{Show, ShowAssets};
use crate::texture_loader::{load_optional_texture, load_sorted_image_paths, load_texture_with_exif_rotation};

#[derive(Parser, Debug)]
#[command(name = "birthday-show", about = "A birthday slideshow with confetti, balloons and music")]
struct Args {
    /// Directory of slide images, shown in file name order
    slides_dir: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Background music file (overrides the config)
    #[arg(long)]
    music: Option<PathBuf>,

    /// Directory of overlay images, assigned to slides in reverse order
    #[arg(long)]
    overlays: Option<PathBuf>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    if let Some(fps) = args.fps {
        config.window.fps = fps;
    }
    if args.music.is_some() {
        config.audio.music = args.music.clone();
    }
    let palette = Palette::from_config(&config.palette).context("Invalid palette")?;

    info!("Slides from {}", args.slides_dir.display());
    let (mut rl, thread) = raylib::init()
        .size(config.window.width, config.window.height)
        .title(&config.window.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.window.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    let slides = match load_slides(&mut rl, &thread, &config, &args) {
        Ok(slides) => slides,
        Err(e) => {
            error!("{:#}", e);
            let mut d = rl.begin_drawing(&thread);
            d.clear_background(Color::BLACK);
            d.draw_text(&format!("Error: {}", e), 20, 20, 20, Color::RED);
            drop(d);
            std::thread::sleep(Duration::from_secs(5));
            return Err(e);
        }
    };

    let assets = ShowAssets {
        slides,
        cake: load_optional_texture(&mut rl, &thread, config.chase.cake_image.as_deref()),
        follower: load_optional_texture(&mut rl, &thread, config.chase.follower_image.as_deref()),
    };

    // --- Audio ---
    let device = if config.audio.enabled {
        RaylibAudio::init_audio_device()
            .map_err(|e| warn!("Audio device unavailable, music disabled: {}", e))
            .ok()
    } else {
        None
    };
    let music = match (device.as_ref(), config.audio.music.as_deref()) {
        (Some(device), Some(path)) => load_music(device, path),
        (Some(_), None) => {
            warn!("No music file configured");
            None
        }
        _ => None,
    };
    let mut playback = MusicPlayback::new(music, config.audio.volume);

    let screen = Vector2::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    let mut show = Show::new(&config, palette, assets.parts(), screen, rand::rng());
    show.start(&mut playback);

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        playback.pump();

        let input = FrameInput::capture(&rl);
        show.update(dt, &input, &mut playback);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        show.draw(&mut d, &assets);
    }

    info!("Window closed");
    Ok(())
}

fn load_slides(rl: &mut RaylibHandle, thread: &RaylibThread, config: &Config, args: &Args) -> Result<Vec<Slide>> {
    let image_paths = load_sorted_image_paths(&args.slides_dir)
        .with_context(|| format!("Error loading images from '{}'", args.slides_dir.display()))?;

    let mut overlay_paths = match &args.overlays {
        Some(dir) => load_sorted_image_paths(dir).unwrap_or_else(|e| {
            warn!("Skipping overlays: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };
    overlay_paths.reverse();

    let mut slides = Vec::new();
    for path in image_paths {
        let texture = match load_texture_with_exif_rotation(rl, thread, &path) {
            Ok(texture) => texture,
            Err(e) => {
                warn!("Skipping slide: {}", e);
                continue;
            }
        };
        let index = slides.len();
        let heading = config.heading(index).map(str::to_string);
        let overlay = load_optional_texture(rl, thread, overlay_paths.get(index).map(PathBuf::as_path));
        slides.push(Slide::new(texture, heading, overlay));
    }

    if slides.is_empty() {
        anyhow::bail!("No slides were created successfully");
    }
    info!("Loaded {} slides", slides.len());
    Ok(slides)
}

fn load_music<'aud>(device: &'aud RaylibAudio, path: &Path) -> Option<Music<'aud>> {
    let Some(name) = path.to_str() else {
        warn!("Music path {} is not valid UTF-8", path.display());
        return None;
    };
    match device.new_music(name) {
        Ok(music) => {
            info!("Loaded music {}", path.display());
            Some(music)
        }
        Err(e) => {
            warn!("Could not load music {}: {}", path.display(), e);
            None
        }
    }
}
