use std::fs;
use std::path::{Path, PathBuf};

use raylib::prelude::Color;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fps: FPS,
            title: "Happy Birthday".to_string(),
        }
    }
}

/// Theme colours, the native stand-in for the page's CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub primary: String,
    pub primary_variant: String,
    pub secondary: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            primary: "#bb86fc".to_string(),
            primary_variant: "#3700b3".to_string(),
            secondary: "#03dac6".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Seconds of idle time before advancing to the next slide
    pub interval: f32,
    /// Heading text per slide, by index. Missing or empty entries mean no heading.
    pub headings: Vec<String>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: SLIDE_INTERVAL,
            headings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub enabled: bool,
    pub spawn_interval: f32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_interval: CONFETTI_SPAWN_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    pub enabled: bool,
    pub base_count: usize,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_count: BALLOON_BASE_COUNT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    pub enabled: bool,
    pub cake_image: Option<PathBuf>,
    pub follower_image: Option<PathBuf>,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cake_image: None,
            follower_image: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub enabled: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub music: Option<PathBuf>,
    /// Start muted playback immediately and unmute on the first interaction
    pub autoplay: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music: None,
            autoplay: true,
            volume: 0.8,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub palette: PaletteConfig,
    pub carousel: CarouselConfig,
    pub confetti: ConfettiConfig,
    pub balloons: BalloonConfig,
    pub chase: ChaseConfig,
    pub gallery: GalleryConfig,
    pub audio: AudioConfig,
}

impl Config {
    /// Load configuration from a JSON file. Absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn heading(&self, index: usize) -> Option<&str> {
        self.carousel
            .headings
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Particle colours, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Palette {
    pub primary: Color,
    pub primary_variant: Color,
    pub secondary: Color,
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            primary: parse_hex_color(&config.primary)?,
            primary_variant: parse_hex_color(&config.primary_variant)?,
            secondary: parse_hex_color(&config.secondary)?,
        })
    }

    /// The five confetti colours: theme colours plus two fixed accents.
    pub fn confetti_colors(&self) -> [Color; 5] {
        [
            self.primary,
            self.secondary,
            Color::new(0xff, 0x75, 0x97, 255),
            self.primary_variant,
            Color::new(0x01, 0x87, 0x86, 255),
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::new(0xbb, 0x86, 0xfc, 255),
            primary_variant: Color::new(0x37, 0x00, 0xb3, 255),
            secondary: Color::new(0x03, 0xda, 0xc6, 255),
        }
    }
}

pub fn parse_hex_color(text: &str) -> Result<Color, ConfigError> {
    let invalid = || ConfigError::InvalidColor(text.to_string());
    let hex = text.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}
