//! User configuration for the Exam AI window.
//!
//! Read once at startup from `<config_dir>/exam-ai/config.toml`. Every key is
//! optional; a missing file means defaults.

use crate::error::ConfigError;
use eframe::egui::Color32;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "exam-ai";
const CONFIG_FILE: &str = "config.toml";

/// Smallest window edge, also used as the viewport's minimum size.
pub const MIN_WINDOW_SIZE: f32 = 400.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub window: WindowConfig,
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
        }
    }
}

impl WindowConfig {
    /// Configured size, raised to [`MIN_WINDOW_SIZE`] on each edge. NaN also
    /// falls back to the minimum.
    pub fn inner_size(&self) -> [f32; 2] {
        [
            self.width.max(MIN_WINDOW_SIZE),
            self.height.max(MIN_WINDOW_SIZE),
        ]
    }
}

/// Theme colors as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: String,
    pub button_background: String,
    pub button_text: String,
    pub text: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            button_background: "#f8f8ff".to_string(),
            button_text: "#000000".to_string(),
            text: "#ffffff".to_string(),
        }
    }
}

/// Parsed theme colors, ready for egui.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub button_background: Color32,
    pub button_text: Color32,
    pub text: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            button_background: Color32::from_rgb(0xf8, 0xf8, 0xff),
            button_text: Color32::BLACK,
            text: Color32::WHITE,
        }
    }
}

impl ThemeConfig {
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            background: parse_color("background", &self.background)?,
            button_background: parse_color("button_background", &self.button_background)?,
            button_text: parse_color("button_text", &self.button_text)?,
            text: parse_color("text", &self.text)?,
        })
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color32, ConfigError> {
    hex_rgb(value).ok_or_else(|| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

/// `#rrggbb`, case-insensitive.
fn hex_rgb(value: &str) -> Option<Color32> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Default location of the user config file, if the platform has one.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the user configuration. A missing file yields defaults.
pub fn load() -> Result<AppConfig, ConfigError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(AppConfig::default()),
    }
}

/// Load configuration from `path`. A missing file yields defaults; read,
/// parse and color errors are returned.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.theme.palette()?;
    Ok(config)
}
