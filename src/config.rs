use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::brush::BrushSize;
use crate::error::{Error, Result};
use crate::mapping::MappingPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "fogwarden.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub fog: FogSettings,
    pub brush: BrushSettings,
    pub window: WindowSettings,
    pub log: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FogSettings {
    pub width: u32,
    pub height: u32,
    /// Size the fog grid to each loaded map instead of `width`×`height`.
    pub match_image: bool,
    pub gm_alpha: f32,
    pub player_alpha: f32,
    pub color: u32,
    pub mapping: MappingPolicy,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrushSettings {
    pub radius: f32,
    pub min: f32,
    pub max: f32,
    pub sensitivity: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub gm_width: usize,
    pub gm_height: usize,
    pub player_width: usize,
    pub player_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fog: FogSettings::default(),
            brush: BrushSettings::default(),
            window: WindowSettings::default(),
            log: "info".into(),
        }
    }
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            match_image: false,
            gm_alpha: 0.5,
            player_alpha: 1.0,
            color: 0x00_00_00_00,
            mapping: MappingPolicy::Clamp,
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self { radius: 20.0, min: 5.0, max: 50.0, sensitivity: 50.0 }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self { gm_width: 1280, gm_height: 720, player_width: 1280, player_height: 720 }
    }
}

impl Settings {
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn brush_size(&self) -> Result<BrushSize> {
        let b = &self.brush;
        BrushSize::new(b.radius, b.min, b.max, b.sensitivity)
    }

    /// Fog grid size for a map of `map_w`×`map_h` pixels.
    pub fn fog_dimensions(&self, map_w: usize, map_h: usize) -> (u32, u32) {
        if self.fog.match_image && map_w > 0 && map_h > 0 {
            (map_w as u32, map_h as u32)
        } else {
            (self.fog.width, self.fog.height)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fog.width == 0 || self.fog.height == 0 {
            return Err(Error::Config(format!(
                "fog size must be non-zero, got {}x{}",
                self.fog.width, self.fog.height
            )));
        }
        for (name, alpha) in [("gm_alpha", self.fog.gm_alpha), ("player_alpha", self.fog.player_alpha)] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::Config(format!("fog.{name} must be within 0..=1, got {alpha}")));
            }
        }
        let w = &self.window;
        if [w.gm_width, w.gm_height, w.player_width, w.player_height].contains(&0) {
            return Err(Error::Config("window sizes must be non-zero".into()));
        }
        self.brush_size()?;
        Ok(())
    }
}

/// Defaults, then the TOML file, then environment overrides.
/// An explicit `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
    let mut settings = match fs::read_to_string(&file) {
        Ok(raw) => Settings::from_toml(&raw)?,
        Err(e) if path.is_none() && e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(e) => return Err(Error::Config(format!("failed to read '{}': {e}", file.display()))),
    };

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("FOGWARDEN_FOG_WIDTH").and_then(|v| v.parse().ok()) {
        settings.fog.width = v;
    }
    if let Some(v) = var("FOGWARDEN_FOG_HEIGHT").and_then(|v| v.parse().ok()) {
        settings.fog.height = v;
    }
    if let Some(v) = var("FOGWARDEN_LOG") {
        settings.log = v;
    }
}
