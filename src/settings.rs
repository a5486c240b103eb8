//! Game settings
//!
//! Read from an optional JSON file; every field falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TPS, GAME_WIDTH};
use crate::error::{Error, Result};

/// Largest scale at which the screen still fits in a terminal's u16 columns.
pub const MAX_SCALE: u16 = (u16::MAX as i32 / GAME_WIDTH) as u16;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The greenish Nokia 3310 palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Original,
    Harsh,
    Gray,
}

impl Palette {
    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::Original => "original",
            Palette::Harsh => "harsh",
            Palette::Gray => "gray",
        }
    }

    /// The darker colour, like a pixel that is ON
    pub fn dark(&self) -> Rgb {
        match self {
            Palette::Original => Rgb(0x43, 0x52, 0x3d),
            Palette::Harsh => Rgb(0x2b, 0x3f, 0x09),
            Palette::Gray => Rgb(0x1a, 0x19, 0x14),
        }
    }

    /// The lighter colour, like a pixel that is OFF
    pub fn light(&self) -> Rgb {
        match self {
            Palette::Original => Rgb(0xc7, 0xf0, 0xd8),
            Palette::Harsh => Rgb(0x9b, 0xc7, 0x00),
            Palette::Gray => Rgb(0x87, 0x91, 0x88),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub tps: u32,
    /// Terminal cells per logical pixel (horizontally)
    pub scale: u16,
    pub palette: Palette,
    /// Fixed RNG seed for reproducible runs; random when absent
    pub seed: Option<u64>,
    /// Where to write logs. The terminal is taken by the game, so without a
    /// file logging is off unless RUST_LOG asks for it.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tps: DEFAULT_TPS,
            scale: 1,
            palette: Palette::Original,
            seed: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| Error::json("settings", e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        info!(
            "loaded settings from {} (tps {}, palette {})",
            path.display(),
            settings.tps,
            settings.palette.as_str()
        );
        Ok(settings)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tps == 0 {
            return Err(Error::settings("tps must be at least 1"));
        }
        if self.scale == 0 {
            return Err(Error::settings("scale must be at least 1"));
        }
        if self.scale > MAX_SCALE {
            return Err(Error::settings(format!(
                "scale must be at most {MAX_SCALE}, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    /// Wall-clock length of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tps.max(1)
    }
}
