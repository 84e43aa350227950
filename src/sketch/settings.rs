use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;

use crate::model::{Axis, Color, Resolution};

const SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {axis} setting: {reason}")]
    InvalidResolutionSetting { axis: Axis, reason: String },
    #[error("invalid canvas setting: {0}")]
    InvalidCanvas(String),
}

/// Bounds for one axis of the grid resolution.
#[readonly::make]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSetting {
    pub axis: Axis,
    pub lower_bound: u32,
    pub upper_bound: u32,
    /// Smallest cell edge, in pixels, the canvas must fit at `upper_bound`.
    pub min_cell_size: f64,
    pub default_value: u32,
}

impl ResolutionSetting {
    pub fn new(
        axis: Axis,
        lower_bound: u32,
        upper_bound: u32,
        min_cell_size: f64,
        default_value: u32,
    ) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidResolutionSetting { axis, reason };
        if lower_bound < 1 {
            return Err(invalid(format!("lower bound {lower_bound} is below 1")));
        }
        if lower_bound > upper_bound {
            return Err(invalid(format!(
                "lower bound {lower_bound} is above upper bound {upper_bound}"
            )));
        }
        if !(lower_bound..=upper_bound).contains(&default_value) {
            return Err(invalid(format!(
                "default {default_value} is outside {lower_bound}..={upper_bound}"
            )));
        }
        if !(min_cell_size.is_finite() && min_cell_size > 0.0) {
            return Err(invalid(format!(
                "minimum cell size {min_cell_size} is not positive"
            )));
        }
        Ok(ResolutionSetting {
            axis,
            lower_bound,
            upper_bound,
            min_cell_size,
            default_value,
        })
    }

    fn default_for(axis: Axis) -> Self {
        ResolutionSetting {
            axis,
            lower_bound: 1,
            upper_bound: 100,
            min_cell_size: 1.0,
            default_value: 16,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_bound as f64 && value <= self.upper_bound as f64
    }
}

#[readonly::make]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSettings {
    pub width: ResolutionSetting,
    pub height: ResolutionSetting,
}

impl ResolutionSettings {
    pub fn new(
        width: ResolutionSetting,
        height: ResolutionSetting,
    ) -> Result<Self, ConfigError> {
        for (expected, setting) in [(Axis::Width, &width), (Axis::Height, &height)] {
            if setting.axis != expected {
                return Err(ConfigError::InvalidResolutionSetting {
                    axis: expected,
                    reason: format!("configured for the {} axis", setting.axis),
                });
            }
        }
        Ok(ResolutionSettings { width, height })
    }

    pub fn default_resolution(&self) -> Resolution {
        Resolution::new(self.width.default_value, self.height.default_value)
    }
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        ResolutionSettings {
            width: ResolutionSetting::default_for(Axis::Width),
            height: ResolutionSetting::default_for(Axis::Height),
        }
    }
}

/// Widget configuration, resolved once at startup and never mutated.
#[readonly::make]
#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    pub resolution: ResolutionSettings,
    pub background_color: Color,
    pub paint_color: Color,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub border_width: i32,
    pub reset_rainbow_on_mode_change: bool,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            resolution: ResolutionSettings::default(),
            background_color: Color::WHITE,
            paint_color: Color::BLACK,
            canvas_width: 600,
            canvas_height: 600,
            border_width: 1,
            reset_rainbow_on_mode_change: false,
        }
    }
}

impl SketchConfig {
    /// Drawing-area size: the configured canvas is the interior, the border sits outside it.
    pub fn outer_canvas_size(&self) -> (i32, i32) {
        (
            self.canvas_width + 2 * self.border_width,
            self.canvas_height + 2 * self.border_width,
        )
    }

    /// Loads the user's settings file, writing the defaults out when none exists.
    /// Any problem with the file falls back to the defaults.
    pub fn load() -> Self {
        let path = Self::settings_path();
        match Self::load_from(&path) {
            Ok(config) => {
                info!(target: "settings", "Loaded settings from {}", path.display());
                config
            }
            Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                info!(target: "settings", "No settings at {}, using defaults", path.display());
                let default = SketchConfig::default();
                if let Err(err) = default.save_to(&path) {
                    warn!(target: "settings", "Could not write default settings: {}", err);
                }
                default
            }
            Err(err) => {
                warn!(target: "settings", "Ignoring {}: {}", path.display(), err);
                SketchConfig::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut file = serde_json::from_str::<SettingsFile>(&contents)?;
        file.migrate();
        SketchConfig::try_from(file)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(&SettingsFile::from(self))?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn settings_path() -> PathBuf {
        let mut path = glib::user_config_dir().join("sketchpad");
        path.push("settings.json");
        path
    }

    #[cfg(test)]
    pub(crate) fn with_resolution(mut self, resolution: ResolutionSettings) -> Self {
        self.resolution = resolution;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_rainbow_reset(mut self, reset: bool) -> Self {
        self.reset_rainbow_on_mode_change = reset;
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct AxisSettingsFile {
    #[serde(default = "default_lower_bound")]
    lower_bound: u32,
    #[serde(default = "default_upper_bound")]
    upper_bound: u32,
    #[serde(default = "default_min_cell_size")]
    min_cell_size: f64,
    #[serde(default = "default_resolution_value")]
    default_value: u32,
}

impl Default for AxisSettingsFile {
    fn default() -> Self {
        AxisSettingsFile {
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            min_cell_size: default_min_cell_size(),
            default_value: default_resolution_value(),
        }
    }
}

impl AxisSettingsFile {
    fn into_setting(self, axis: Axis) -> Result<ResolutionSetting, ConfigError> {
        ResolutionSetting::new(
            axis,
            self.lower_bound,
            self.upper_bound,
            self.min_cell_size,
            self.default_value,
        )
    }
}

impl From<&ResolutionSetting> for AxisSettingsFile {
    fn from(setting: &ResolutionSetting) -> Self {
        AxisSettingsFile {
            lower_bound: setting.lower_bound,
            upper_bound: setting.upper_bound,
            min_cell_size: setting.min_cell_size,
            default_value: setting.default_value,
        }
    }
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone)]
struct SettingsFile {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    width: AxisSettingsFile,

    #[serde(default)]
    height: AxisSettingsFile,

    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_background_color")]
    background_color: Color,

    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_paint_color")]
    paint_color: Color,

    #[serde(default = "default_canvas_size")]
    canvas_width: i32,

    #[serde(default = "default_canvas_size")]
    canvas_height: i32,

    #[serde(default = "default_border_width")]
    border_width: i32,

    #[serde(default)]
    reset_rainbow_on_mode_change: bool,
}

impl SettingsFile {
    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = SETTINGS_VERSION;
            }
            _ => (),
        }
    }
}

impl TryFrom<SettingsFile> for SketchConfig {
    type Error = ConfigError;

    fn try_from(file: SettingsFile) -> Result<Self, Self::Error> {
        let resolution = ResolutionSettings::new(
            file.width.into_setting(Axis::Width)?,
            file.height.into_setting(Axis::Height)?,
        )?;
        if file.canvas_width < 1 || file.canvas_height < 1 {
            return Err(ConfigError::InvalidCanvas(format!(
                "canvas size {}×{} must be positive",
                file.canvas_width, file.canvas_height
            )));
        }
        if file.border_width < 0 {
            return Err(ConfigError::InvalidCanvas(format!(
                "border width {} is negative",
                file.border_width
            )));
        }
        Ok(SketchConfig {
            resolution,
            background_color: file.background_color,
            paint_color: file.paint_color,
            canvas_width: file.canvas_width,
            canvas_height: file.canvas_height,
            border_width: file.border_width,
            reset_rainbow_on_mode_change: file.reset_rainbow_on_mode_change,
        })
    }
}

impl From<&SketchConfig> for SettingsFile {
    fn from(config: &SketchConfig) -> Self {
        SettingsFile {
            version: SETTINGS_VERSION,
            width: AxisSettingsFile::from(&config.resolution.width),
            height: AxisSettingsFile::from(&config.resolution.height),
            background_color: config.background_color,
            paint_color: config.paint_color,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            border_width: config.border_width,
            reset_rainbow_on_mode_change: config.reset_rainbow_on_mode_change,
        }
    }
}

// Helper functions for default values
fn default_version() -> u32 {
    SETTINGS_VERSION
}
fn default_lower_bound() -> u32 {
    1
}
fn default_upper_bound() -> u32 {
    100
}
fn default_min_cell_size() -> f64 {
    1.0
}
fn default_resolution_value() -> u32 {
    16
}
fn default_background_color() -> Color {
    Color::WHITE
}
fn default_paint_color() -> Color {
    Color::BLACK
}
fn default_canvas_size() -> i32 {
    600
}
fn default_border_width() -> i32 {
    1
}
