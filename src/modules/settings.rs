//! Tunable constants for the chip drop animation.
//!
//! Every number the animation uses lives here so a JSON file can override
//! it. `Settings::default()` is the stock nine-chip drop.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rigid-body parameters shared by every chip world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Gravity vector in world units (y points up)
    pub gravity: [f32; 2],
    /// Centre of the static ground body
    pub ground_position: [f32; 2],
    /// Half extents of the ground cuboid
    pub ground_half_extents: [f32; 2],
    /// x of chip 0; chip i sits at `chip_start_x + world_spacing * i`
    pub chip_start_x: f32,
    pub world_spacing: f32,
    pub chip_start_y: f32,
    pub chip_radius: f32,
    pub chip_density: f32,
    pub chip_friction: f32,
    pub chip_restitution: f32,
    /// Impulse applied to each chip right after it is built
    pub initial_impulse: [f32; 2],
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, -50.0],
            ground_position: [0.0, -10.0],
            ground_half_extents: [50.0, 10.0],
            chip_start_x: -10.0,
            world_spacing: 5.0,
            chip_start_y: 10.0,
            chip_radius: 0.5,
            chip_density: 1.0,
            chip_friction: 0.3,
            chip_restitution: 0.9, // high restitution so chips bounce
            initial_impulse: [0.0, -10.0],
        }
    }
}

/// Clock settings for the frame driver and the staggered spawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Driver invocations per second
    pub tick_rate: u32,
    /// Seconds of animation before the driver disarms
    pub duration: f32,
    /// Seconds between two consecutive world creations
    pub spawn_delay: f32,
    /// Catch-up ticks allowed per rendered frame
    pub max_substeps: u32,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            duration: 2.0,
            spawn_delay: 0.2,
            max_substeps: 8,
        }
    }
}

impl TimelineSettings {
    /// Length of one driver tick in seconds
    pub fn step(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// Simulation-to-screen mapping and window layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    /// Left edge of chip 0, in pixels
    pub origin_x: f32,
    /// Horizontal distance between two chips, in pixels
    pub lane_spacing: f32,
    pub pixels_per_meter: f32,
    /// Chip image is scaled to fit a square of this side
    pub sprite_size: f32,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            origin_x: 10.0,
            lane_spacing: 100.0,
            pixels_per_meter: 100.0,
            sprite_size: 100.0,
            window_width: 920,
            window_height: 600,
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of chips (lanes) in the animation
    pub chip_count: usize,
    /// Chip image, resolved once at startup
    pub asset_path: PathBuf,
    pub physics: PhysicsSettings,
    pub timeline: TimelineSettings,
    pub screen: ScreenSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chip_count: 9,
            asset_path: PathBuf::from("assets/pokerchip.png"),
            physics: PhysicsSettings::default(),
            timeline: TimelineSettings::default(),
            screen: ScreenSettings::default(),
        }
    }
}

/// Errors from reading, writing or validating a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read/write settings file '{}': {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to parse settings file '{}': {error}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|error| SettingsError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|error| SettingsError::Parse {
                path: path.to_path_buf(),
                error,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings as pretty JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        fs::write(path.as_ref(), contents).map_err(|error| SettingsError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Load from `path` when given, falling back to defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.chip_count == 0 {
            return Err(SettingsError::Invalid("chip_count must be at least 1"));
        }
        if self.timeline.tick_rate == 0 {
            return Err(SettingsError::Invalid("tick_rate must be positive"));
        }
        if !(self.timeline.duration > 0.0 && self.timeline.duration.is_finite()) {
            return Err(SettingsError::Invalid("duration must be positive"));
        }
        if !(self.timeline.spawn_delay >= 0.0) {
            return Err(SettingsError::Invalid("spawn_delay must not be negative"));
        }
        // Due tick of the last chip has to fit the u32 tick clock
        let last_due = self.timeline.spawn_delay as f64
            * self.timeline.tick_rate as f64
            * (self.chip_count - 1) as f64;
        if !(last_due <= u32::MAX as f64) {
            return Err(SettingsError::Invalid("spawn_delay is too large"));
        }
        if !(self.screen.sprite_size > 0.0 && self.screen.sprite_size.is_finite()) {
            return Err(SettingsError::Invalid("sprite_size must be positive"));
        }
        let screen = &self.screen;
        if ![screen.origin_x, screen.lane_spacing, screen.pixels_per_meter]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(SettingsError::Invalid(
                "origin_x, lane_spacing and pixels_per_meter must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.chip_count, 9);
        assert_eq!(settings.timeline.tick_rate, 60);
        assert!((settings.timeline.step() - 1.0 / 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "timeline": { "duration": 3.0 } }"#).unwrap();
        assert_eq!(settings.timeline.duration, 3.0);
        assert_eq!(settings.timeline.tick_rate, 60);
        assert_eq!(settings.physics, PhysicsSettings::default());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.chip_count = 4;
        settings.to_file(&path).unwrap();
        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "chip_count": 0 }"#).unwrap();
        assert!(matches!(
            Settings::from_file(&path),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_oversized_spawn_delay_rejected() {
        let mut settings = Settings::default();
        settings.timeline.spawn_delay = 1.0e8;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slow.json");
        fs::write(&path, r#"{ "timeline": { "spawn_delay": 1.0e8 } }"#).unwrap();
        assert_eq!(Settings::load_or_default(Some(&path)), Settings::default());
    }

    #[test]
    fn test_non_finite_mapping_rejected() {
        let mut settings = Settings::default();
        settings.screen.pixels_per_meter = f32::NAN;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let mut settings = Settings::default();
        settings.screen.lane_spacing = f32::INFINITY;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.screen.origin_x = f32::NEG_INFINITY;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            Settings::from_file(&path),
            Err(SettingsError::Io { .. })
        ));
        assert_eq!(Settings::load_or_default(Some(&path)), Settings::default());
    }
}
