//! Simulation configuration.
//!
//! Every section uses `#[serde(default)]`, so a TOML file only needs the
//! keys it wants to change:
//!
//! ```
//! use particle_box::config::SimConfig;
//!
//! let config = SimConfig::from_toml_str("tick_ms = 20\n[spawn]\nbatch = { min = 5, spread = 10 }\n").unwrap();
//! assert_eq!(config.tick_ms, 20);
//! assert_eq!(config.spawn.batch.min, 5);
//! assert_eq!(config.spawn.initial.min, 2000);
//! assert_eq!(config.window.width, 600);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Projection, DEFAULT_MOVE_SPEED, DEFAULT_SENSITIVITY};
use crate::error::ConfigError;
use crate::hud::DEFAULT_MESSAGE_FRAMES;
use crate::math::Point3;
use crate::particle_set::SpawnCount;
use crate::time::{DEFAULT_MAX_CATCH_UP, DEFAULT_TICK_PERIOD};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub window: WindowConfig,
    /// Tick period in milliseconds.
    pub tick_ms: u64,
    /// Most ticks replayed back-to-back after a stall.
    pub max_catch_up_ticks: u32,
    /// RNG seed. Fresh entropy when absent.
    pub seed: Option<u64>,
    pub camera: CameraConfig,
    pub spawn: SpawnConfig,
    pub adjust: AdjustConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            tick_ms: DEFAULT_TICK_PERIOD.as_millis() as u64,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP,
            seed: None,
            camera: CameraConfig::default(),
            spawn: SpawnConfig::default(),
            adjust: AdjustConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            title: "Particle Box".to_string(),
        }
    }
}

/// Camera placement, feel and confinement box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub move_speed: f32,
    pub sensitivity: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Lower corner the camera position is clamped to.
    pub min: [f32; 3],
    /// Upper corner the camera position is clamped to.
    pub max: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        let projection = Projection::default();
        Self {
            position: [0.0, 0.0, 7.0],
            target: [0.0, 0.0, 0.0],
            move_speed: DEFAULT_MOVE_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            fov_y_degrees: projection.fov_y_degrees,
            near: projection.near,
            far: projection.far,
            min: [-4.7, -4.7, 0.3],
            max: [4.7, 4.7, 9.7],
        }
    }
}

impl CameraConfig {
    /// Build the camera this section describes.
    pub fn build(&self) -> Camera {
        Camera::new(Point3::from(self.position), Point3::from(self.target))
            .with_move_speed(self.move_speed)
            .with_sensitivity(self.sensitivity)
            .with_projection(Projection {
                fov_y_degrees: self.fov_y_degrees,
                aspect: 1.0,
                near: self.near,
                far: self.far,
            })
    }

    pub fn confinement(&self) -> (Point3, Point3) {
        (Point3::from(self.min), Point3::from(self.max))
    }
}

/// Bulk spawn sizes and the burst origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Used at startup and on regenerate.
    pub initial: SpawnCount,
    /// Used for additive batches.
    pub batch: SpawnCount,
    pub center: [f32; 3],
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial: SpawnCount::new(2000, 1000),
            batch: SpawnCount::new(20, 30),
            center: [0.0, 0.0, 5.0],
        }
    }
}

/// Step sizes for the bulk range/speed adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustConfig {
    pub range_step: f32,
    pub speed_step: f32,
    /// Ticks the summary stays on screen.
    pub message_frames: u32,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            range_step: 0.13,
            speed_step: 0.002,
            message_frames: DEFAULT_MESSAGE_FRAMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.tick_ms, 17);
        assert_eq!(config.window.width, 600);
        assert_eq!(config.spawn.initial, SpawnCount::new(2000, 1000));
        assert_eq!(config.spawn.batch, SpawnCount::new(20, 30));
        assert_eq!(config.adjust.range_step, 0.13);
        assert_eq!(config.adjust.message_frames, 60);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_roundtrip() {
        let mut config = SimConfig::default();
        config.seed = Some(42);
        config.camera.move_speed = 0.2;
        let toml_str = config.to_toml_string().unwrap();
        let parsed = SimConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_empty_is_default() {
        let parsed = SimConfig::from_toml_str("").unwrap();
        assert_eq!(parsed, SimConfig::default());
    }

    #[test]
    fn test_partial_section() {
        let toml_str = r#"
seed = 7

[camera]
position = [1.0, 2.0, 3.0]

[adjust]
speed_step = 0.001
"#;
        let config = SimConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.camera.position, [1.0, 2.0, 3.0]);
        assert_eq!(config.camera.target, [0.0, 0.0, 0.0]);
        assert_eq!(config.adjust.speed_step, 0.001);
        assert_eq!(config.adjust.range_step, 0.13);
    }

    #[test]
    fn test_parse_error() {
        let err = SimConfig::from_toml_str("tick_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::load(Path::new("/nonexistent/particle-box.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("particle-box.toml"));
    }

    #[test]
    fn test_camera_build() {
        let camera = CameraConfig::default().build();
        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 7.0));
        assert_eq!(camera.move_speed(), DEFAULT_MOVE_SPEED);
    }
}
