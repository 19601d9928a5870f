//! Application configuration.
//!
//! Loaded from a TOML file whose sections and fields are all optional:
//!
//! ```toml
//! [window]
//! title = "SR2"
//! width = 800
//! height = 600
//!
//! [scene]
//! model = "nave2.obj"
//! camera_position = { x = 10.0, y = 25.0, z = 30.0 }
//! fov_degrees = 45.0
//!
//! [render]
//! workers = 0            # 0 = one per available core
//!
//! [output]
//! snapshot = "frame.png" # render headless and save a PNG
//! frames = 1
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{Color, BLACK};
use crate::math::Vec3;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SR2".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub model: PathBuf,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub camera_up: Vec3,
    /// Starts at the camera position when unset.
    pub light_position: Option<Vec3>,
    /// World-space placement of the model before it spins.
    pub model_position: Vec3,
    pub model_scale: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub rotation_axis: Vec3,
    /// Radians per frame.
    pub rotation_speed: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("nave2.obj"),
            camera_position: Vec3::new(10.0, 25.0, 30.0),
            camera_target: Vec3::ZERO,
            camera_up: Vec3::Y,
            light_position: None,
            model_position: Vec3::ZERO,
            model_scale: 1.0,
            fov_degrees: 45.0,
            near: 0.01,
            far: 1000.0,
            rotation_axis: Vec3::Y,
            rotation_speed: 0.05,
        }
    }
}

impl SceneConfig {
    pub fn light_position(&self) -> Vec3 {
        self.light_position.unwrap_or(self.camera_position)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertex-stage threads, `0` for one per available core.
    pub workers: usize,
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            background: BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// When set, render without a window and save the last frame here.
    pub snapshot: Option<PathBuf>,
    pub frames: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            frames: 1,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        let scene = &self.scene;
        if !(scene.fov_degrees > 0.0 && scene.fov_degrees < 180.0) {
            return invalid(format!("fov_degrees must be in (0, 180), got {}", scene.fov_degrees));
        }
        if !(scene.near > 0.0 && scene.far > scene.near) {
            return invalid(format!(
                "clip planes need 0 < near < far, got near {} far {}",
                scene.near, scene.far
            ));
        }
        if !(scene.model_scale > 0.0 && scene.model_scale.is_finite()) {
            return invalid(format!("model_scale must be positive, got {}", scene.model_scale));
        }
        if scene.rotation_axis.magnitude() == 0.0 {
            return invalid("rotation_axis must be non-zero".to_string());
        }
        if self.output.frames == 0 {
            return invalid("output.frames must be at least 1".to_string());
        }

        Ok(())
    }
}
