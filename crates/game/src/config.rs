//! Scene configuration (viewport, camera lens, particles, run length). Loaded from
//! landingsite.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "landingsite.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Persistent scene settings. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Framebuffer width in pixels; with height it sets the aspect ratio.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Render two side-by-side views.
    #[serde(default)]
    pub split_screen: bool,
    /// Size of the exhaust particle pool.
    #[serde(default = "default_particle_capacity")]
    pub particle_capacity: usize,
    /// Particles emitted per frame while the engine burns.
    #[serde(default = "default_spawn_per_frame")]
    pub particles_per_frame: usize,
    /// Frames the headless driver simulates before exiting.
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Fixed frame step in seconds.
    #[serde(default = "default_timestep")]
    pub timestep: f32,
    /// Fixed RNG seed; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_fov() -> f32 {
    60.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_particle_capacity() -> usize {
    500
}
fn default_spawn_per_frame() -> usize {
    2
}
fn default_frames() -> u32 {
    600
}
fn default_timestep() -> f32 {
    1.0 / 60.0
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            split_screen: false,
            particle_capacity: default_particle_capacity(),
            particles_per_frame: default_spawn_per_frame(),
            frames: default_frames(),
            timestep: default_timestep(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Load config from `landingsite.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::info!("No {} found, using defaults", CONFIG_FILE);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the camera or simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window_width, self.window_height
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes need 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!("field of view {} out of range", self.fov_degrees)));
        }
        if !(self.timestep > 0.0) {
            return Err(ConfigError::Invalid(format!("timestep {} must be positive", self.timestep)));
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fov_degrees, 60.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: SceneConfig = ron::from_str("(split_screen: true, seed: Some(42))").expect("valid ron");
        assert!(config.split_screen);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.particle_capacity, 500);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = SceneConfig {
            frames: 10,
            ..Default::default()
        };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).expect("serializes");
        let back: SceneConfig = ron::from_str(&text).expect("parses");
        assert_eq!(back.frames, 10);
        assert_eq!(back.window_height, config.window_height);
    }

    #[test]
    fn bad_clip_planes_are_rejected() {
        let config = SceneConfig {
            near: 5.0,
            far: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SceneConfig::load_from(Path::new("definitely/not/here.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
