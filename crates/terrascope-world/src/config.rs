//! World session configuration.

use serde::{Deserialize, Serialize};
use terrascope_common::ConfigError;
use terrascope_worldgen::GenerationParams;

use crate::viewpoint::{validate_zoom, DEFAULT_MOVE_SPEED, DEFAULT_ZOOM};
use crate::visible::{validate_render_distance, DEFAULT_RENDER_DISTANCE};

/// Smallest accepted render distance.
pub const MIN_RENDER_DISTANCE: u32 = 1;

/// Largest accepted render distance.
pub const MAX_RENDER_DISTANCE: u32 = 100;

/// Settings for one [`crate::WorldSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed. A random seed is drawn when unset.
    pub seed: Option<u32>,
    /// Visible window radius in chunks.
    pub render_distance: u32,
    /// Drop stored chunks beyond this radius from the viewpoint.
    /// Unset keeps every generated chunk for the whole session.
    pub retain_radius: Option<u32>,
    /// Initial zoom.
    pub zoom: f64,
    /// Viewpoint move speed at zoom 1.
    pub move_speed: f64,
    /// Terrain generation parameters.
    pub generation: GenerationParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            render_distance: DEFAULT_RENDER_DISTANCE,
            retain_radius: None,
            zoom: DEFAULT_ZOOM,
            move_speed: DEFAULT_MOVE_SPEED,
            generation: GenerationParams::default(),
        }
    }
}

impl WorldConfig {
    /// Rejects settings a session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_render_distance(self.render_distance)?;
        if let Some(retain) = self.retain_radius {
            if retain < self.render_distance {
                return Err(ConfigError::RetainRadius {
                    retain,
                    render: self.render_distance,
                });
            }
        }
        validate_zoom(self.zoom)?;
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            return Err(ConfigError::MoveSpeed(self.move_speed));
        }
        self.generation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrascope_worldgen::GenerationMode;

    #[test]
    fn test_default_config_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.render_distance, 20);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = WorldConfig {
            render_distance: 0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RenderDistance(0)));

        let config = WorldConfig {
            render_distance: 2_000_000_000,
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RenderDistance(2_000_000_000))
        );
        let config = WorldConfig {
            render_distance: MAX_RENDER_DISTANCE,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = WorldConfig {
            retain_radius: Some(10),
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RetainRadius {
                retain: 10,
                render: 20
            })
        );

        let config = WorldConfig {
            zoom: 0.0,
            ..WorldConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Zoom { .. })));

        let mut config = WorldConfig::default();
        config.generation.noise_scale = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::NoiseScale(-1.0)));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: WorldConfig = toml::from_str(
            r#"
            seed = 99
            render_distance = 4

            [generation]
            mode = "zenith"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.render_distance, 4);
        assert_eq!(config.zoom, DEFAULT_ZOOM);
        assert_eq!(config.generation.mode, GenerationMode::Zenith);
        assert_eq!(config.generation.sea_level, 150.0);
    }
}
