//! # Configuration
//!
//! Engine settings, loaded from JSON. Every struct is `#[serde(default)]`, so a
//! document only needs to name the values it changes:
//!
//! ```
//! use chicky_engine::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "seed": 7, "world": { "render_distance": 2 } }"#).unwrap();
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.world.render_distance, 2);
//! assert_eq!(config.world.sea_level, 48);
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::voxels::gradient::MAX_WORLD_SIZE;

/// Environment variable naming the configuration file read by [`crate::run`].
pub const CONFIG_ENV_VAR: &str = "CHICKY_CONFIG";

/// Top-level engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World seed. The five terrain fields derive from `seed` to `seed + 4`.
    pub seed: i64,
    /// Terrain and chunk settings.
    pub world: WorldConfig,
    /// Tick settings.
    pub simulation: SimulationConfig,
}

/// Terrain and chunk settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks per axis. Chunk coordinates run over `[0, world_size)`.
    pub world_size: i32,
    /// Chunks rendered on each side of the eye chunk.
    pub render_distance: i32,
    /// Surface height, in blocks, where the height field is zero.
    pub sea_level: i32,
    /// How far, in blocks, the surface strays from sea level.
    pub height_amplitude: f64,
    /// Cave field value above which rock is carved out.
    pub cave_threshold: f64,
    /// Ore field value above which stone turns into ore.
    pub ore_threshold: f64,
    /// 3D field regions kept in memory per field.
    pub field_cache_regions: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            world_size: MAX_WORLD_SIZE as i32,
            render_distance: 6,
            sea_level: 48,
            height_amplitude: 24.0,
            cave_threshold: 0.35,
            ore_threshold: 0.45,
            field_cache_regions: 64,
        }
    }
}

/// Tick settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Ticks the headless loop runs before exiting.
    pub ticks: u64,
    /// Whether bodies collide with terrain.
    pub resolve_terrain: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_rate: 60,
            ticks: 600,
            resolve_terrain: true,
        }
    }
}

impl SimulationConfig {
    /// Seconds per tick.
    pub fn delta(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

fn invalid(detail: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig(detail.into())
}

impl WorldConfig {
    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(1..=MAX_WORLD_SIZE as i32).contains(&self.world_size) {
            return Err(invalid(format!(
                "world_size must be in 1..={}, got {}",
                MAX_WORLD_SIZE, self.world_size
            )));
        }
        if !(0..=MAX_WORLD_SIZE as i32).contains(&self.render_distance) {
            return Err(invalid(format!(
                "render_distance must be in 0..={}, got {}",
                MAX_WORLD_SIZE, self.render_distance
            )));
        }
        if !self.height_amplitude.is_finite() || self.height_amplitude < 0.0 {
            return Err(invalid(format!(
                "height_amplitude must be finite and not negative, got {}",
                self.height_amplitude
            )));
        }
        if !self.cave_threshold.is_finite() || !self.ore_threshold.is_finite() {
            return Err(invalid("field thresholds must be finite"));
        }
        if self.field_cache_regions == 0 {
            return Err(invalid("field_cache_regions must be at least 1"));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.world.validate()?;
        if self.simulation.tick_rate == 0 {
            return Err(invalid("tick_rate must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.world.world_size, 256);
        assert_eq!(config.simulation.tick_rate, 60);
    }

    #[test]
    fn defaults_survive_a_round_trip() {
        let json = serde_json::to_string(&EngineConfig::default()).unwrap();
        assert_eq!(
            EngineConfig::from_json_str(&json).unwrap(),
            EngineConfig::default()
        );
    }

    #[test_case(r#"{ "world": { "world_size": 0 } }"# ; "empty world")]
    #[test_case(r#"{ "world": { "world_size": 257 } }"# ; "world too large")]
    #[test_case(r#"{ "world": { "render_distance": -1 } }"# ; "negative render distance")]
    #[test_case(r#"{ "world": { "render_distance": 257 } }"# ; "render distance past the world")]
    #[test_case(r#"{ "world": { "render_distance": 2147483647 } }"# ; "huge render distance")]
    #[test_case(r#"{ "world": { "height_amplitude": -3.0 } }"# ; "negative amplitude")]
    #[test_case(r#"{ "world": { "field_cache_regions": 0 } }"# ; "no cache")]
    #[test_case(r#"{ "simulation": { "tick_rate": 0 } }"# ; "zero tick rate")]
    fn out_of_range_values_are_rejected(json: &str) {
        assert!(matches!(
            EngineConfig::from_json_str(json),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_json_str("{ seed: "),
            Err(EngineError::ConfigParse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            EngineConfig::load("/definitely/not/here/chicky.json"),
            Err(EngineError::ConfigIo(_))
        ));
    }

    #[test]
    fn delta_is_the_tick_period() {
        let simulation = SimulationConfig {
            tick_rate: 50,
            ..SimulationConfig::default()
        };
        assert_eq!(simulation.delta(), 0.02);
    }
}
