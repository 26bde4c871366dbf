//! All tunable parameters for a generation run. `Params::validate` is
//! always called by `Generator::generate` before any stage runs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationAlgorithm {
    Grid,
    Voronoi,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkParams {
    pub base_slope_cost: f64,
    pub altitude_cost: f64,
    pub water_cost: f64,
    pub river_crossing_penalty: f64,

    pub trail_cost_multiplier: f64,
    pub road_cost_multiplier: f64,
    pub turnpike_cost_multiplier: f64,

    pub trail_threshold: f64,
    pub road_threshold: f64,
    pub turnpike_threshold: f64,
    pub bridge_threshold: f64,

    pub max_bridge_width: f64,
    pub min_river_flow: f64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            base_slope_cost: 2.0,
            altitude_cost: 0.5,
            water_cost: 1.0,
            river_crossing_penalty: 5.0,
            trail_cost_multiplier: 1.0,
            road_cost_multiplier: 0.5,
            turnpike_cost_multiplier: 0.2,
            trail_threshold: 5.0,
            road_threshold: 25.0,
            turnpike_threshold: 100.0,
            bridge_threshold: 50.0,
            max_bridge_width: 4.0,
            min_river_flow: 8.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Params {
    pub seed: u64,
    pub map_size: f64,
    pub generation_algorithm: GenerationAlgorithm,

    pub voronoi_cell_count: usize,
    pub voronoi_relaxation: u32,

    pub land_fraction: f64,
    pub peak_elevation: f64,
    pub mountain_peak_count: usize,
    pub hilliness: f64,
    pub elevation_blend_power: f64,

    pub hill_noise_scale: f64,
    pub hill_noise_amplitude: f64,
    pub island_noise_scale: f64,
    pub island_noise_octaves: u32,

    pub ridge_enabled: bool,
    pub ridge_width: u32,

    pub river_threshold: u32,
    pub moisture_diffusion: u32,

    pub fill_spill_enabled: bool,
    pub min_lake_depth: f64,
    pub min_lake_area: usize,

    pub network: NetworkParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            seed: 42,
            map_size: 500.0,
            generation_algorithm: GenerationAlgorithm::Voronoi,

            voronoi_cell_count: 2000,
            voronoi_relaxation: 2,

            land_fraction: 0.55,
            peak_elevation: 1800.0,
            mountain_peak_count: 5,
            hilliness: 0.5,
            elevation_blend_power: 2.0,

            hill_noise_scale: 0.05,
            hill_noise_amplitude: 0.3,
            island_noise_scale: 0.03,
            island_noise_octaves: 4,

            ridge_enabled: true,
            ridge_width: 2,

            river_threshold: 12,
            moisture_diffusion: 5,

            fill_spill_enabled: true,
            min_lake_depth: 1.0,
            min_lake_area: 3,

            network: NetworkParams::default(),
        }
    }
}

impl Params {
    /// Validates every bounded field; configuration errors surface
    /// synchronously, before any generation stage runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation_algorithm != GenerationAlgorithm::Voronoi {
            return Err(ConfigError::UnsupportedAlgorithm(self.generation_algorithm));
        }
        Self::in_range("land_fraction", self.land_fraction, 0.3, 0.8)?;
        Self::at_least("voronoi_cell_count", self.voronoi_cell_count as f64, 3.0)?;
        Self::at_least("voronoi_relaxation", self.voronoi_relaxation as f64, 0.0)?;
        Self::at_least("mountain_peak_count", self.mountain_peak_count as f64, 1.0)?;
        Self::at_least("moisture_diffusion", self.moisture_diffusion as f64, 0.0)?;
        Self::at_least("min_lake_area", self.min_lake_area as f64, 1.0)?;
        Self::at_least("min_lake_depth", self.min_lake_depth, 0.0)?;
        Self::at_least("map_size", self.map_size, 1.0)?;
        Self::in_range("hilliness", self.hilliness, 0.0, 2.0)?;
        Self::at_least("elevation_blend_power", self.elevation_blend_power, 0.1)?;
        Ok(())
    }

    fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
        if value < min || value > max {
            return Err(ConfigError::OutOfRange { field, value, min, max });
        }
        Ok(())
    }

    fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), ConfigError> {
        if value < min {
            return Err(ConfigError::OutOfRange { field, value, min, max: f64::INFINITY });
        }
        Ok(())
    }
}
