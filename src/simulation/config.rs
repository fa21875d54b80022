//! Simulation configuration
//!
//! All tunables are fixed at startup; nothing here is runtime-mutable.

use anyhow::{ensure, Result};

/// Configuration constants for one simulation instance
///
/// Defaults mirror the classic setup: a 15x15 grid with roads every 3
/// cells, a 30-tick light cycle split evenly between axes, and a rare
/// cyberattack hazard.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of cells per grid side
    pub grid_size: i32,
    /// Roads occur every this many cells
    pub road_interval: i32,
    /// Total ticks for a full traffic light cycle
    pub cycle_period: u32,
    /// Ticks of green in the north-south direction per cycle
    pub green_duration: u32,
    /// Probability of a cyberattack starting each tick
    pub cyberattack_chance: f64,
    /// Duration of a cyberattack in ticks
    pub cyberattack_duration: u32,
    /// Seconds the simulation pauses when a cyberattack starts
    pub cyberattack_pause_secs: f64,
    /// Probability of a background (non-collision) accident check per car move
    pub accident_chance: f64,
    /// Seconds before automatic reset after an accident
    pub reset_delay_secs: f64,
    /// Number of cars kept on the grid
    pub car_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            road_interval: 3,
            cycle_period: 30,
            green_duration: 15,
            cyberattack_chance: 0.01,
            cyberattack_duration: 100,
            cyberattack_pause_secs: 3.0,
            accident_chance: 0.0,
            reset_delay_secs: 5.0,
            car_count: 4,
        }
    }
}

impl SimConfig {
    /// Check that the configuration describes a playable grid
    ///
    /// A `road_interval` below 2 would make every road cell an intersection
    /// and leave no valid car spawn cell, so it is rejected here rather than
    /// looping forever in the spawner.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size > 0, "grid_size must be positive");
        ensure!(
            self.road_interval >= 2 && self.road_interval < self.grid_size,
            "road_interval must be in 2..grid_size"
        );
        ensure!(self.cycle_period > 0, "cycle_period must be positive");
        ensure!(
            self.green_duration > 0 && self.green_duration < self.cycle_period,
            "green_duration must be in 1..cycle_period"
        );
        for (name, chance) in [
            ("cyberattack_chance", self.cyberattack_chance),
            ("accident_chance", self.accident_chance),
        ] {
            ensure!(
                (0.0..=1.0).contains(&chance),
                "{} must be a probability in [0, 1]",
                name
            );
        }
        ensure!(
            self.cyberattack_pause_secs >= 0.0 && self.reset_delay_secs >= 0.0,
            "pause and reset delays must be non-negative"
        );
        ensure!(self.car_count > 0, "car_count must be positive");
        Ok(())
    }
}
