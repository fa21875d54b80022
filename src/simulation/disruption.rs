//! Disruption subsystem: cyberattacks and accidents
//!
//! Both hazards are first-class simulation states rather than errors. A
//! cyberattack corrupts lights and car behaviour for a fixed number of
//! ticks and opens a wall-clock pause window when it starts; an accident
//! halts all movement until the simulation resets.

use log::info;
use std::collections::BTreeSet;

use super::config::SimConfig;
use super::rng::SimRng;
use super::types::GridPos;

/// Chance per tick that an active cyberattack corrupts a given light
pub const LIGHT_CORRUPTION_CHANCE: f64 = 0.3;
/// Chance per tick that a car picks a new random heading during an attack
pub const ERRATIC_HEADING_CHANCE: f64 = 0.2;
/// Chance per tick that a car stalls in place during an attack
pub const STALL_CHANCE: f64 = 0.1;
/// Chance that a car ignores its light at an intersection during an attack
pub const LIGHT_OVERRIDE_CHANCE: f64 = 0.3;

/// An active accident: the blocking state that freezes the grid
#[derive(Debug, Clone, Copy)]
pub struct Accident {
    pub pos: GridPos,
    pub occurred_at_secs: f64,
}

struct CyberattackState {
    ticks_remaining: u32,
    /// Lights corrupted this tick; re-rolled every tick, not sticky
    affected_lights: BTreeSet<GridPos>,
}

/// Owns the cyberattack and accident lifecycles
///
/// Invariants: the affected-light set is empty whenever no cyberattack is
/// active, and at most one accident exists at any time.
#[derive(Default)]
pub struct DisruptionManager {
    cyberattack: Option<CyberattackState>,
    accident: Option<Accident>,
    pause_until_secs: Option<f64>,
}

impl DisruptionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll the cyberattack trigger for this tick
    ///
    /// An attack can only start while the grid is otherwise healthy: no
    /// accident and no attack already running. Starting one opens the
    /// global pause window.
    pub fn maybe_start_cyberattack(
        &mut self,
        config: &SimConfig,
        rng: &mut SimRng,
        now_secs: f64,
    ) {
        if self.accident.is_some() || self.cyberattack.is_some() {
            return;
        }
        if !rng.chance(config.cyberattack_chance) {
            return;
        }
        self.cyberattack = Some(CyberattackState {
            ticks_remaining: config.cyberattack_duration,
            affected_lights: BTreeSet::new(),
        });
        self.pause_until_secs = Some(now_secs + config.cyberattack_pause_secs);
        info!(
            "Cyberattack initiated; simulation paused for {:.0} s",
            config.cyberattack_pause_secs
        );
    }

    /// Count down an active cyberattack; clears all corruption on expiry
    pub fn tick_cyberattack(&mut self) {
        if let Some(state) = &mut self.cyberattack {
            state.ticks_remaining = state.ticks_remaining.saturating_sub(1);
            if state.ticks_remaining == 0 {
                self.cyberattack = None;
                info!("Cyberattack ended");
            }
        }
    }

    /// Close the global pause window once its wall-clock deadline passes
    pub fn update_pause(&mut self, now_secs: f64) {
        if let Some(until) = self.pause_until_secs {
            if now_secs >= until {
                self.pause_until_secs = None;
                info!("Cyberattack pause ended; simulation continues");
            }
        }
    }

    /// Per-tick corruption roll for one managed light
    ///
    /// While an attack is active each light has an independent chance of
    /// malfunctioning this tick: a corrupted light keeps its timer frozen
    /// and displays a random color. A light that passes the roll recovers
    /// immediately.
    pub fn light_frozen_this_tick(&mut self, pos: GridPos, rng: &mut SimRng) -> bool {
        match &mut self.cyberattack {
            Some(state) => {
                if rng.chance(LIGHT_CORRUPTION_CHANCE) {
                    state.affected_lights.insert(pos);
                    true
                } else {
                    state.affected_lights.remove(&pos);
                    false
                }
            }
            None => false,
        }
    }

    pub fn cyberattack_active(&self) -> bool {
        self.cyberattack.is_some()
    }

    pub fn paused(&self) -> bool {
        self.pause_until_secs.is_some()
    }

    /// Seconds left in the global pause window, zero when not paused
    pub fn pause_secs_remaining(&self, now_secs: f64) -> f64 {
        self.pause_until_secs
            .map(|until| (until - now_secs).max(0.0))
            .unwrap_or(0.0)
    }

    pub fn is_light_affected(&self, pos: GridPos) -> bool {
        self.cyberattack
            .as_ref()
            .is_some_and(|state| state.affected_lights.contains(&pos))
    }

    /// Currently corrupted lights; always a subset of managed intersections
    pub fn affected_lights(&self) -> Vec<GridPos> {
        self.cyberattack
            .as_ref()
            .map(|state| state.affected_lights.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn accident(&self) -> Option<Accident> {
        self.accident
    }

    /// Record an accident at the given position
    ///
    /// At most one accident exists system-wide; later reports while one is
    /// active are dropped.
    pub fn raise_accident(&mut self, pos: GridPos, now_secs: f64) {
        if self.accident.is_none() {
            self.accident = Some(Accident {
                pos,
                occurred_at_secs: now_secs,
            });
            info!("Accident detected at ({}, {})", pos.col, pos.row);
        }
    }

    /// Whether the active accident has aged past the auto-reset delay
    pub fn auto_reset_due(&self, now_secs: f64, reset_delay_secs: f64) -> bool {
        self.accident
            .is_some_and(|accident| now_secs - accident.occurred_at_secs >= reset_delay_secs)
    }

    /// Clear all disruption state back to healthy
    pub fn reset(&mut self) {
        self.cyberattack = None;
        self.accident = None;
        self.pause_until_secs = None;
    }
}
