//! Traffic light timers and derived right-of-way state
//!
//! Each managed intersection owns a free-running timer in
//! `[0, cycle_period)`. The light phase is a pure function of the timer;
//! reads never touch randomness.

use std::collections::BTreeMap;

use super::grid::RoadGrid;
use super::rng::SimRng;
use super::types::{GridPos, LightPhase};

/// The set of managed traffic lights and their cycle timers
///
/// Timers live in a `BTreeMap` so iteration order is deterministic, which
/// keeps seeded runs reproducible when per-light randomness is drawn in
/// board order.
pub struct LightBoard {
    timers: BTreeMap<GridPos, u32>,
    cycle_period: u32,
    green_duration: u32,
}

impl LightBoard {
    pub fn new(cycle_period: u32, green_duration: u32) -> Self {
        Self {
            timers: BTreeMap::new(),
            cycle_period,
            green_duration,
        }
    }

    /// Create a light at every managed intersection with a random timer
    ///
    /// Random starting timers stagger the phases so the whole grid doesn't
    /// switch at once. Replaces any existing lights.
    pub fn initialize(&mut self, grid: &RoadGrid, rng: &mut SimRng) {
        self.timers.clear();
        for pos in grid.managed_intersections() {
            let timer = rng.below_u32(self.cycle_period);
            self.timers.insert(pos, timer);
        }
    }

    /// Advance one light's timer by a tick, wrapping at the cycle period
    pub fn advance(&mut self, pos: GridPos) {
        if let Some(timer) = self.timers.get_mut(&pos) {
            *timer = (*timer + 1) % self.cycle_period;
        }
    }

    /// Derived right-of-way state, or `None` for unmanaged positions
    pub fn phase_at(&self, pos: GridPos) -> Option<LightPhase> {
        self.timers.get(&pos).map(|timer| {
            if timer % self.cycle_period < self.green_duration {
                LightPhase::NsGreen
            } else {
                LightPhase::EwGreen
            }
        })
    }

    /// Current timer value of a managed light
    pub fn timer_at(&self, pos: GridPos) -> Option<u32> {
        self.timers.get(&pos).copied()
    }

    /// Overwrite a managed light's timer; ignored for unmanaged positions
    pub fn set_timer(&mut self, pos: GridPos, timer: u32) {
        if let Some(slot) = self.timers.get_mut(&pos) {
            *slot = timer % self.cycle_period;
        }
    }

    /// Positions of all managed lights in deterministic order
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.timers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
