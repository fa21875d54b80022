//! Car movement logic for the traffic simulation
//!
//! Movement is purely local and rule-based: one cell per tick in the
//! current heading, gated by bounds, other cars, traffic lights, and the
//! disruption state. There is no route planning.

use super::config::SimConfig;
use super::disruption::{
    DisruptionManager, ERRATIC_HEADING_CHANCE, LIGHT_OVERRIDE_CHANCE, STALL_CHANCE,
};
use super::grid::RoadGrid;
use super::lights::LightBoard;
use super::rng::SimRng;
use super::types::{CarId, GridPos, Heading};

/// Result of a car step indicating what action should be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Car advanced one cell
    Moved,
    /// Red light ahead; car stayed in place
    Blocked,
    /// Cyberattack made the car stall this tick
    Stalled,
    /// Accident active or simulation paused; nothing evaluated
    Halted,
    /// Car left the grid or the road; caller must despawn and respawn
    OffGrid,
    /// Car raised an accident at the given cell and did not move
    Accident(GridPos),
}

/// A car on the grid
#[derive(Debug, Clone, Copy)]
pub struct Car {
    pub id: CarId,
    pub pos: GridPos,
    pub heading: Heading,
}

impl Car {
    pub fn new(id: CarId, pos: GridPos, heading: Heading) -> Self {
        Self { id, pos, heading }
    }

    /// Evaluate one tick of movement for this car
    ///
    /// `roster` is the full car set (including this car) as of this
    /// evaluation; cars earlier in the tick's order have already moved.
    /// The accident flag is read fresh here on every call so an accident
    /// raised mid-tick halts the remaining cars.
    pub fn step(
        &mut self,
        roster: &[(CarId, GridPos)],
        grid: &RoadGrid,
        lights: &LightBoard,
        disruption: &mut DisruptionManager,
        config: &SimConfig,
        rng: &mut SimRng,
        now_secs: f64,
    ) -> MoveOutcome {
        if disruption.accident().is_some() || disruption.paused() {
            return MoveOutcome::Halted;
        }

        // Background hazard: sample two random cars and check whether they
        // already coincide. Deliberately independent of this car's movement.
        if !disruption.cyberattack_active() && rng.chance(config.accident_chance) {
            if let Some(pos) = sample_coincident_pair(roster, rng) {
                disruption.raise_accident(pos, now_secs);
                return MoveOutcome::Accident(pos);
            }
        }

        // During a cyberattack cars behave erratically
        if disruption.cyberattack_active() {
            if rng.chance(ERRATIC_HEADING_CHANCE) {
                if let Some(heading) = rng.pick(&Heading::ALL) {
                    self.heading = *heading;
                }
            }
            if rng.chance(STALL_CHANCE) {
                return MoveOutcome::Stalled;
            }
        }

        let next = self.pos.step(self.heading);

        if !grid.within_bounds(next) {
            return MoveOutcome::OffGrid;
        }

        // Collision: another car already occupies the destination cell
        if roster
            .iter()
            .any(|(id, pos)| *id != self.id && *pos == next)
        {
            disruption.raise_accident(next, now_secs);
            return MoveOutcome::Accident(next);
        }

        if let Some(phase) = lights.phase_at(next) {
            // Cyberattack override: the light is ignored probabilistically,
            // otherwise the normal axis rule applies
            let allowed = (disruption.cyberattack_active() && rng.chance(LIGHT_OVERRIDE_CHANCE))
                || self.heading.axis() == phase.axis();
            if !allowed {
                return MoveOutcome::Blocked;
            }
        }

        self.pos = next;
        MoveOutcome::Moved
    }
}

/// Pick two distinct cars uniformly and return their position if it
/// coincides
fn sample_coincident_pair(roster: &[(CarId, GridPos)], rng: &mut SimRng) -> Option<GridPos> {
    if roster.len() < 2 {
        return None;
    }
    let first = rng.index(roster.len());
    let mut second = rng.index(roster.len() - 1);
    if second >= first {
        second += 1;
    }
    (roster[first].1 == roster[second].1).then_some(roster[first].1)
}
