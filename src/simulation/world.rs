//! Main simulation world that ties everything together
//!
//! This is the entry point for running the traffic simulation without any
//! Bevy dependencies. `SimWorld` owns all mutable state (cars, lights,
//! disruption flags) so multiple independent instances can coexist, and
//! `tick` runs one discrete simulation step in a fixed order.

use anyhow::Result;
use log::{debug, info};
use std::collections::BTreeMap;

use super::car::{Car, MoveOutcome};
use super::clock::SimClock;
use super::config::SimConfig;
use super::disruption::DisruptionManager;
use super::grid::RoadGrid;
use super::lights::LightBoard;
use super::rng::SimRng;
use super::types::{CarId, GridPos, Heading, LightColor, LightPhase};

/// Per-car entry in a snapshot
#[derive(Debug, Clone, Copy)]
pub struct CarView {
    pub id: CarId,
    pub pos: GridPos,
    pub heading: Heading,
}

/// Per-light entry in a snapshot; the color is the display color, which
/// diverges from the derived phase while the light is corrupted
#[derive(Debug, Clone, Copy)]
pub struct LightView {
    pub pos: GridPos,
    pub color: LightColor,
}

/// Immutable per-tick view of the simulation for rendering collaborators
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tick: u64,
    pub cars: Vec<CarView>,
    pub lights: Vec<LightView>,
    pub cyberattack_active: bool,
    pub game_paused: bool,
    pub pause_secs_remaining: f64,
    pub accident: Option<GridPos>,
    pub affected_lights: Vec<GridPos>,
}

impl Snapshot {
    pub fn accident_active(&self) -> bool {
        self.accident.is_some()
    }
}

/// The main simulation world
pub struct SimWorld {
    /// Configuration fixed at startup
    pub config: SimConfig,

    /// Static road layout predicates
    pub grid: RoadGrid,

    /// Managed traffic lights and their timers
    pub lights: LightBoard,

    /// All cars currently on the grid
    pub cars: Vec<Car>,

    /// Cyberattack and accident state
    pub disruption: DisruptionManager,

    /// Display colors drawn for the lights corrupted this tick
    corrupted_colors: BTreeMap<GridPos, LightColor>,

    /// Single random source for every probabilistic rule
    rng: SimRng,

    /// Time source for pause windows and accident auto-reset
    clock: SimClock,

    /// Next car ID to assign
    next_car_id: usize,

    /// Completed ticks since creation
    tick_count: u64,

    /// Latched manual reset request, applied at the start of the next tick
    reset_requested: bool,
}

impl SimWorld {
    fn new_internal(config: SimConfig, rng: SimRng, clock: SimClock) -> Result<Self> {
        config.validate()?;
        let grid = RoadGrid::new(&config);
        let lights = LightBoard::new(config.cycle_period, config.green_duration);
        let mut world = Self {
            config,
            grid,
            lights,
            cars: Vec::new(),
            disruption: DisruptionManager::new(),
            corrupted_colors: BTreeMap::new(),
            rng,
            clock,
            next_car_id: 0,
            tick_count: 0,
            reset_requested: false,
        };
        world.reset();
        Ok(world)
    }

    /// Create a world driven by wall-clock time and ambient randomness
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::new_internal(config, SimRng::unseeded(), SimClock::system())
    }

    /// Create a fully deterministic world: seeded RNG and a manual clock
    /// advanced via [`SimWorld::advance_clock`]
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, SimRng::with_seed(seed), SimClock::manual())
    }

    /// Seconds on the simulation clock
    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }

    /// Advance a manual clock; no effect on wall-clock worlds
    pub fn advance_clock(&mut self, secs: f64) {
        self.clock.advance_secs(secs);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Request a manual reset from an input collaborator
    ///
    /// Applied atomically at the start of the next tick, and only while an
    /// accident is active; otherwise the request is silently dropped.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Run one simulation step and publish the resulting snapshot
    pub fn tick(&mut self) -> Snapshot {
        let now = self.clock.now_secs();

        // Manual reset behaves as if inserted atomically before the tick
        if std::mem::take(&mut self.reset_requested) && self.disruption.accident().is_some() {
            info!("Manual reset requested");
            self.reset();
        }

        // Cyberattack trigger and expiry
        self.disruption
            .maybe_start_cyberattack(&self.config, &mut self.rng, now);
        self.disruption.tick_cyberattack();

        // Automatic reset once an accident has aged past the delay
        if self
            .disruption
            .auto_reset_due(now, self.config.reset_delay_secs)
        {
            self.reset();
        }

        self.disruption.update_pause(now);

        // Advance lights, skipping any light corrupted this tick. A
        // corrupted light keeps its timer and draws the random color it
        // displays for the rest of the tick.
        if !self.disruption.paused() {
            self.corrupted_colors.clear();
            let positions: Vec<GridPos> = self.lights.positions().collect();
            for pos in positions {
                if self.disruption.light_frozen_this_tick(pos, &mut self.rng) {
                    let color = self
                        .rng
                        .pick(&[LightColor::Red, LightColor::Green, LightColor::Yellow])
                        .copied()
                        .unwrap_or(LightColor::Red);
                    self.corrupted_colors.insert(pos, color);
                } else {
                    self.lights.advance(pos);
                }
            }
        }

        if self.disruption.accident().is_none() && !self.disruption.paused() {
            self.move_cars(now);
        }

        self.tick_count += 1;
        self.snapshot()
    }

    /// Move every car once, in a stable order snapshotted before the loop
    ///
    /// Despawn and respawn mutate `self.cars` mid-loop, so iteration goes
    /// by car ID rather than index. Each car's step re-reads the shared
    /// accident flag, so an accident raised mid-tick halts the rest.
    fn move_cars(&mut self, now_secs: f64) {
        let order: Vec<CarId> = self.cars.iter().map(|car| car.id).collect();

        for id in order {
            let Some(index) = self.cars.iter().position(|car| car.id == id) else {
                continue;
            };
            let roster: Vec<(CarId, GridPos)> =
                self.cars.iter().map(|car| (car.id, car.pos)).collect();

            let mut car = self.cars.swap_remove(index);
            let outcome = car.step(
                &roster,
                &self.grid,
                &self.lights,
                &mut self.disruption,
                &self.config,
                &mut self.rng,
                now_secs,
            );

            match outcome {
                MoveOutcome::OffGrid => {
                    debug!("Car {:?} left the grid; respawning", car.id);
                    let replacement = self.spawn_car();
                    self.cars.push(replacement);
                }
                _ => self.cars.push(car),
            }
        }
    }

    /// Spawn a car at a random non-intersection road cell with a random
    /// heading
    fn spawn_car(&mut self) -> Car {
        let id = CarId(self.next_car_id);
        self.next_car_id += 1;
        loop {
            let pos = GridPos::new(
                self.rng.below_i32(self.grid.size()),
                self.rng.below_i32(self.grid.size()),
            );
            if self.grid.is_on_road(pos) && !self.grid.is_intersection(pos) {
                let heading = self
                    .rng
                    .pick(&Heading::ALL)
                    .copied()
                    .unwrap_or(Heading::North);
                return Car::new(id, pos, heading);
            }
        }
    }

    /// Reinitialize all mutable state to a fresh, playable configuration
    ///
    /// Idempotent: repeated calls always yield a healthy world with the
    /// configured car count and freshly staggered lights.
    pub fn reset(&mut self) {
        self.disruption.reset();
        self.corrupted_colors.clear();
        self.lights.initialize(&self.grid, &mut self.rng);
        self.cars.clear();
        for _ in 0..self.config.car_count {
            let car = self.spawn_car();
            self.cars.push(car);
        }
        self.reset_requested = false;
        info!("Simulation reset");
    }

    /// Build the read-only state snapshot for rendering collaborators
    pub fn snapshot(&self) -> Snapshot {
        let now = self.clock.now_secs();

        let mut cars: Vec<CarView> = self
            .cars
            .iter()
            .map(|car| CarView {
                id: car.id,
                pos: car.pos,
                heading: car.heading,
            })
            .collect();
        cars.sort_by_key(|view| view.id);

        let positions: Vec<GridPos> = self.lights.positions().collect();
        let mut lights = Vec::with_capacity(positions.len());
        for pos in positions {
            let color = if let Some(color) = self.corrupted_colors.get(&pos) {
                *color
            } else if self.lights.phase_at(pos) == Some(LightPhase::NsGreen) {
                LightColor::Green
            } else {
                LightColor::Red
            };
            lights.push(LightView { pos, color });
        }

        Snapshot {
            tick: self.tick_count,
            cars,
            lights,
            cyberattack_active: self.disruption.cyberattack_active(),
            game_paused: self.disruption.paused(),
            pause_secs_remaining: self.disruption.pause_secs_remaining(now),
            accident: self.disruption.accident().map(|accident| accident.pos),
            affected_lights: self.disruption.affected_lights(),
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Smart City Simulation Summary ===");
        println!(
            "Tick: {}, Clock: {:.1}s, Lights: {}, Cars: {}",
            self.tick_count,
            self.clock.now_secs(),
            self.lights.len(),
            self.cars.len()
        );
        if self.disruption.cyberattack_active() {
            println!(
                "CYBER ATTACK active, affected lights: {:?}",
                self.disruption.affected_lights()
            );
        }
        if let Some(accident) = self.disruption.accident() {
            println!(
                "ACCIDENT at ({}, {})",
                accident.pos.col, accident.pos.row
            );
        }
        for car in &self.cars {
            println!(
                "  Car {:?}: position=({}, {}), heading={:?}",
                car.id.0, car.pos.col, car.pos.row, car.heading
            );
        }
    }

    /// Draw a visual map of the grid in the terminal
    pub fn draw_map(&self) {
        println!("Legend: C=Car, X=Accident, N/E=Light (green axis), ?=Corrupted light, +=Intersection, .=Road");
        let accident_pos = self.disruption.accident().map(|accident| accident.pos);
        for row in 0..self.grid.size() {
            let mut line = String::new();
            for col in 0..self.grid.size() {
                let pos = GridPos::new(col, row);
                let cell = if accident_pos == Some(pos) {
                    'X'
                } else if self.cars.iter().any(|car| car.pos == pos) {
                    'C'
                } else if self.disruption.is_light_affected(pos) {
                    '?'
                } else if let Some(phase) = self.lights.phase_at(pos) {
                    match phase {
                        LightPhase::NsGreen => 'N',
                        LightPhase::EwGreen => 'E',
                    }
                } else if self.grid.is_intersection(pos) {
                    '+'
                } else if self.grid.is_on_road(pos) {
                    '.'
                } else {
                    ' '
                };
                line.push(cell);
            }
            println!("{}", line);
        }
        println!();
    }
}
