//! Core types for the traffic simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for cars
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub usize);

/// A cell coordinate on the simulation grid
///
/// Signed so that the one-step out-of-bounds probe during movement is
/// representable; every stored position is inside the grid and on a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The neighbouring cell one step in the given heading
    pub fn step(&self, heading: Heading) -> GridPos {
        let (dc, dr) = heading.delta();
        GridPos::new(self.col + dc, self.row + dr)
    }
}

/// The axis a car travels on, and the axis a light phase grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

/// Compass heading of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::East, Heading::West];

    /// Unit vector as (col delta, row delta); row grows southward
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::South => (0, 1),
            Heading::East => (1, 0),
            Heading::West => (-1, 0),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Heading::North | Heading::South => Axis::NorthSouth,
            Heading::East | Heading::West => Axis::EastWest,
        }
    }
}

/// Right-of-way state of a managed traffic light
///
/// Strictly binary: there is no yellow phase in the control logic, yellow
/// only appears as a corrupted display color during a cyberattack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightPhase {
    NsGreen,
    EwGreen,
}

impl LightPhase {
    /// The axis currently granted right of way
    pub fn axis(&self) -> Axis {
        match self {
            LightPhase::NsGreen => Axis::NorthSouth,
            LightPhase::EwGreen => Axis::EastWest,
        }
    }
}

/// Display color of a traffic light marker
///
/// `Green`/`Red` reflect the derived NS-axis state; `Yellow` is only shown
/// by lights corrupted during a cyberattack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    Red,
    Green,
    Yellow,
}
