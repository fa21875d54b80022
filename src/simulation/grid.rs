//! Road grid predicates
//!
//! The road layout is fully derived from the grid geometry: a cell is on a
//! road when either coordinate is a multiple of the road interval, and an
//! intersection when both are. Nothing here holds mutable state.

use super::config::SimConfig;
use super::types::GridPos;

/// Static road layout of the simulation grid
#[derive(Debug, Clone, Copy)]
pub struct RoadGrid {
    size: i32,
    road_interval: i32,
}

impl RoadGrid {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            size: config.grid_size,
            road_interval: config.road_interval,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether the cell lies on a road (either coordinate on a road line)
    pub fn is_on_road(&self, pos: GridPos) -> bool {
        pos.col % self.road_interval == 0 || pos.row % self.road_interval == 0
    }

    /// Whether the cell is a crossing of two roads
    pub fn is_intersection(&self, pos: GridPos) -> bool {
        pos.col % self.road_interval == 0 && pos.row % self.road_interval == 0
    }

    /// Whether the intersection carries a traffic light
    ///
    /// Managed intersections are spaced two road intervals apart on each
    /// axis, so only every other crossing gets a light.
    pub fn is_managed_intersection(&self, pos: GridPos) -> bool {
        let spacing = self.road_interval * 2;
        pos.col % spacing == 0 && pos.row % spacing == 0
    }

    /// Whether the cell is inside the grid and on a road
    ///
    /// Cars treat a `false` result as leaving the map, whether they stepped
    /// past the grid edge or sideways off a road.
    pub fn within_bounds(&self, pos: GridPos) -> bool {
        (0..self.size).contains(&pos.col)
            && (0..self.size).contains(&pos.row)
            && self.is_on_road(pos)
    }

    /// All managed intersections of the grid, in row-major order
    pub fn managed_intersections(&self) -> Vec<GridPos> {
        let spacing = self.road_interval * 2;
        let mut positions = Vec::new();
        let mut col = 0;
        while col < self.size {
            let mut row = 0;
            while row < self.size {
                positions.push(GridPos::new(col, row));
                row += spacing;
            }
            col += spacing;
        }
        positions
    }
}
