//! Road grid and traffic light unit tests

use smart_city_sim::simulation::{
    GridPos, Heading, LightBoard, LightPhase, RoadGrid, SimConfig, SimRng,
};

fn default_grid() -> RoadGrid {
    RoadGrid::new(&SimConfig::default())
}

#[test]
fn test_road_membership() {
    let grid = default_grid();

    // Either coordinate on a road line puts the cell on a road
    assert!(grid.is_on_road(GridPos::new(0, 7)));
    assert!(grid.is_on_road(GridPos::new(7, 0)));
    assert!(grid.is_on_road(GridPos::new(3, 1)));
    assert!(!grid.is_on_road(GridPos::new(1, 1)));
    assert!(!grid.is_on_road(GridPos::new(7, 8)));
}

#[test]
fn test_intersections_and_managed_subset() {
    let grid = default_grid();

    assert!(grid.is_intersection(GridPos::new(3, 3)));
    assert!(grid.is_intersection(GridPos::new(6, 6)));
    assert!(!grid.is_intersection(GridPos::new(3, 1)));

    // Only every other crossing carries a light
    assert!(grid.is_managed_intersection(GridPos::new(6, 6)));
    assert!(grid.is_managed_intersection(GridPos::new(0, 12)));
    assert!(!grid.is_managed_intersection(GridPos::new(3, 3)));
    assert!(!grid.is_managed_intersection(GridPos::new(6, 3)));
}

#[test]
fn test_managed_intersections_for_default_grid() {
    let grid = default_grid();
    let managed = grid.managed_intersections();

    let mut expected = Vec::new();
    for col in [0, 6, 12] {
        for row in [0, 6, 12] {
            expected.push(GridPos::new(col, row));
        }
    }
    assert_eq!(managed.len(), 9);
    for pos in expected {
        assert!(managed.contains(&pos), "missing managed light at {:?}", pos);
    }
}

#[test]
fn test_within_bounds_requires_road_membership() {
    let grid = default_grid();

    assert!(grid.within_bounds(GridPos::new(0, 14)));
    assert!(grid.within_bounds(GridPos::new(14, 0)));
    // In the grid but off the road counts as out of bounds
    assert!(!grid.within_bounds(GridPos::new(1, 1)));
    // Past the grid edge
    assert!(!grid.within_bounds(GridPos::new(15, 0)));
    assert!(!grid.within_bounds(GridPos::new(0, -1)));
}

#[test]
fn test_heading_deltas() {
    let pos = GridPos::new(5, 5);
    assert_eq!(pos.step(Heading::North), GridPos::new(5, 4));
    assert_eq!(pos.step(Heading::South), GridPos::new(5, 6));
    assert_eq!(pos.step(Heading::East), GridPos::new(6, 5));
    assert_eq!(pos.step(Heading::West), GridPos::new(4, 5));
}

#[test]
fn test_light_phase_is_pure_function_of_timer() {
    let config = SimConfig::default();
    let grid = RoadGrid::new(&config);
    let mut rng = SimRng::with_seed(7);
    let mut board = LightBoard::new(config.cycle_period, config.green_duration);
    board.initialize(&grid, &mut rng);

    let pos = GridPos::new(6, 6);
    for timer in 0..config.cycle_period {
        board.set_timer(pos, timer);
        let expected = if timer < config.green_duration {
            LightPhase::NsGreen
        } else {
            LightPhase::EwGreen
        };
        assert_eq!(board.phase_at(pos), Some(expected), "timer={}", timer);
    }
}

#[test]
fn test_light_cycle_round_trip() {
    let config = SimConfig::default();
    let grid = RoadGrid::new(&config);
    let mut rng = SimRng::with_seed(11);
    let mut board = LightBoard::new(config.cycle_period, config.green_duration);
    board.initialize(&grid, &mut rng);

    let pos = GridPos::new(12, 0);
    let before = board.timer_at(pos).expect("managed light exists");
    for _ in 0..config.cycle_period {
        board.advance(pos);
    }
    assert_eq!(board.timer_at(pos), Some(before));
}

#[test]
fn test_unmanaged_positions_have_no_light() {
    let config = SimConfig::default();
    let grid = RoadGrid::new(&config);
    let mut rng = SimRng::with_seed(3);
    let mut board = LightBoard::new(config.cycle_period, config.green_duration);
    board.initialize(&grid, &mut rng);

    assert_eq!(board.len(), 9);
    // Non-managed intersection: explicit "no light", never a default phase
    assert_eq!(board.phase_at(GridPos::new(3, 3)), None);
    assert_eq!(board.timer_at(GridPos::new(3, 3)), None);
    // Writes to unmanaged positions are ignored
    board.set_timer(GridPos::new(3, 3), 5);
    assert_eq!(board.timer_at(GridPos::new(3, 3)), None);
    assert_eq!(board.len(), 9);
}

#[test]
fn test_initialize_timers_in_range() {
    let config = SimConfig::default();
    let grid = RoadGrid::new(&config);
    let mut rng = SimRng::with_seed(99);
    let mut board = LightBoard::new(config.cycle_period, config.green_duration);
    board.initialize(&grid, &mut rng);

    for pos in board.positions().collect::<Vec<_>>() {
        let timer = board.timer_at(pos).expect("light exists");
        assert!(timer < config.cycle_period);
    }
}
