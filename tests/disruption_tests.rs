//! Cyberattack and accident lifecycle tests

use std::collections::HashSet;

use smart_city_sim::simulation::{
    Car, CarId, DisruptionManager, GridPos, Heading, LightBoard, LightColor, MoveOutcome,
    RoadGrid, SimConfig, SimRng, SimWorld,
};

fn attack_world(config: SimConfig, seed: u64) -> SimWorld {
    SimWorld::new_with_seed(config, seed).expect("config is valid")
}

#[test]
fn test_cyberattack_opens_pause_window() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 20);

    let timers_before: Vec<u32> = world
        .lights
        .positions()
        .filter_map(|pos| world.lights.timer_at(pos))
        .collect();
    let positions_before: Vec<GridPos> = world.cars.iter().map(|car| car.pos).collect();

    let snapshot = world.tick();
    assert!(snapshot.cyberattack_active);
    assert!(snapshot.game_paused);
    assert!((snapshot.pause_secs_remaining - world.config.cyberattack_pause_secs).abs() < 1e-9);

    // While paused nothing advances: not lights, not cars
    let timers_after: Vec<u32> = world
        .lights
        .positions()
        .filter_map(|pos| world.lights.timer_at(pos))
        .collect();
    let positions_after: Vec<GridPos> = world.cars.iter().map(|car| car.pos).collect();
    assert_eq!(timers_before, timers_after);
    assert_eq!(positions_before, positions_after);
    assert!(snapshot.affected_lights.is_empty());

    // Still inside the window
    world.advance_clock(1.0);
    let snapshot = world.tick();
    assert!(snapshot.game_paused);
    assert!((snapshot.pause_secs_remaining - 2.0).abs() < 1e-9);

    // Window elapsed: the attack continues but the grid runs again
    world.advance_clock(2.0);
    let snapshot = world.tick();
    assert!(!snapshot.game_paused);
    assert!(snapshot.cyberattack_active);
    assert!((snapshot.pause_secs_remaining - 0.0).abs() < 1e-9);
}

#[test]
fn test_affected_lights_subset_of_managed_and_cleared_on_expiry() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        cyberattack_duration: 3,
        cyberattack_pause_secs: 0.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 21);
    let managed: HashSet<GridPos> = world.lights.positions().collect();

    let mut saw_attack_end = false;
    for _ in 0..12 {
        world.advance_clock(0.2);
        let snapshot = world.tick();

        for pos in &snapshot.affected_lights {
            assert!(managed.contains(pos), "corrupted unmanaged light {:?}", pos);
        }
        if !snapshot.cyberattack_active {
            saw_attack_end = true;
            assert!(snapshot.affected_lights.is_empty());
        }
    }
    assert!(saw_attack_end, "attack never expired during the run");
}

#[test]
fn test_light_timers_stay_in_range_under_attack() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        cyberattack_pause_secs: 0.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 22);

    for _ in 0..50 {
        world.advance_clock(0.2);
        world.tick();
        for pos in world.lights.positions().collect::<Vec<_>>() {
            let timer = world.lights.timer_at(pos).expect("light exists");
            assert!(timer < world.config.cycle_period, "timer out of range");
        }
    }
}

#[test]
fn test_corrupted_lights_freeze_timers_and_scramble_colors() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        cyberattack_pause_secs: 0.0,
        accident_chance: 0.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 28);

    let mut mixed_ticks = 0;
    let mut saw_yellow_corrupted = false;
    for _ in 0..40 {
        let timers_before: Vec<(GridPos, u32)> = world
            .lights
            .positions()
            .filter_map(|pos| world.lights.timer_at(pos).map(|timer| (pos, timer)))
            .collect();

        let snapshot = world.tick();
        assert!(snapshot.cyberattack_active);
        let corrupted: HashSet<GridPos> = snapshot.affected_lights.iter().copied().collect();

        // Corrupted lights keep their timer for the tick; healthy ones
        // advance as usual
        for (pos, before) in &timers_before {
            let after = world.lights.timer_at(*pos).expect("light exists");
            if corrupted.contains(pos) {
                assert_eq!(after, *before, "corrupted light advanced at {:?}", pos);
            } else {
                assert_eq!(after, (*before + 1) % world.config.cycle_period);
            }
        }

        // Only corrupted lights may show a scrambled color
        for light in &snapshot.lights {
            if corrupted.contains(&light.pos) {
                if light.color == LightColor::Yellow {
                    saw_yellow_corrupted = true;
                }
            } else {
                assert_ne!(light.color, LightColor::Yellow, "healthy light at {:?}", light.pos);
            }
        }

        if !corrupted.is_empty() && corrupted.len() < snapshot.lights.len() {
            mixed_ticks += 1;
        }
    }
    assert!(mixed_ticks > 0, "never saw corrupted and healthy lights together");
    assert!(saw_yellow_corrupted, "no corrupted light ever displayed yellow");
}

#[test]
fn test_attack_lets_cars_run_red_lights() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        cyberattack_pause_secs: 0.0,
        accident_chance: 0.0,
        ..SimConfig::default()
    };
    let grid = RoadGrid::new(&config);
    let mut rng = SimRng::with_seed(29);
    let mut lights = LightBoard::new(config.cycle_period, config.green_duration);
    lights.initialize(&grid, &mut rng);
    let mut disruption = DisruptionManager::new();
    disruption.maybe_start_cyberattack(&config, &mut rng, 0.0);
    disruption.update_pause(0.0);
    assert!(disruption.cyberattack_active());
    assert!(!disruption.paused());

    // Timer 0 keeps the north-south axis green, so an eastbound car is
    // normally blocked at (6, 6)
    lights.set_timer(GridPos::new(6, 6), 0);

    let mut crossed = false;
    for _ in 0..200 {
        let mut car = Car::new(CarId(100), GridPos::new(5, 6), Heading::East);
        let roster = [(car.id, car.pos)];
        let outcome = car.step(
            &roster,
            &grid,
            &lights,
            &mut disruption,
            &config,
            &mut rng,
            0.0,
        );
        if outcome == MoveOutcome::Moved && car.pos == GridPos::new(6, 6) {
            crossed = true;
            break;
        }
    }
    assert!(crossed, "no car ever drove through the red axis");
}

#[test]
fn test_attack_causes_stalls_and_heading_changes() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        cyberattack_pause_secs: 0.0,
        accident_chance: 0.0,
        ..SimConfig::default()
    };
    let grid = RoadGrid::new(&config);
    let mut rng = SimRng::with_seed(30);
    let mut lights = LightBoard::new(config.cycle_period, config.green_duration);
    lights.initialize(&grid, &mut rng);
    let mut disruption = DisruptionManager::new();
    disruption.maybe_start_cyberattack(&config, &mut rng, 0.0);
    disruption.update_pause(0.0);

    let mut saw_stall = false;
    let mut saw_heading_change = false;
    for _ in 0..300 {
        let mut car = Car::new(CarId(100), GridPos::new(4, 6), Heading::East);
        let roster = [(car.id, car.pos)];
        let outcome = car.step(
            &roster,
            &grid,
            &lights,
            &mut disruption,
            &config,
            &mut rng,
            0.0,
        );
        if outcome == MoveOutcome::Stalled {
            saw_stall = true;
        }
        if car.heading != Heading::East {
            saw_heading_change = true;
        }
    }
    assert!(saw_stall, "no car stalled during the attack");
    assert!(saw_heading_change, "no car rerolled its heading during the attack");
}

#[test]
fn test_no_new_attack_while_accident_active() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 23);

    let now = world.now_secs();
    world.disruption.raise_accident(GridPos::new(6, 6), now);
    let snapshot = world.tick();

    assert!(snapshot.accident_active());
    assert!(!snapshot.cyberattack_active);
    assert!(!snapshot.game_paused);
}

#[test]
fn test_at_most_one_accident() {
    let config = SimConfig::default();
    let mut world = attack_world(config, 24);

    let now = world.now_secs();
    world.disruption.raise_accident(GridPos::new(6, 6), now);
    world.disruption.raise_accident(GridPos::new(0, 0), now);

    let accident = world.disruption.accident().expect("accident active");
    assert_eq!(accident.pos, GridPos::new(6, 6));
}

#[test]
fn test_background_accident_samples_coincident_cars() {
    let config = SimConfig {
        cyberattack_chance: 0.0,
        accident_chance: 1.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 25);
    // Two cars already stacked on the same cell: any sampled pair coincides
    world.cars = vec![
        Car::new(CarId(100), GridPos::new(1, 0), Heading::East),
        Car::new(CarId(101), GridPos::new(1, 0), Heading::West),
    ];

    let snapshot = world.tick();

    assert_eq!(snapshot.accident, Some(GridPos::new(1, 0)));
}

#[test]
fn test_background_accident_needs_coincidence() {
    let config = SimConfig {
        cyberattack_chance: 0.0,
        accident_chance: 1.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 26);
    world.cars = vec![
        Car::new(CarId(100), GridPos::new(1, 6), Heading::East),
        Car::new(CarId(101), GridPos::new(7, 6), Heading::East),
    ];

    let snapshot = world.tick();

    // The sampled pair never coincides, so the hazard never fires
    assert!(!snapshot.accident_active());
    assert_eq!(world.cars[0].pos, GridPos::new(2, 6));
}

#[test]
fn test_reset_clears_disruption_state() {
    let config = SimConfig {
        cyberattack_chance: 1.0,
        ..SimConfig::default()
    };
    let mut world = attack_world(config, 27);

    world.tick();
    assert!(world.disruption.cyberattack_active());
    assert!(world.disruption.paused());

    world.reset();
    assert!(!world.disruption.cyberattack_active());
    assert!(!world.disruption.paused());
    assert!(world.disruption.accident().is_none());
    assert!(world.disruption.affected_lights().is_empty());
}
