mod simulation;

#[cfg(feature = "ui")]
mod ui;

use anyhow::Result;
use clap::Parser;

use simulation::{SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "smart_city_sim")]
#[command(about = "Smart city traffic simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "200")]
    ticks: u64,

    /// Seed for a fully deterministic headless run
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long, default_value = "5.0")]
    tick_rate: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            return run_with_ui();
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    }

    run_headless(cli.ticks, cli.seed, cli.tick_rate)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(ticks: u64, seed: Option<u64>, tick_rate: f64) -> Result<()> {
    env_logger::init();

    let tick_period = 1.0 / tick_rate.max(0.1);
    let config = SimConfig::default();
    let mut world = match seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    println!("Running traffic simulation in headless mode...");
    println!("Ticks: {}, Tick rate: {}/s", ticks, tick_rate);
    println!();

    println!("Initial state:");
    world.print_summary();
    world.draw_map();

    let ticks_per_second = tick_rate.ceil().max(1.0) as u64;
    let mut tick = 0;
    while tick < ticks {
        let ticks_to_run = ticks_per_second.min(ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            // A manual clock only moves when told to; a system clock
            // advances on its own and ignores this.
            world.advance_clock(tick_period);
            world.tick();
            if seed.is_none() {
                std::thread::sleep(std::time::Duration::from_secs_f64(tick_period));
            }
        }

        println!("--- After tick {} ---", tick);
        world.print_summary();
        world.draw_map();
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui() -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Smart City Sim UI...");
    println!();
    println!("Controls:");
    println!("  R    - Reset the simulation (while an accident is active)");
    println!("  ESC  - Exit");
    println!();

    let mut world = SimWorld::new(SimConfig::default())?;
    let initial_snapshot = world.snapshot();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,smart_city_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Smart City Traffic Simulation".into(),
                        resolution: (800, 800).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SimResource(world))
        .insert_resource(ui::SnapshotResource(initial_snapshot))
        .add_plugins(ui::SmartCityUIPlugin)
        .run();
    Ok(())
}
