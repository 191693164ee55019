//! choreo-runner: headless dry run of the Crossing Squares choreography.
//!
//! Usage:
//!   choreo-runner
//!   choreo-runner --config data/crossing_squares.json --db run.db --tick-rate 120 --max-ticks 3000

use anyhow::Result;
use choreo_core::{
    arena::HeadlessArena,
    choreography::Choreography,
    config::ChoreoConfig,
    crossing_squares::CrossingSquares,
    event::ChoreoEvent,
    runner::{ChoreoRunner, RunnerStatus},
    store::ChoreoStore,
    types::Tick,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = arg_value(&args, "--db").unwrap_or(":memory:");
    let config = match arg_value(&args, "--config") {
        Some(path) => ChoreoConfig::load(path)?,
        None => ChoreoConfig::default(),
    };
    let tick_rate = resolve_tick_rate(&args, &config)?;
    let max_ticks = parse_arg(&args, "--max-ticks", 60 * tick_rate as Tick);

    println!("choreo-runner: crossing squares");
    println!("  db:         {db}");
    println!("  tick rate:  {tick_rate}/s");
    println!("  max ticks:  {max_ticks}");
    println!();

    let store = ChoreoStore::open(db)?;
    store.migrate()?;

    let run_id = format!("run-{}", uuid::Uuid::new_v4());
    let choreography = CrossingSquares::new(config);
    let num_bots = choreography.num_bots();

    let mut runner = ChoreoRunner::new(run_id.clone(), Box::new(choreography), store)?;
    let mut arena = HeadlessArena::new(num_bots, tick_rate);

    let mut jumps = vec![0u32; num_bots];
    let mut was_jumping = vec![false; num_bots];
    let mut used: Tick = 0;

    while used < max_ticks {
        let packet = arena.packet();
        used += 1;
        let status = runner.tick(&packet, &mut arena)?;

        for drone in runner.drones() {
            let jumping = drone.controls.jump;
            if jumping && !was_jumping[drone.index] {
                jumps[drone.index] += 1;
            }
            was_jumping[drone.index] = jumping;
        }

        if status == RunnerStatus::Finished {
            break;
        }
        arena.advance();
    }

    print_summary(&runner, &arena, &jumps)?;

    if runner.status() != RunnerStatus::Finished {
        log::warn!("stopped after {max_ticks} ticks before the sequence finished");
    }
    Ok(())
}

fn print_summary(runner: &ChoreoRunner, arena: &HeadlessArena, jumps: &[u32]) -> Result<()> {
    println!("=== RUN SUMMARY ===");
    println!("  run_id:      {}", runner.run_id);
    println!("  status:      {:?}", runner.status());
    println!("  final tick:  {}", runner.current_tick());
    println!("  elapsed:     {:.2}s", arena.clock.seconds_elapsed());
    println!("  overrides:   {}", arena.overrides().len());

    println!();
    println!("=== STEP TIMELINE ===");
    let finished = runner.store().events_of_type(&runner.run_id, "step_finished")?;
    for entry in &finished {
        if let ChoreoEvent::StepFinished { tick, step_index, step, elapsed } = entry.event()? {
            println!("  #{step_index} {step:<14} done at tick {tick:>5} after {elapsed:.3}s");
        }
    }

    println!();
    println!("=== JUMP PULSES ===");
    let even: Vec<u32> = jumps.iter().step_by(2).copied().collect();
    let odd: Vec<u32> = jumps.iter().skip(1).step_by(2).copied().collect();
    println!("  even drones: {:?}", pulse_range(&even));
    println!("  odd drones:  {:?}", pulse_range(&odd));
    Ok(())
}

/// `--tick-rate` overrides the config. Zero would stop the clock.
fn resolve_tick_rate(args: &[String], config: &ChoreoConfig) -> Result<u32> {
    let rate = parse_arg(args, "--tick-rate", config.ticks_per_second);
    if rate == 0 {
        anyhow::bail!("--tick-rate must be > 0");
    }
    Ok(rate)
}

fn pulse_range(counts: &[u32]) -> Option<(u32, u32)> {
    let min = counts.iter().min()?;
    let max = counts.iter().max()?;
    Some((*min, *max))
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
