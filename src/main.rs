use std::path::PathBuf;
use std::process::ExitCode;

use circlewave::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run a circle wave and log its spawns and removals.
#[derive(Parser, Debug)]
#[command(name = "circlewave", version, about)]
struct Args {
    /// JSON wave config; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How long to run, in seconds.
    #[arg(short, long, default_value_t = 10.0)]
    seconds: f64,

    /// Simulated time step, in seconds.
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Follow wall-clock time instead of simulating.
    #[arg(long)]
    realtime: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[derive(Default)]
struct Totals {
    spawned: usize,
    removed: usize,
}

fn apply(wave: &mut CircleWave, events: Vec<WaveEvent>, totals: &mut Totals) -> Result<(), WaveError> {
    for event in events {
        match event {
            WaveEvent::Spawned { id, at } => {
                totals.spawned += 1;
                // Already expired if its lifetime was shorter than the step.
                if wave.get(id).is_some() {
                    wave.mount(id)?;
                }
                if let Some(p) = wave.get(id) {
                    tracing::info!(
                        "{:>7.3}s  + {} at ({:.0}, {:.0}) r={:.1} life={:.2}s",
                        at,
                        id,
                        p.position().x,
                        p.position().y,
                        p.target_radius(),
                        p.lifetime()
                    );
                }
            }
            WaveEvent::Removed { id, at } => {
                totals.removed += 1;
                tracing::info!("{:>7.3}s  - {} ({} live)", at, id, wave.len());
            }
        }
    }
    Ok(())
}

fn run_simulated(wave: &mut CircleWave, args: &Args, totals: &mut Totals) -> Result<(), WaveError> {
    let mut clock = ManualClock::new();
    wave.start(clock.now())?;
    let step = args.step.max(1e-3);
    while clock.now() < args.seconds {
        let now = clock.advance(step).min(args.seconds);
        let events = wave.advance(now);
        apply(wave, events, totals)?;
    }
    Ok(())
}

fn run_realtime(wave: &mut CircleWave, args: &Args, totals: &mut Totals) -> Result<(), WaveError> {
    let clock = SystemClock::new();
    wave.start(clock.now())?;
    while let Some(wakeup) = wave.next_wakeup() {
        if wakeup > args.seconds {
            break;
        }
        clock.sleep_until(wakeup);
        let events = wave.advance(clock.now());
        apply(wave, events, totals)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => WaveConfig::load(path)?,
        None => WaveConfig::default(),
    };

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    tracing::info!(
        "Expecting ~{:.1} live waves at steady state",
        config.steady_state_count()
    );

    let mut wave = match args.seed {
        Some(seed) => CircleWave::with_seed(config, seed)?,
        None => CircleWave::new(config)?,
    };

    let mut totals = Totals::default();
    if args.realtime {
        run_realtime(&mut wave, &args, &mut totals)?;
    } else {
        run_simulated(&mut wave, &args, &mut totals)?;
    }
    wave.dispose();

    tracing::info!(
        "Done: {} spawned, {} removed, {} live at teardown",
        totals.spawned,
        totals.removed,
        wave.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
