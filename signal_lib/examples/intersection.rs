extern crate signal_lib;

use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use signal_lib::config::SignalConfig;
use signal_lib::queue::PopOrder;
use signal_lib::{Phase, Signal, SignalController};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Vehicles queueing at a single traffic signal.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Number of vehicles
    #[arg(short, long, default_value_t = 4)]
    vehicles: usize,
    /// Shortest phase in milliseconds
    #[arg(long, default_value_t = SignalConfig::DEFAULT_MIN_CYCLE_MS)]
    min_cycle_ms: u64,
    /// Longest phase in milliseconds
    #[arg(long, default_value_t = SignalConfig::DEFAULT_MAX_CYCLE_MS)]
    max_cycle_ms: u64,
    /// Hand out the newest phase event first
    #[arg(long)]
    lifo: bool,
    /// Seed for the cycle lengths
    #[arg(long)]
    seed: Option<u64>,
}

fn print_phase(vehicle: usize, phase: Phase, elapsed: Duration) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let color = match phase {
        Phase::Red => Color::Red,
        Phase::Green => Color::Green,
    };
    stdout
        .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))
        .unwrap();
    write!(&mut stdout, "{:>5}", phase).unwrap();
    stdout.reset().unwrap();
    writeln!(
        &mut stdout,
        " vehicle #{} crosses at {:.1}s",
        vehicle,
        elapsed.as_secs_f64()
    )
    .unwrap();
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let config = SignalConfig {
        min_cycle_ms: args.min_cycle_ms,
        max_cycle_ms: args.max_cycle_ms,
        pop_order: if args.lifo { PopOrder::Lifo } else { PopOrder::Fifo },
        seed: args.seed,
    };
    let signal = match SignalController::with_config(config) {
        Ok(signal) => Arc::new(signal),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    };
    signal.simulate().unwrap();

    let start = Instant::now();
    let mut handles: Vec<thread::JoinHandle<()>> = Vec::new();
    for vehicle in 0..args.vehicles {
        let signal = Arc::clone(&signal);
        handles.push(thread::spawn(move || {
            signal.wait_for_green();
            print_phase(vehicle, Phase::Green, start.elapsed());
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    signal.shutdown();
}
