//! Game balance simulator CLI.
//!
//! Runs scripted mining, banking and fighting playthroughs against the real
//! game loop.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 runs, one real hour each
//!   cargo run --bin simulate -- -n 10 -f 0     # 10 runs, no fighting
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use idlescape::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              IDLESCAPE BALANCE SIMULATOR                      ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Ticks per run:  {}", config.max_ticks_per_run);
    println!("  Frame:          {} ms", config.frame_ms);
    println!("  Mine:           {}", config.mine_location);
    println!("  Bank:           {}", config.bank_location);
    println!("  Hunting ground: {}", config.hunt_location);
    println!("  Fights/trip:    {}", config.fights_per_trip);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(err) => eprintln!("Failed to write JSON report: {}", err),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(36_000);
                    i += 1;
                }
            }
            "-f" | "--fights" => {
                if i + 1 < args.len() {
                    config.fights_per_trip = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--mine" => {
                if i + 1 < args.len() {
                    config.mine_location = args[i + 1].clone();
                    i += 1;
                }
            }
            "--hunt" => {
                if i + 1 < args.len() {
                    config.hunt_location = args[i + 1].clone();
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                config = SimConfig::quick(config.seed.unwrap_or(42));
                config.verbosity = 1;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Idlescape Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 100)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Frames per run (default: 36,000)");
    println!("    -f, --fights <F>    Fights per bank trip (default: 3)");
    println!("    --mine <ID>         Location to mine at");
    println!("    --hunt <ID>         Location to fight at");
    println!("    -v, --verbose       Print every run");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (3 short seeded runs)");
    println!("    -h, --help          Show this help");
}
