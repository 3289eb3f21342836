//! Shop balance simulator CLI.
//!
//! Runs seeded multi-day simulations of the expedition/shop loop to analyze
//! pricing strategies and traffic balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: 30 days
//!   cargo run --bin simulate -- -d 90 -c 12      # 90 days, 12 customers/day
//!   cargo run --bin simulate -- --seed 42        # Reproducible run
//!   cargo run --bin simulate -- --strategy skimming

use gildhall::market::PricingStrategy;
use gildhall::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, show_days) = parse_args(&args);

    println!("=== GILDHALL BALANCE SIMULATOR ===");
    println!();
    println!("Configuration:");
    println!("  Days:           {}", config.days);
    println!("  Customers/day:  {}", config.customers_per_day);
    println!("  Display slots:  {}", config.display_slots);
    println!("  Strategy:       {:?}", config.strategy);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config).await;

    println!("{}", report.to_text());

    if show_days {
        println!("{}", report.day_detail_text());
    }

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json()).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut show_days = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--days" => {
                if i + 1 < args.len() {
                    config.days = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "-c" | "--customers" => {
                if i + 1 < args.len() {
                    config.customers_per_day = args[i + 1].parse().unwrap_or(8);
                    i += 1;
                }
            }
            "-s" | "--slots" => {
                if i + 1 < args.len() {
                    config.display_slots = args[i + 1].parse().unwrap_or(8);
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--strategy" => {
                if i + 1 < args.len() {
                    config.strategy = parse_strategy(&args[i + 1]);
                    i += 1;
                }
            }
            "--detail" => show_days = true,
            "-v" => config.verbosity = 2,
            "-q" => config.verbosity = 0,
            "--json" => {}
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!(
                    "Options: -d/--days N, -c/--customers N, -s/--slots N, --seed N, \
                     --strategy NAME, --detail, --json, -v, -q"
                );
                std::process::exit(2);
            }
        }
        i += 1;
    }

    (config, show_days)
}

fn parse_strategy(name: &str) -> PricingStrategy {
    match name.to_ascii_lowercase().as_str() {
        "premium" => PricingStrategy::Premium,
        "competitive" => PricingStrategy::Competitive,
        "discount" => PricingStrategy::Discount,
        "dynamic" => PricingStrategy::Dynamic,
        "seasonal" => PricingStrategy::Seasonal,
        "penetration" => PricingStrategy::Penetration,
        "skimming" => PricingStrategy::Skimming,
        other => {
            eprintln!("Unknown strategy '{}', using competitive", other);
            PricingStrategy::Competitive
        }
    }
}
