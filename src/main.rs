/* 3rd party libraries */
use clap::{Arg, Command};
use std::io;
use std::path::Path;

/* Custom libraries */
use elevator_sim::config;
use elevator_sim::exit_on_error;
use elevator_sim::Simulation;

fn cli() -> Command<'static> {
    Command::new("elevator-sim")
        .about("Simulates a single elevator serving randomly spawning passengers")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for passenger spawning"),
        )
        .arg(
            Arg::new("duration")
                .long("duration")
                .takes_value(true)
                .help("Simulated time to run, in milliseconds"),
        )
        .arg(
            Arg::new("realtime")
                .long("realtime")
                .help("Pace ticks against the wall clock"),
        )
        .arg(
            Arg::new("snapshots")
                .long("snapshots")
                .help("Write a JSON snapshot line to stdout every snapshot interval"),
        )
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();

    // Load the configuration, command line values take precedence
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = exit_on_error!(config::load_config(Path::new(config_path)), "loading configuration");
    if matches.is_present("seed") {
        config.simulation.seed = Some(exit_on_error!(matches.value_of_t::<u64>("seed"), "parsing --seed"));
    }
    if matches.is_present("duration") {
        config.simulation.duration_ms = exit_on_error!(matches.value_of_t::<f64>("duration"), "parsing --duration");
    }
    if matches.is_present("realtime") {
        config.simulation.realtime = true;
    }

    // Create the building and elevator
    let rng = Simulation::random_source(&config);
    let mut simulation = exit_on_error!(Simulation::from_config(&config, rng), "building the simulation");

    let summary = if matches.is_present("snapshots") {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        exit_on_error!(simulation.run(&config, Some(&mut out)), "running the simulation")
    } else {
        exit_on_error!(simulation.run(&config, None), "running the simulation")
    };

    println!("{}", exit_on_error!(serde_json::to_string_pretty(&summary), "serializing the summary"));
}
