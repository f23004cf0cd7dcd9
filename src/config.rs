/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::SimError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub elevator: ElevatorConfig,
    pub building: BuildingConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub n_floors: u8,
    pub tick_ms: f64,
    pub duration_ms: f64,
    pub realtime: bool,
    pub seed: Option<u64>,
    pub snapshot_interval_ms: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    /// Floors per second.
    pub speed: f64,
    /// Milliseconds the doors stay open at a stop.
    pub door_open_time: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BuildingConfig {
    pub spawn_interval_min: f64,
    pub spawn_interval_max: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            n_floors: 5,
            tick_ms: 16.0,
            duration_ms: 60_000.0,
            realtime: false,
            seed: None,
            snapshot_interval_ms: 1000.0,
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            speed: 1.5,
            door_open_time: 1000.0,
        }
    }
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            spawn_interval_min: 2000.0,
            spawn_interval_max: 5000.0,
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, SimError> {
    let config_str = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No configuration file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(SimError::Io(e)),
    };
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, SimError> {
    let config: Config = toml::from_str(config_str)?;
    if config.simulation.tick_ms <= 0.0 {
        return Err(SimError::Config(format!(
            "tick_ms must be positive, got {}",
            config.simulation.tick_ms
        )));
    }
    Ok(config)
}

/***************************************/
/*             Unit tests              */
/***************************************/
