/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::{Building, PassengerId, RandomSource, SeededSource};
use crate::config::Config;
use crate::elevator::Elevator;
use crate::shared::{ElevatorState, SimError};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationSnapshot {
    #[serde(rename = "timeMs")]
    pub time_ms: f64,
    pub elevator: ElevatorState,
    pub waiting: Vec<Vec<PassengerId>>,
    pub spawned: u64,
    pub delivered: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    #[serde(rename = "timeMs")]
    pub time_ms: f64,
    pub spawned: u64,
    pub delivered: u64,
    pub waiting: usize,
    pub onboard: usize,
}

/**
 * Steps one building and its elevator through simulated time.
 *
 * Each tick updates the building first, which may spawn a passenger and
 * request the elevator, then the elevator, which may board and drop off
 * passengers.
 */
pub struct Simulation {
    building: Building,
    elevator: Elevator,
    time_ms: f64,
    delivered: u64,
}

impl Simulation {
    pub fn new(building: Building, elevator: Elevator) -> Simulation {
        Simulation {
            building,
            elevator,
            time_ms: 0.0,
            delivered: 0,
        }
    }

    /// Builds a simulation from configuration, seeding spawns from `rng`.
    pub fn from_config(config: &Config, rng: Box<dyn RandomSource>) -> Result<Simulation, SimError> {
        let n_floors = config.simulation.n_floors;
        let building = Building::new(n_floors, &config.building, rng)?;
        let elevator = Elevator::new(n_floors, &config.elevator)?;
        Ok(Simulation::new(building, elevator))
    }

    /// Random source for a run: seeded when configured, entropy otherwise.
    pub fn random_source(config: &Config) -> Box<dyn RandomSource> {
        match config.simulation.seed {
            Some(seed) => Box::new(SeededSource::from_seed(seed)),
            None => Box::new(SeededSource::from_entropy()),
        }
    }

    pub fn tick(&mut self, delta_time: f64) -> Result<(), SimError> {
        self.building.update(delta_time, &mut self.elevator)?;
        let delivered = self.elevator.update(delta_time, &mut self.building);
        for passenger in &delivered {
            debug!(
                "Passenger {} delivered to floor {}",
                passenger.id, passenger.destination_floor
            );
        }
        self.delivered += delivered.len() as u64;
        self.time_ms += delta_time;
        Ok(())
    }

    /**
     * Runs fixed-size ticks until `duration_ms` of simulated time has passed.
     *
     * In realtime mode every tick waits for the wall clock. When `snapshots`
     * is given, a JSON line is written to it every `snapshot_interval_ms`.
     */
    pub fn run(
        &mut self,
        config: &Config,
        mut snapshots: Option<&mut dyn Write>,
    ) -> Result<Summary, SimError> {
        let tick_ms = config.simulation.tick_ms;
        let duration_ms = config.simulation.duration_ms;
        let snapshot_interval = config.simulation.snapshot_interval_ms;
        let mut since_snapshot = 0.0;

        if !(tick_ms > 0.0 && tick_ms.is_finite()) {
            return Err(SimError::Config(format!("tick_ms must be positive, got {}", tick_ms)));
        }

        info!(
            "Starting simulation: {} floors, {} ms ticks for {} ms{}",
            self.building.n_floors(),
            tick_ms,
            duration_ms,
            if config.simulation.realtime { " (realtime)" } else { "" }
        );

        let ticker = config
            .simulation
            .realtime
            .then(|| cbc::tick(Duration::from_secs_f64(tick_ms / 1000.0)));

        while self.time_ms < duration_ms {
            if let Some(ticker) = &ticker {
                ticker.recv().ok();
            }

            let delta = tick_ms.min(duration_ms - self.time_ms);
            self.tick(delta)?;

            since_snapshot += delta;
            if let Some(out) = snapshots.as_mut() {
                if since_snapshot >= snapshot_interval {
                    since_snapshot -= snapshot_interval;
                    serde_json::to_writer(&mut **out, &self.snapshot())?;
                    writeln!(out)?;
                }
            }
        }

        let summary = self.summary();
        info!(
            "Simulation finished after {} ms: {} spawned, {} delivered, {} waiting, {} onboard",
            summary.time_ms, summary.spawned, summary.delivered, summary.waiting, summary.onboard
        );
        Ok(summary)
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn elevator(&self) -> &Elevator {
        &self.elevator
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            time_ms: self.time_ms,
            elevator: self.elevator.state(),
            waiting: (0..self.building.n_floors())
                .map(|floor| {
                    self.building
                        .waiting_passengers(floor)
                        .iter()
                        .map(|p| p.id)
                        .collect()
                })
                .collect(),
            spawned: self.building.spawned_count(),
            delivered: self.delivered,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            time_ms: self.time_ms,
            spawned: self.building.spawned_count(),
            delivered: self.delivered,
            waiting: self.building.waiting_count(),
            onboard: self.elevator.passengers().len(),
        }
    }
}
