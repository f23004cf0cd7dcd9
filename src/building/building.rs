/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::passenger::{Passenger, PassengerId, PassengerIds};
use crate::building::random::RandomSource;
use crate::config::BuildingConfig;
use crate::shared::SimError;

/// Anything that accepts floor-service requests.
pub trait RequestListener {
    fn add_request(&mut self, floor: u8);
}

/**
 * Owns the passengers waiting at each floor and spawns new ones.
 *
 * Passengers appear at random intervals drawn uniformly from
 * `[spawn_interval_min, spawn_interval_max]` milliseconds, each with a random
 * origin and a different random destination. Every spawn is forwarded to a
 * `RequestListener` (normally the elevator) as a request for the origin floor.
 *
 * # Fields
 * - `waiting`:                 Waiting passengers per floor, in arrival order.
 * - `ids`:                     Id generator for spawned passengers.
 * - `rng`:                     Injected source of randomness.
 * - `time_since_last_spawn`:   Elapsed milliseconds since the last spawn.
 * - `next_spawn_time`:         Threshold for the next spawn, in milliseconds.
 */
pub struct Building {
    n_floors: u8,
    waiting: Vec<Vec<Passenger>>,
    ids: PassengerIds,
    rng: Box<dyn RandomSource>,
    spawn_interval_min: f64,
    spawn_interval_max: f64,
    time_since_last_spawn: f64,
    next_spawn_time: f64,
    spawned: u64,
}

impl Building {
    pub fn new(
        n_floors: u8,
        config: &BuildingConfig,
        rng: Box<dyn RandomSource>,
    ) -> Result<Building, SimError> {
        // A destination must differ from the origin
        if n_floors < 2 {
            return Err(SimError::InvalidFloorCount(n_floors));
        }

        let (min, max) = (config.spawn_interval_min, config.spawn_interval_max);
        if !(min >= 0.0 && max >= min && max.is_finite()) {
            return Err(SimError::InvalidSpawnInterval { min, max });
        }

        let mut building = Building {
            n_floors,
            waiting: vec![Vec::new(); n_floors as usize],
            ids: PassengerIds::new(),
            rng,
            spawn_interval_min: min,
            spawn_interval_max: max,
            time_since_last_spawn: 0.0,
            next_spawn_time: 0.0,
            spawned: 0,
        };
        building.next_spawn_time = building.random_spawn_time();
        Ok(building)
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    /// Advances the spawn timer. Returns the id of the passenger spawned this
    /// tick, if any.
    pub fn update(
        &mut self,
        delta_time: f64,
        listener: &mut dyn RequestListener,
    ) -> Result<Option<PassengerId>, SimError> {
        self.time_since_last_spawn += delta_time;

        if self.time_since_last_spawn < self.next_spawn_time {
            return Ok(None);
        }

        let id = self.spawn_passenger(listener)?;
        self.time_since_last_spawn = 0.0;
        self.next_spawn_time = self.random_spawn_time();
        Ok(Some(id))
    }

    /// Spawns one passenger at a random floor and requests the elevator there.
    pub fn spawn_passenger(
        &mut self,
        listener: &mut dyn RequestListener,
    ) -> Result<PassengerId, SimError> {
        let origin = self.random_floor();
        // Uniform over the other floors, so a single draw always suffices
        let mut destination = self.rng.next_index(self.n_floors as usize - 1) as u8;
        if destination >= origin {
            destination += 1;
        }

        let passenger = Passenger::new(&mut self.ids, origin, destination)?;
        let id = passenger.id;
        info!(
            "Spawned passenger {} at floor {} heading to floor {}",
            id, origin, destination
        );

        self.add_waiting_passenger(passenger);
        self.spawned += 1;
        listener.add_request(origin);
        Ok(id)
    }

    /// Waiting passengers at `floor`, in arrival order. Empty for unknown floors.
    pub fn waiting_passengers(&self, floor: u8) -> &[Passenger] {
        self.waiting
            .get(floor as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn add_waiting_passenger(&mut self, passenger: Passenger) {
        match self.waiting.get_mut(passenger.origin_floor as usize) {
            Some(passengers) => passengers.push(passenger),
            None => warn!(
                "Dropping passenger {}: origin floor {} is outside the building",
                passenger.id, passenger.origin_floor
            ),
        }
    }

    /// Removes a waiting passenger by id. Absent passengers are ignored.
    pub fn remove_passenger(&mut self, id: PassengerId) -> Option<Passenger> {
        for passengers in self.waiting.iter_mut() {
            if let Some(index) = passengers.iter().position(|p| p.id == id) {
                return Some(passengers.remove(index));
            }
        }
        debug!("Passenger {} is not waiting anywhere", id);
        None
    }

    /// Every waiting passenger, floor by floor in arrival order.
    pub fn all_waiting_passengers(&self) -> Vec<&Passenger> {
        self.waiting.iter().flatten().collect()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.iter().map(Vec::len).sum()
    }

    pub fn spawned_count(&self) -> u64 {
        self.spawned
    }

    pub fn next_spawn_time(&self) -> f64 {
        self.next_spawn_time
    }

    fn random_spawn_time(&mut self) -> f64 {
        self.spawn_interval_min
            + self.rng.next_unit() * (self.spawn_interval_max - self.spawn_interval_min)
    }

    fn random_floor(&mut self) -> u8 {
        self.rng.next_index(self.n_floors as usize) as u8
    }
}
