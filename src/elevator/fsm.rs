/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, warn};
use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::{Building, Passenger, RequestListener};
use crate::config::ElevatorConfig;
use crate::shared::{Behaviour, Direction, ElevatorState, SimError};

/**
 * Where the elevator is in its dispatch cycle.
 *
 * A target floor only exists while moving and the door timer only exists
 * while the doors are open, so the two can never be set together.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dispatching,
    Moving { target: u8 },
    DoorOpen { remaining: f64 },
}

/**
 * Single elevator serving requests strictly first-come-first-served.
 *
 * The elevator is advanced by `update` once per tick. Each tick it either holds
 * its doors open, pulls the next floor from the request queue, or moves towards
 * its target at `speed` floors per second. On arrival the doors open, passengers
 * bound for the floor leave and everyone waiting there boards, queueing their
 * destinations.
 *
 * # Fields
 * - `n_floors`:        The total number of floors serviced by the elevator.
 * - `position`:        Continuous vertical position, in floors.
 * - `state`:           Current dispatch state.
 * - `queue`:           Pending floor requests, oldest first.
 * - `passengers`:      Passengers currently onboard.
 * - `speed`:           Floors per second.
 * - `door_open_time`:  Milliseconds the doors stay open at a stop.
 */
#[derive(Debug, Clone)]
pub struct Elevator {
    n_floors: u8,
    position: f64,
    state: State,
    queue: VecDeque<u8>,
    passengers: Vec<Passenger>,
    speed: f64,
    door_open_time: f64,
}

impl Elevator {
    pub fn new(n_floors: u8, config: &ElevatorConfig) -> Result<Elevator, SimError> {
        if !(config.speed > 0.0 && config.speed.is_finite()) {
            return Err(SimError::InvalidElevatorConfig(format!(
                "speed must be positive, got {}",
                config.speed
            )));
        }
        if !(config.door_open_time >= 0.0 && config.door_open_time.is_finite()) {
            return Err(SimError::InvalidElevatorConfig(format!(
                "door_open_time must be non-negative, got {}",
                config.door_open_time
            )));
        }

        Ok(Elevator {
            n_floors,
            position: 0.0,
            state: State::Idle,
            queue: VecDeque::new(),
            passengers: Vec::new(),
            speed: config.speed,
            door_open_time: config.door_open_time,
        })
    }

    /// Queues `floor` unless it is already queued or is the floor the elevator is at.
    pub fn add_request(&mut self, floor: u8) {
        if floor >= self.n_floors {
            warn!("Ignoring request for floor {} outside the building", floor);
            return;
        }
        if self.queue.contains(&floor) || floor == self.current_floor() {
            return;
        }

        self.queue.push_back(floor);
        if self.state == State::Idle {
            self.state = State::Dispatching;
        }
    }

    /// Runs one tick of `delta_time` milliseconds. Returns the passengers that
    /// reached their destination during the tick.
    pub fn update(&mut self, delta_time: f64, building: &mut Building) -> Vec<Passenger> {
        match self.state {
            State::DoorOpen { remaining } => {
                let remaining = remaining - delta_time;
                if remaining <= 0.0 {
                    debug!("Doors closing at floor {}", self.current_floor());
                    self.process_next_request();
                } else {
                    self.state = State::DoorOpen { remaining };
                }
                Vec::new()
            }
            State::Idle | State::Dispatching => {
                self.process_next_request();
                Vec::new()
            }
            State::Moving { target } => {
                let step = self.speed * delta_time / 1000.0;
                let distance = f64::from(target) - self.position;

                if distance.abs() <= step {
                    self.position = f64::from(target);
                    self.arrive_at_floor(target, building)
                } else {
                    self.position += step * distance.signum();
                    Vec::new()
                }
            }
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Position rounded to the nearest floor.
    pub fn current_floor(&self) -> u8 {
        self.position.round() as u8
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, State::Moving { .. })
    }

    pub fn is_door_open(&self) -> bool {
        matches!(self.state, State::DoorOpen { .. })
    }

    pub fn target(&self) -> Option<u8> {
        match self.state {
            State::Moving { target } => Some(target),
            _ => None,
        }
    }

    /// Milliseconds left before the doors close, if they are open.
    pub fn door_time_remaining(&self) -> Option<f64> {
        match self.state {
            State::DoorOpen { remaining } => Some(remaining),
            _ => None,
        }
    }

    pub fn queue(&self) -> impl Iterator<Item = u8> + '_ {
        self.queue.iter().copied()
    }

    pub fn behaviour(&self) -> Behaviour {
        match self.state {
            State::Idle => Behaviour::Idle,
            State::Dispatching => Behaviour::Dispatching,
            State::Moving { .. } => Behaviour::Moving,
            State::DoorOpen { .. } => Behaviour::DoorOpen,
        }
    }

    pub fn direction(&self) -> Direction {
        match self.state {
            State::Moving { target } => Direction::towards(self.position, target),
            _ => Direction::Stop,
        }
    }

    pub fn state(&self) -> ElevatorState {
        ElevatorState {
            behaviour: self.behaviour(),
            floor: self.current_floor(),
            position: self.position,
            direction: self.direction(),
            target: self.target(),
            queue: self.queue().collect(),
            passengers: self.passengers.iter().map(|p| p.id).collect(),
            door_open: self.is_door_open(),
        }
    }

    fn process_next_request(&mut self) {
        self.state = match self.queue.pop_front() {
            Some(target) => {
                debug!("Dispatching to floor {} from {:.2}", target, self.position);
                State::Moving { target }
            }
            None => State::Idle,
        };
    }

    fn arrive_at_floor(&mut self, floor: u8, building: &mut Building) -> Vec<Passenger> {
        self.state = State::DoorOpen {
            remaining: self.door_open_time,
        };

        // Exit strictly before boarding
        let exited = self.exit_passengers(floor);
        self.board_passengers(floor, building);

        debug!(
            "Arrived at floor {}: {} exited, {} onboard, queue {:?}",
            floor,
            exited.len(),
            self.passengers.len(),
            self.queue
        );
        exited
    }

    fn exit_passengers(&mut self, floor: u8) -> Vec<Passenger> {
        let (exited, staying): (Vec<Passenger>, Vec<Passenger>) = self
            .passengers
            .drain(..)
            .partition(|p| p.destination_floor == floor);
        self.passengers = staying;
        exited
    }

    fn board_passengers(&mut self, floor: u8, building: &mut Building) {
        let waiting: Vec<_> = building
            .waiting_passengers(floor)
            .iter()
            .map(|p| p.id)
            .collect();

        for id in waiting {
            if let Some(passenger) = building.remove_passenger(id) {
                let destination = passenger.destination_floor;
                self.passengers.push(passenger);
                self.add_request(destination);
            }
        }
    }
}

impl RequestListener for Elevator {
    fn add_request(&mut self, floor: u8) {
        Elevator::add_request(self, floor);
    }
}
