//! Single elevator serving a building of randomly spawning passengers.
//!
//! The `Building` spawns passengers and requests the `Elevator`, which serves
//! requests first-come-first-served. `Simulation` steps both through time and
//! exposes read-only snapshots for renderers.

/* Modules */
pub mod shared;
pub mod building;
pub mod config;
pub mod elevator;
pub mod simulation;

pub use building::{Building, Passenger, PassengerId};
pub use elevator::Elevator;
pub use shared::SimError;
pub use simulation::Simulation;
