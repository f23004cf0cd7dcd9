pub mod simulation;

pub use simulation::Simulation;
pub use simulation::SimulationSnapshot;
pub use simulation::Summary;
