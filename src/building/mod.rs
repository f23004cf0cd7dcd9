pub mod building;
pub mod passenger;
pub mod random;

pub use building::Building;
pub use building::RequestListener;
pub use passenger::Passenger;
pub use passenger::PassengerId;
pub use passenger::PassengerIds;
pub use random::RandomSource;
pub use random::ScriptedSource;
pub use random::SeededSource;
