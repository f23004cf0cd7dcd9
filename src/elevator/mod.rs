pub mod fsm;
pub mod fsm_tests;

pub use fsm::Elevator;
