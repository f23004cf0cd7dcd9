/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::PassengerId;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "dispatching")]
    Dispatching,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "doorOpen")]
    DoorOpen,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    /// Direction of travel from `position` towards `target`.
    pub fn towards(position: f64, target: u8) -> Direction {
        let target = f64::from(target);
        if target > position {
            Direction::Up
        } else if target < position {
            Direction::Down
        } else {
            Direction::Stop
        }
    }
}

/**
 * Observable snapshot of the elevator, as consumed by renderers and the
 * JSON snapshot stream.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorState {
    pub behaviour: Behaviour,
    pub floor: u8,
    pub position: f64,
    pub direction: Direction,
    pub target: Option<u8>,
    pub queue: Vec<u8>,
    pub passengers: Vec<PassengerId>,
    #[serde(rename = "doorOpen")]
    pub door_open: bool,
}
