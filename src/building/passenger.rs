/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::SimError;

const COLORS: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#ffe66d", "#95e1d3", "#f38181", "#aa96da", "#fcbad3", "#a8d8ea",
];

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PassengerId(pub u64);

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/**
 * Hands out passenger ids, starting at 1 and strictly increasing.
 *
 * Each building owns its own generator, so two simulations never share
 * an id sequence.
 */
#[derive(Debug, Clone)]
pub struct PassengerIds {
    next: u64,
}

impl PassengerIds {
    pub fn new() -> PassengerIds {
        PassengerIds { next: 1 }
    }

    pub fn next_id(&mut self) -> PassengerId {
        let id = PassengerId(self.next);
        self.next += 1;
        id
    }
}

impl Default for PassengerIds {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Passenger {
    pub id: PassengerId,
    #[serde(rename = "originFloor")]
    pub origin_floor: u8,
    #[serde(rename = "destinationFloor")]
    pub destination_floor: u8,
    pub color: &'static str,
}

impl Passenger {
    pub fn new(
        ids: &mut PassengerIds,
        origin_floor: u8,
        destination_floor: u8,
    ) -> Result<Passenger, SimError> {
        if origin_floor == destination_floor {
            return Err(SimError::InvalidPassenger {
                origin: origin_floor,
                destination: destination_floor,
            });
        }

        let id = ids.next_id();
        Ok(Passenger {
            id,
            origin_floor,
            destination_floor,
            color: COLORS[(id.0 % COLORS.len() as u64) as usize],
        })
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
