/*
 * Unit tests for elevator module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_fsm_init
 * - test_fsm_rejects_invalid_config
 * - test_fsm_add_request_deduplicates
 * - test_fsm_add_request_current_floor_dropped
 * - test_fsm_add_request_outside_building
 * - test_fsm_add_request_rounds_moving_position
 * - test_fsm_travels_to_requested_floor
 * - test_fsm_door_hold_counts_down
 * - test_fsm_returns_to_idle
 * - test_fsm_boards_waiting_passenger
 * - test_fsm_exit_before_board
 * - test_fsm_first_come_first_served
 * - test_fsm_direction_down
 * - test_fsm_repeated_target_reopens_doors
 * - test_fsm_reads_are_idempotent
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::building::{Building, Passenger, PassengerIds, ScriptedSource};
    use crate::config::{BuildingConfig, ElevatorConfig};
    use crate::elevator::Elevator;
    use crate::shared::Behaviour::{Dispatching, DoorOpen, Idle, Moving};
    use crate::shared::Direction::{Down, Stop, Up};
    use crate::shared::SimError;

    const TICK: f64 = 100.0;

    fn setup() -> (Elevator, Building) {
        // Default configuration
        let elevator_config = ElevatorConfig {
            speed: 1.5,
            door_open_time: 1000.0,
        };
        // Spawning never triggers within a test
        let building_config = BuildingConfig {
            spawn_interval_min: 1e12,
            spawn_interval_max: 1e12,
        };

        let elevator = Elevator::new(5, &elevator_config).unwrap();
        let building =
            Building::new(5, &building_config, Box::new(ScriptedSource::default())).unwrap();
        (elevator, building)
    }

    /// Ticks until the doors open, returning the passengers that left at that stop.
    fn run_until_arrival(elevator: &mut Elevator, building: &mut Building) -> Vec<Passenger> {
        for _ in 0..500 {
            let was_open = elevator.is_door_open();
            let exited = elevator.update(TICK, building);
            if !was_open && elevator.is_door_open() {
                return exited;
            }
        }
        panic!("Elevator never arrived");
    }

    fn run_until_doors_close(elevator: &mut Elevator, building: &mut Building) {
        for _ in 0..500 {
            if !elevator.is_door_open() {
                return;
            }
            elevator.update(TICK, building);
        }
        panic!("Doors never closed");
    }

    #[test]
    fn test_fsm_init() {
        // Purpose: Verify that the FSM is in the expected initial state after creation

        // Arrange
        let (elevator, _building) = setup();

        // Assert
        assert_eq!(elevator.behaviour(), Idle);
        assert_eq!(elevator.direction(), Stop);
        assert_eq!(elevator.position(), 0.0);
        assert_eq!(elevator.target(), None);
        assert!(!elevator.is_moving());
        assert!(!elevator.is_door_open());
        assert!(elevator.passengers().is_empty());
        assert_eq!(elevator.queue().count(), 0);
    }

    #[test]
    fn test_fsm_rejects_invalid_config() {
        let no_speed = ElevatorConfig {
            speed: 0.0,
            door_open_time: 1000.0,
        };
        let negative_door = ElevatorConfig {
            speed: 1.5,
            door_open_time: -1.0,
        };

        assert!(matches!(
            Elevator::new(5, &no_speed),
            Err(SimError::InvalidElevatorConfig(_))
        ));
        assert!(matches!(
            Elevator::new(5, &negative_door),
            Err(SimError::InvalidElevatorConfig(_))
        ));
    }

    #[test]
    fn test_fsm_add_request_deduplicates() {
        // Purpose: A floor already in the queue is never queued twice, and order is kept

        // Arrange
        let (mut elevator, _building) = setup();

        // Act
        elevator.add_request(3);
        elevator.add_request(2);
        elevator.add_request(3);
        elevator.add_request(2);

        // Assert
        assert_eq!(elevator.queue().collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(elevator.behaviour(), Dispatching);
    }

    #[test]
    fn test_fsm_add_request_current_floor_dropped() {
        // Purpose: Requests for the floor the elevator is at are dropped, not deferred

        // Arrange
        let (mut elevator, mut building) = setup();

        // Act
        elevator.add_request(0);
        elevator.update(TICK, &mut building);

        // Assert
        assert_eq!(elevator.queue().count(), 0);
        assert_eq!(elevator.behaviour(), Idle);
        assert_eq!(elevator.position(), 0.0);
    }

    #[test]
    fn test_fsm_add_request_outside_building() {
        let (mut elevator, _building) = setup();

        elevator.add_request(5);
        elevator.add_request(200);

        assert_eq!(elevator.queue().count(), 0);
        assert_eq!(elevator.behaviour(), Idle);
    }

    #[test]
    fn test_fsm_add_request_rounds_moving_position() {
        // Purpose: While moving, the floor nearest the cabin counts as the current floor

        // Arrange
        let (mut elevator, mut building) = setup();
        elevator.add_request(4);
        elevator.update(TICK, &mut building);
        for _ in 0..8 {
            elevator.update(TICK, &mut building);
        }
        assert!((elevator.position() - 1.2).abs() < 1e-9);
        assert_eq!(elevator.current_floor(), 1);

        // Act
        elevator.add_request(1);
        elevator.add_request(3);

        // Assert
        assert_eq!(elevator.queue().collect::<Vec<_>>(), vec![3]);

        // Arrange
        for _ in 0..3 {
            elevator.update(TICK, &mut building);
        }
        assert!((elevator.position() - 1.65).abs() < 1e-9);
        assert_eq!(elevator.current_floor(), 2);

        // Act
        elevator.add_request(2);
        elevator.add_request(1);

        // Assert
        assert_eq!(elevator.queue().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(elevator.target(), Some(4));
    }

    #[test]
    fn test_fsm_travels_to_requested_floor() {
        // Purpose: The elevator converges exactly on the requested floor and opens its doors

        // Arrange
        let (mut elevator, mut building) = setup();
        elevator.add_request(3);

        // Act
        elevator.update(TICK, &mut building);
        assert_eq!(elevator.behaviour(), Moving);
        assert_eq!(elevator.target(), Some(3));
        assert_eq!(elevator.direction(), Up);
        assert!(elevator.is_moving());

        let mut last = elevator.position();
        let mut ticks = 0;
        while !elevator.is_door_open() {
            elevator.update(TICK, &mut building);
            assert!(elevator.position() >= last);
            assert!(elevator.position() <= 3.0);
            last = elevator.position();
            ticks += 1;
            assert!(ticks <= 25, "3 floors at 1.5 floors/s should take about 2 s");
        }

        // Assert
        assert_eq!(elevator.position(), 3.0);
        assert_eq!(elevator.current_floor(), 3);
        assert_eq!(elevator.behaviour(), DoorOpen);
        assert_eq!(elevator.target(), None);
        assert_eq!(elevator.door_time_remaining(), Some(1000.0));
        assert!(!elevator.is_moving());
    }

    #[test]
    fn test_fsm_door_hold_counts_down() {
        // Arrange
        let (mut elevator, mut building) = setup();
        elevator.add_request(1);
        run_until_arrival(&mut elevator, &mut building);

        // Act
        elevator.update(400.0, &mut building);

        // Assert
        assert!(elevator.is_door_open());
        assert_eq!(elevator.door_time_remaining(), Some(600.0));
        assert_eq!(elevator.position(), 1.0);
    }

    #[test]
    fn test_fsm_returns_to_idle() {
        // Purpose: With nothing queued the elevator idles once the doors close and stays put

        // Arrange
        let (mut elevator, mut building) = setup();
        elevator.add_request(2);
        run_until_arrival(&mut elevator, &mut building);

        // Act
        elevator.update(1000.0, &mut building);

        // Assert
        assert_eq!(elevator.behaviour(), Idle);
        assert_eq!(elevator.target(), None);
        assert_eq!(elevator.queue().count(), 0);
        assert!(!elevator.is_door_open());

        for _ in 0..20 {
            elevator.update(TICK, &mut building);
            assert_eq!(elevator.position(), 2.0);
            assert_eq!(elevator.behaviour(), Idle);
        }
    }

    #[test]
    fn test_fsm_boards_waiting_passenger() {
        // Purpose: Waiting passengers move onboard and their destination is queued

        // Arrange
        let (mut elevator, mut building) = setup();
        let mut ids = PassengerIds::new();
        let passenger = Passenger::new(&mut ids, 1, 4).unwrap();
        let id = passenger.id;
        building.add_waiting_passenger(passenger);
        elevator.add_request(1);

        // Act
        let exited = run_until_arrival(&mut elevator, &mut building);

        // Assert
        assert!(exited.is_empty());
        assert!(building.waiting_passengers(1).is_empty());
        assert_eq!(elevator.passengers().len(), 1);
        assert_eq!(elevator.passengers()[0].id, id);
        assert_eq!(elevator.queue().collect::<Vec<_>>(), vec![4]);
        assert_eq!(elevator.current_floor(), 1);
    }

    #[test]
    fn test_fsm_exit_before_board() {
        // Purpose: At a stop, arriving passengers leave before new passengers board

        // Arrange
        let (mut elevator, mut building) = setup();
        let mut ids = PassengerIds::new();
        let rider = Passenger::new(&mut ids, 1, 2).unwrap();
        let boarder = Passenger::new(&mut ids, 2, 0).unwrap();
        let (rider_id, boarder_id) = (rider.id, boarder.id);
        building.add_waiting_passenger(rider);
        building.add_waiting_passenger(boarder);
        elevator.add_request(1);

        // Act
        run_until_arrival(&mut elevator, &mut building);
        assert_eq!(elevator.queue().collect::<Vec<_>>(), vec![2]);
        run_until_doors_close(&mut elevator, &mut building);
        let exited = run_until_arrival(&mut elevator, &mut building);

        // Assert
        assert_eq!(exited.len(), 1);
        assert_eq!(exited[0].id, rider_id);
        assert_eq!(elevator.passengers().len(), 1);
        assert_eq!(elevator.passengers()[0].id, boarder_id);
        assert!(building.all_waiting_passengers().is_empty());
        assert_eq!(elevator.queue().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_fsm_first_come_first_served() {
        // Purpose: Requests are served in arrival order, passing closer floors without stopping

        // Arrange
        let (mut elevator, mut building) = setup();
        elevator.add_request(4);
        elevator.add_request(1);

        // Act
        run_until_arrival(&mut elevator, &mut building);
        let first_stop = elevator.current_floor();
        run_until_doors_close(&mut elevator, &mut building);
        let second_direction = elevator.direction();
        run_until_arrival(&mut elevator, &mut building);
        let second_stop = elevator.current_floor();

        // Assert
        assert_eq!(first_stop, 4);
        assert_eq!(second_direction, Down);
        assert_eq!(second_stop, 1);
    }

    #[test]
    fn test_fsm_direction_down() {
        let (mut elevator, mut building) = setup();
        elevator.add_request(3);
        run_until_arrival(&mut elevator, &mut building);
        run_until_doors_close(&mut elevator, &mut building);

        elevator.add_request(0);
        elevator.update(TICK, &mut building);
        elevator.update(TICK, &mut building);

        assert_eq!(elevator.target(), Some(0));
        assert_eq!(elevator.direction(), Down);
        assert!(elevator.position() < 3.0);
    }

    #[test]
    fn test_fsm_repeated_target_reopens_doors() {
        // Purpose: A request for the current target made mid-flight is served again after the stop

        // Arrange
        let (mut elevator, mut building) = setup();
        elevator.add_request(3);
        elevator.update(TICK, &mut building);
        for _ in 0..7 {
            elevator.update(TICK, &mut building);
        }
        assert_eq!(elevator.current_floor(), 1);

        // Act
        elevator.add_request(3);
        run_until_arrival(&mut elevator, &mut building);
        assert_eq!(elevator.queue().collect::<Vec<_>>(), vec![3]);
        elevator.update(1000.0, &mut building);
        elevator.update(TICK, &mut building);

        // Assert
        assert!(elevator.is_door_open());
        assert_eq!(elevator.position(), 3.0);
        assert_eq!(elevator.queue().count(), 0);
    }

    #[test]
    fn test_fsm_reads_are_idempotent() {
        let (mut elevator, mut building) = setup();
        elevator.add_request(4);
        for _ in 0..5 {
            elevator.update(TICK, &mut building);
        }

        let first = elevator.state();
        let second = elevator.state();

        assert_eq!(first, second);
        assert_eq!(elevator.position(), elevator.position());
        assert_eq!(elevator.is_moving(), elevator.is_moving());
        assert_eq!(elevator.passengers(), elevator.passengers());
    }
}
