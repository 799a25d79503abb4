use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossing_fsm::{
    Controller, Dwell, LightDriver, SensorCode, SensorInput, StateId, TrafficLights, WalkLight,
};
use embassy_futures::block_on;
use embassy_time::Duration;
use proptest::prelude::*;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Event {
    Write(TrafficLights, WalkLight),
    Wait(u64),
    Read(u8),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct Lamps(Log);

impl LightDriver for Lamps {
    fn write(&mut self, traffic: TrafficLights, walk: WalkLight) {
        self.0.borrow_mut().push(Event::Write(traffic, walk));
    }
}

/*
 * Hands out the scripted codes in order, then repeats the last one.
 */
struct Script {
    log: Log,
    codes: VecDeque<SensorCode>,
    last: SensorCode,
}

impl SensorInput for Script {
    fn read(&mut self) -> SensorCode {
        if let Some(code) = self.codes.pop_front() {
            self.last = code;
        }
        self.log.borrow_mut().push(Event::Read(self.last.bits()));
        self.last
    }
}

struct Clock(Log);

impl Dwell for Clock {
    async fn wait(&mut self, duration: Duration) {
        self.0.borrow_mut().push(Event::Wait(duration.as_millis()));
    }
}

fn crossing(codes: &[u8]) -> (Controller<Lamps, Script, Clock>, Log) {
    let log = Log::default();
    let script = Script {
        log: log.clone(),
        codes: codes.iter().copied().map(SensorCode::from_bits).collect(),
        last: SensorCode::from_bits(0),
    };
    let controller = Controller::new(Lamps(log.clone()), script, Clock(log.clone()));
    (controller, log)
}

fn walk_to(controller: &mut Controller<Lamps, Script, Clock>, steps: usize) -> Vec<StateId> {
    (0..steps).map(|_| block_on(controller.step())).collect()
}

/*
 * Reach the walk state: road A green, pedestrian waiting, through the amber.
 */
fn at_walk(then: &[u8]) -> (Controller<Lamps, Script, Clock>, Log) {
    let mut codes = vec![4, 4];
    codes.extend_from_slice(then);
    let (mut controller, log) = crossing(&codes);
    assert_eq!(walk_to(&mut controller, 2), [StateId::WaitA, StateId::Walk]);
    log.borrow_mut().clear();
    (controller, log)
}

#[test]
fn quiet_crossing_stays_on_road_a() {
    let (mut controller, _) = crossing(&[]);
    assert!(walk_to(&mut controller, 20).iter().all(|s| *s == StateId::GoA));
}

#[test]
fn each_step_writes_then_waits_then_reads() {
    let (mut controller, log) = crossing(&[2, 0]);
    walk_to(&mut controller, 2);

    let green_a = StateId::GoA.traffic();
    let amber_a = StateId::WaitA.traffic();
    assert_eq!(
        *log.borrow(),
        [
            Event::Write(green_a, WalkLight::DontWalk),
            Event::Wait(2000),
            Event::Read(2),
            Event::Write(amber_a, WalkLight::DontWalk),
            Event::Wait(1000),
            Event::Read(0),
        ]
    );
}

#[test]
fn pedestrian_is_served_at_the_amber() {
    let (mut controller, _) = crossing(&[2, 4]);
    assert_eq!(walk_to(&mut controller, 2), [StateId::WaitA, StateId::Walk]);
}

#[test]
fn pedestrian_is_served_from_road_b_amber() {
    // GoA -> WaitA -> GoB -> WaitB -> Walk
    let (mut controller, _) = crossing(&[2, 0, 1, 6]);
    assert_eq!(
        walk_to(&mut controller, 4),
        [StateId::WaitA, StateId::GoB, StateId::WaitB, StateId::Walk]
    );
}

#[test]
fn walk_holds_while_nobody_else_waits() {
    let (mut controller, _) = at_walk(&[0, 0, 0]);
    assert_eq!(walk_to(&mut controller, 3), [StateId::Walk; 3]);
}

#[test]
fn hurry_sequence_runs_four_steps_and_flashes() {
    let (mut controller, log) = at_walk(&[1, 0, 7, 4, 2]);
    assert_eq!(
        walk_to(&mut controller, 5),
        [
            StateId::Hurry1,
            StateId::Hurry2,
            StateId::Hurry3,
            StateId::Hurry4,
            StateId::GoB,
        ]
    );

    let walks: Vec<WalkLight> = log
        .borrow()
        .iter()
        .filter_map(|event| match event {
            Event::Write(_, walk) => Some(*walk),
            _ => None,
        })
        .collect();
    assert_eq!(
        walks,
        [
            WalkLight::Walk,
            WalkLight::DontWalk,
            WalkLight::Blank,
            WalkLight::DontWalk,
            WalkLight::Blank,
        ]
    );
}

#[test]
fn hurry_ends_in_all_red_when_nobody_waits() {
    let (mut controller, _) = at_walk(&[1, 0, 0, 0, 0]);
    let visited = walk_to(&mut controller, 5);
    assert_eq!(visited[3], StateId::Hurry4);
    assert_eq!(visited[4], StateId::AllRed);
}

#[test]
fn all_red_returns_to_walk_for_a_lone_pedestrian() {
    let (mut controller, _) = at_walk(&[1, 0, 0, 0, 4, 4]);
    let visited = walk_to(&mut controller, 6);
    assert_eq!(&visited[4..], [StateId::AllRed, StateId::Walk]);
}

#[test]
fn all_red_hands_right_of_way_to_waiting_cars() {
    let (mut controller, _) = at_walk(&[1, 0, 0, 0, 0, 1]);
    let visited = walk_to(&mut controller, 6);
    assert_eq!(&visited[4..], [StateId::AllRed, StateId::GoA]);
}

proptest! {
    #[test]
    fn dwell_is_always_the_state_being_left(codes in prop::collection::vec(0u8..8, 1..64)) {
        let (mut controller, log) = crossing(&codes);
        let mut left = Vec::new();
        for _ in 0..codes.len() {
            left.push(controller.state());
            block_on(controller.step());
        }

        let writes = log.borrow().iter().filter(|e| matches!(e, Event::Write(..))).count();
        prop_assert_eq!(writes, codes.len());

        let waits: Vec<u64> = log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Wait(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        let expected: Vec<u64> = left.iter().map(|s| s.dwell().as_millis()).collect();
        prop_assert_eq!(waits, expected);
    }

    #[test]
    fn hurry_always_runs_to_completion(codes in prop::collection::vec(any::<u8>(), 1..128)) {
        let (mut controller, _) = crossing(&codes);
        let mut visited = vec![controller.state()];
        visited.extend(walk_to(&mut controller, codes.len() + 4));

        for (i, state) in visited.iter().enumerate() {
            prop_assert!(state.id() < 10);
            if *state == StateId::Hurry1 && i + 3 < visited.len() {
                prop_assert_eq!(
                    &visited[i..i + 4],
                    &[StateId::Hurry1, StateId::Hurry2, StateId::Hurry3, StateId::Hurry4][..]
                );
            }
        }
    }

    #[test]
    fn green_is_never_shown_to_both_roads(codes in prop::collection::vec(0u8..8, 1..64)) {
        let (mut controller, log) = crossing(&codes);
        walk_to(&mut controller, codes.len());

        for event in log.borrow().iter() {
            if let Event::Write(traffic, walk) = event {
                let bits = traffic.bits();
                prop_assert!(bits & 0x08 == 0 || bits & 0x01 == 0);
                if walk.walk() {
                    prop_assert_eq!(bits, 0x24);
                }
            }
        }
    }
}
