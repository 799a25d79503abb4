/*
 * The state table of the crossing.
 *
 * Each state is a Moore state: it fixes the vehicle lights, the pedestrian
 * light and how long they are held. After the dwell, the sensor code picks
 * the successor from the state's row. Every attribute is an exhaustive match
 * on `StateId` and every row is a `[StateId; 8]`, so a missing state or a
 * missing sensor code does not compile.
 */

use embassy_time::Duration;
use enum_ordinalize::Ordinalize;

use crate::error::UnknownState;
use crate::lights::{Aspect, TrafficLights, WalkLight};
use crate::sensor::SensorCode;

#[derive(Ordinalize, Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StateId {
    // Right of way for road A, then its clearance.
    GoA,
    WaitA,
    // Right of way for road B, then its clearance.
    GoB,
    WaitB,
    // Pedestrian phase: walk, then four half-second steps flashing don't-walk.
    Walk,
    Hurry1,
    Hurry2,
    Hurry3,
    Hurry4,
    AllRed,
}

pub type Transitions = [StateId; SensorCode::COUNT];

/// One row of the table, as handed out by [`StateId::row`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct State {
    pub id: StateId,
    pub traffic: TrafficLights,
    pub walk: WalkLight,
    pub dwell: Duration,
    pub next: &'static Transitions,
}

impl State {
    pub fn next_state(&self, input: SensorCode) -> StateId {
        self.next[input.index()]
    }
}

const ALL_RED: TrafficLights = TrafficLights::new(Aspect::Red, Aspect::Red);

impl StateId {
    pub const INITIAL: StateId = StateId::GoA;

    pub fn id(&self) -> u8 {
        self.ordinal()
    }

    pub fn row(&self) -> State {
        State {
            id: *self,
            traffic: self.traffic(),
            walk: self.walk(),
            dwell: self.dwell(),
            next: self.transitions(),
        }
    }

    pub fn traffic(&self) -> TrafficLights {
        match self {
            StateId::GoA => TrafficLights::new(Aspect::Green, Aspect::Red),
            StateId::WaitA => TrafficLights::new(Aspect::Amber, Aspect::Red),
            StateId::GoB => TrafficLights::new(Aspect::Red, Aspect::Green),
            StateId::WaitB => TrafficLights::new(Aspect::Red, Aspect::Amber),
            StateId::Walk
            | StateId::Hurry1
            | StateId::Hurry2
            | StateId::Hurry3
            | StateId::Hurry4
            | StateId::AllRed => ALL_RED,
        }
    }

    /*
     * Hurry2 and Hurry4 are blank rather than don't-walk. That is what makes
     * the hurry steps flash, and the pattern is part of the contract with the
     * lamp wiring, so it stays as is.
     */
    pub fn walk(&self) -> WalkLight {
        match self {
            StateId::Walk => WalkLight::Walk,
            StateId::Hurry2 | StateId::Hurry4 => WalkLight::Blank,
            StateId::GoA
            | StateId::WaitA
            | StateId::GoB
            | StateId::WaitB
            | StateId::Hurry1
            | StateId::Hurry3
            | StateId::AllRed => WalkLight::DontWalk,
        }
    }

    pub fn dwell(&self) -> Duration {
        match self {
            StateId::GoA | StateId::GoB | StateId::Walk => Duration::from_millis(2000),
            StateId::WaitA | StateId::WaitB | StateId::AllRed => Duration::from_millis(1000),
            StateId::Hurry1 | StateId::Hurry2 | StateId::Hurry3 | StateId::Hurry4 => {
                Duration::from_millis(500)
            }
        }
    }

    /*
     * Rows are indexed by sensor code:
     *   0 nobody, 1 car B, 2 car A, 3 cars A+B,
     *   4 pedestrian, 5 ped+B, 6 ped+A, 7 everyone.
     */
    pub fn transitions(&self) -> &'static Transitions {
        use StateId::*;

        match self {
            GoA => &[GoA, GoA, WaitA, WaitA, WaitA, WaitA, WaitA, WaitA],
            WaitA => &[GoB, GoB, GoB, GoB, Walk, Walk, GoB, GoB],
            GoB => &[GoB, WaitB, GoB, WaitB, WaitB, WaitB, WaitB, WaitB],
            WaitB => &[GoA, GoA, GoA, GoA, Walk, Walk, Walk, Walk],
            Walk => &[Walk, Hurry1, Hurry1, Hurry1, Hurry1, Hurry1, Hurry1, Hurry1],
            Hurry1 => &[Hurry2, Hurry2, Hurry2, Hurry2, Hurry2, Hurry2, Hurry2, Hurry2],
            Hurry2 => &[Hurry3, Hurry3, Hurry3, Hurry3, Hurry3, Hurry3, Hurry3, Hurry3],
            Hurry3 => &[Hurry4, Hurry4, Hurry4, Hurry4, Hurry4, Hurry4, Hurry4, Hurry4],
            Hurry4 => &[AllRed, GoA, GoB, GoA, AllRed, GoA, GoB, GoA],
            AllRed => &[AllRed, GoA, GoB, GoA, Walk, GoA, GoB, GoA],
        }
    }

    pub fn next(&self, input: SensorCode) -> StateId {
        self.transitions()[input.index()]
    }
}

impl TryFrom<u8> for StateId {
    type Error = UnknownState;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        StateId::from_ordinal(id).ok_or(UnknownState(id))
    }
}

impl From<StateId> for u8 {
    fn from(state: StateId) -> u8 {
        state.ordinal()
    }
}
