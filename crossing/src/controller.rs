/*
 * The control loop of the crossing.
 *
 * Each step puts the current state's lights on the signal heads, holds them
 * for the state's dwell, samples the detectors and moves to the successor the
 * table names for that sample. The order never changes: the sample is taken
 * after the dwell, so anything that showed up while the lights were held is
 * seen.
 *
 * The three collaborators are traits so the loop can run on the board with
 * Embassy and on the host with fakes.
 */

use embassy_time::Duration;

use crate::fmt::{debug, info, trace};
use crate::lights::{TrafficLights, WalkLight};
use crate::sensor::SensorCode;
use crate::state::StateId;

/// Puts a light pattern on the signal heads.
pub trait LightDriver {
    /// Both patterns arrive in one call so a driver whose lamps share a port
    /// can switch them together. Writing the same pattern again is harmless.
    fn write(&mut self, traffic: TrafficLights, walk: WalkLight);
}

/// Samples the three detector lines.
pub trait SensorInput {
    fn read(&mut self) -> SensorCode;
}

/// Suspends the control loop for at least the given time.
#[allow(async_fn_in_trait)]
pub trait Dwell {
    async fn wait(&mut self, duration: Duration);
}

pub struct Controller<L, S, T> {
    state: StateId,
    lights: L,
    sensors: S,
    timer: T,
}

impl<L, S, T> Controller<L, S, T>
where
    L: LightDriver,
    S: SensorInput,
    T: Dwell,
{
    pub fn new(lights: L, sensors: S, timer: T) -> Self {
        info!("crossing controller starts in {}", StateId::INITIAL);
        Controller {
            state: StateId::INITIAL,
            lights,
            sensors,
            timer,
        }
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    /*
     * Run one cycle of the machine and return the state it moved to.
     */
    pub async fn step(&mut self) -> StateId {
        let row = self.state.row();

        self.lights.write(row.traffic, row.walk);

        trace!("{} dwells {} ms", row.id, row.dwell.as_millis());
        self.timer.wait(row.dwell).await;

        let input = self.sensors.read();
        let next = row.next_state(input);
        debug!("{} --[{}]--> {}", row.id, input.bits(), next);

        self.state = next;
        next
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    pub fn into_parts(self) -> (L, S, T) {
        (self.lights, self.sensors, self.timer)
    }
}
