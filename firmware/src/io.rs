/*
 * The I/O module for the crossing.
 *
 * This module maps the controller's light patterns and sensor code onto the
 * GPIO pins of the board. The intention is for this module to be the only
 * part of the program that is device-specific.
 *
 * Lamps and detectors are active-high. The on-board LED is active-low.
 */

use crossing_fsm::{
    Dwell, Leg, LightDriver, Rag, SensorCode, SensorInput, TrafficLights, WalkLight,
};
use embassy_stm32::{
    Peripherals,
    gpio::{Input, Level, Output, Pin, Pull, Speed},
};
use embassy_time::{Duration, Timer};

// Detectors pull their line high while something is present.
const DETECTOR_PULL: Pull = Pull::Down;

pub struct SignalHeads {
    road_a: [Output<'static>; 3],
    road_b: [Output<'static>; 3],
    walk: Output<'static>,
    dont_walk: Output<'static>,
}

/*
 * The lamps sit on two ports, so the heads change one pin at a time. The
 * whole pattern is in place long before the dwell that follows is over.
 */
impl LightDriver for SignalHeads {
    fn write(&mut self, traffic: TrafficLights, walk: WalkLight) {
        light(&mut self.road_a, &traffic.rag(Leg::A));
        light(&mut self.road_b, &traffic.rag(Leg::B));
        set(&mut self.walk, walk.walk());
        set(&mut self.dont_walk, walk.dont_walk());
    }
}

pub struct Detectors {
    pedestrian: Input<'static>,
    road_a: Input<'static>,
    road_b: Input<'static>,
}

impl SensorInput for Detectors {
    fn read(&mut self) -> SensorCode {
        SensorCode::new(
            self.pedestrian.is_high(),
            self.road_a.is_high(),
            self.road_b.is_high(),
        )
    }
}

pub struct EmbassyTimer;

impl Dwell for EmbassyTimer {
    async fn wait(&mut self, duration: Duration) {
        Timer::after(duration).await
    }
}

pub struct Heartbeat(Output<'static>);

impl Heartbeat {
    pub fn set(&mut self, on: bool) {
        // the on-board LED is active-low
        self.0.set_level(if on { Level::Low } else { Level::High })
    }
}

pub struct Board {
    pub lights: SignalHeads,
    pub sensors: Detectors,
    pub heartbeat: Heartbeat,
}

impl Board {
    /*
     * Claim and configure every pin the crossing uses. Until the controller
     * writes its first pattern, both roads and the pedestrians see red.
     */
    pub fn new(peripherals: Peripherals) -> Self {
        let lights = SignalHeads {
            road_a: [
                Output::new(peripherals.PE1.degrade(), Level::High, Speed::Low),
                Output::new(peripherals.PB9.degrade(), Level::Low, Speed::Low),
                Output::new(peripherals.PB7.degrade(), Level::Low, Speed::Low),
            ],
            road_b: [
                Output::new(peripherals.PB6.degrade(), Level::High, Speed::Low),
                Output::new(peripherals.PB8.degrade(), Level::Low, Speed::Low),
                Output::new(peripherals.PE0.degrade(), Level::Low, Speed::Low),
            ],
            walk: Output::new(peripherals.PA1.degrade(), Level::Low, Speed::Low),
            dont_walk: Output::new(peripherals.PA2.degrade(), Level::High, Speed::Low),
        };

        let sensors = Detectors {
            pedestrian: Input::new(peripherals.PC2.degrade(), DETECTOR_PULL),
            road_a: Input::new(peripherals.PC1.degrade(), DETECTOR_PULL),
            road_b: Input::new(peripherals.PC0.degrade(), DETECTOR_PULL),
        };

        let heartbeat = Heartbeat(Output::new(
            peripherals.PE12.degrade(),
            Level::High,
            Speed::Low,
        ));

        Board {
            lights,
            sensors,
            heartbeat,
        }
    }
}

fn light(outputs: &mut [Output; 3], rag: &Rag) {
    set(&mut outputs[0], rag.red);
    set(&mut outputs[1], rag.amber);
    set(&mut outputs[2], rag.green);
}

fn set(output: &mut Output, on: bool) {
    output.set_level(if on { Level::High } else { Level::Low });
}
