/*
 * A table-driven controller for a two-road crossing with a pedestrian light.
 *
 * The crossing is a Moore machine of ten states. Every state fixes the lights
 * and how long they are held, and after that dwell the three detectors pick
 * the next state. Nothing here touches hardware: the board supplies a
 * `LightDriver`, a `SensorInput` and a `Dwell`, and runs a `Controller`.
 */
#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod controller;
pub mod error;
pub mod lights;
pub mod sensor;
pub mod state;

pub use controller::{Controller, Dwell, LightDriver, SensorInput};
pub use error::UnknownState;
pub use lights::{Aspect, Leg, Rag, TrafficLights, WalkLight};
pub use sensor::SensorCode;
pub use state::{State, StateId};
