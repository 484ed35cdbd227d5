//! Four-approach traffic signal controller.
//!
//! A `CycleEngine` owns the signal heads and mode state and is advanced once
//! per tick by a background driver. External producers (operators, siren
//! detectors) talk to it only through `TrafficLightController`, which
//! serialises every operation on one lock.

pub mod config;
pub mod control_system;
pub mod detection;
pub mod error;
pub mod global_variables;
pub mod models;
pub mod monitoring;

pub use config::ControllerConfig;
pub use control_system::{CycleEngine, StatusSnapshot, TrafficLightController};
pub use error::{ConfigError, ControllerError};
pub use models::{Approach, LightState, Mode, Phase};
