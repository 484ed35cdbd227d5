// control_system/mod.rs
pub mod cycle_engine;
pub mod status;
pub mod traffic_light_controller;

pub use cycle_engine::CycleEngine;
pub use status::StatusSnapshot;
pub use traffic_light_controller::TrafficLightController;
