// detection/mod.rs
pub mod siren_detector;

pub use siren_detector::{run_detector_loop, EmergencySource, RandomSirenDetector, ScriptedSource};
