// models/mod.rs
pub mod approach;
pub mod mode;
pub mod signal_state;

pub use approach::Approach;
pub use mode::{Mode, ModeController};
pub use signal_state::{LightState, Phase, SignalState};
