// Signal timing defaults (seconds)
pub const DEFAULT_GREEN_SECS: u32 = 15;
pub const DEFAULT_YELLOW_SECS: u32 = 3;

// Driver tick interval
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

// Siren detector simulation
pub const DEFAULT_SIREN_COOLDOWN_SECS: u64 = 15;
pub const DEFAULT_SIREN_TRIGGER_PROBABILITY: f64 = 0.25;
pub const DEFAULT_SIREN_POLL_INTERVAL_MS: u64 = 1000;

// Environment variables
pub const ENV_CONFIG_PATH: &str = "INTERSECTION_CONFIG";
pub const ENV_GREEN_SECS: &str = "SIGNAL_GREEN_SECS";
pub const ENV_YELLOW_SECS: &str = "SIGNAL_YELLOW_SECS";
pub const ENV_TICK_MS: &str = "SIGNAL_TICK_MS";
pub const ENV_SIREN_SIMULATION: &str = "SIGNAL_SIREN_SIMULATION";
