use crate::error::ControllerError;
use crate::models::approach::Approach;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Auto,
    Manual,
    Emergency,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Manual => "manual",
            Mode::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Mode::Auto),
            "manual" => Ok(Mode::Manual),
            "emergency" => Ok(Mode::Emergency),
            _ => Err(ControllerError::InvalidMode(s.to_string())),
        }
    }
}

/// Validates a requested duration and narrows it to the stored width.
pub fn validate_duration(seconds: i64) -> Result<u32, ControllerError> {
    match u32::try_from(seconds) {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ControllerError::InvalidDuration(seconds)),
    }
}

/// Mode, timing configuration and emergency target.
///
/// Holds no reference to the signal heads; `CycleEngine` reads this and writes
/// `SignalState`. Invariant: `emergency_active` implies `mode == Emergency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeController {
    pub(crate) mode: Mode,
    pub(crate) green_duration: u32,
    pub(crate) yellow_duration: u32,
    pub(crate) rotation_index: usize,
    pub(crate) emergency_approach: Option<Approach>,
    pub(crate) emergency_active: bool,
}

impl ModeController {
    pub fn new(green_secs: i64, yellow_secs: i64) -> Result<Self, ControllerError> {
        let green_duration = validate_duration(green_secs)?;
        let yellow_duration = validate_duration(yellow_secs)?;
        Ok(Self {
            mode: Mode::Auto,
            green_duration,
            yellow_duration,
            rotation_index: 0,
            emergency_approach: None,
            emergency_active: false,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn green_duration(&self) -> u32 {
        self.green_duration
    }

    pub fn yellow_duration(&self) -> u32 {
        self.yellow_duration
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    pub fn emergency_approach(&self) -> Option<Approach> {
        self.emergency_approach
    }

    pub fn emergency_active(&self) -> bool {
        self.emergency_active
    }

    /// Any mode other than Emergency drops the emergency target.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode != Mode::Emergency {
            self.emergency_active = false;
            self.emergency_approach = None;
        }
    }

    // Applies from the next phase transition; a running countdown is not rescaled.
    pub fn set_green_duration(&mut self, seconds: i64) -> Result<(), ControllerError> {
        self.green_duration = validate_duration(seconds)?;
        Ok(())
    }

    /// Latest caller wins. The caller is responsible for resetting the
    /// countdown to `green_duration`.
    pub fn request_emergency(&mut self, approach: Approach) {
        self.mode = Mode::Emergency;
        self.emergency_active = true;
        self.emergency_approach = Some(approach);
    }

    pub(crate) fn clear_emergency(&mut self) {
        self.emergency_active = false;
        self.emergency_approach = None;
    }
}
