use crate::models::approach::Approach;
use serde::{Deserialize, Serialize};

/// The possible states for a single approach's signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    Red,
    Green,
    Yellow,
}

/// Sub-state of the active approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Green,
    Yellow,
}

impl From<Phase> for LightState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Green => LightState::Green,
            Phase::Yellow => LightState::Yellow,
        }
    }
}

/// Colour assignment for the four approaches plus the running countdown.
///
/// At most one approach is ever non-Red. The only way to light an approach is
/// `show`, which reds out every other approach first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalState {
    /// Indexed by `Approach::index()`.
    colors: [LightState; 4],
    active_approach: Option<Approach>,
    pub phase: Phase,
    pub countdown: u32,
}

impl SignalState {
    /// All-Red, countdown 0.
    pub fn new() -> Self {
        Self {
            colors: [LightState::Red; 4],
            active_approach: None,
            phase: Phase::Green,
            countdown: 0,
        }
    }

    pub fn color(&self, approach: Approach) -> LightState {
        self.colors[approach.index()]
    }

    pub fn active_approach(&self) -> Option<Approach> {
        self.active_approach
    }

    pub fn set_all_red(&mut self) {
        self.colors = [LightState::Red; 4];
        self.active_approach = None;
    }

    /// Lights `approach` with `phase` and every other approach Red.
    pub fn show(&mut self, approach: Approach, phase: Phase) {
        self.set_all_red();
        self.colors[approach.index()] = phase.into();
        self.active_approach = Some(approach);
        self.phase = phase;
    }

    /// Number of approaches currently showing Green or Yellow.
    pub fn lit_count(&self) -> usize {
        self.colors
            .iter()
            .filter(|c| **c != LightState::Red)
            .count()
    }
}

impl Default for SignalState {
    fn default() -> Self {
        Self::new()
    }
}
