use crate::models::{Approach, LightState, Mode, ModeController, Phase, SignalState};
use serde::{Deserialize, Serialize};

/// An immutable, self-consistent copy of the intersection status.
///
/// Serialises to the flat payload consumed by status pollers:
/// `{"north":"green","east":"red",...,"mode":"auto","countdown":12,...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub north: LightState,
    pub east: LightState,
    pub south: LightState,
    pub west: LightState,
    pub mode: Mode,
    pub countdown: u32,
    pub phase: Phase,
    pub active_approach: Option<Approach>,
    pub emergency_active: bool,
    pub emergency_approach: Option<Approach>,
}

impl StatusSnapshot {
    pub fn capture(signals: &SignalState, modes: &ModeController) -> Self {
        Self {
            north: signals.color(Approach::North),
            east: signals.color(Approach::East),
            south: signals.color(Approach::South),
            west: signals.color(Approach::West),
            mode: modes.mode(),
            countdown: signals.countdown,
            phase: signals.phase,
            active_approach: signals.active_approach(),
            emergency_active: modes.emergency_active(),
            emergency_approach: modes.emergency_approach(),
        }
    }

    pub fn color(&self, approach: Approach) -> LightState {
        match approach {
            Approach::North => self.north,
            Approach::East => self.east,
            Approach::South => self.south,
            Approach::West => self.west,
        }
    }

    /// Approaches showing Green or Yellow.
    pub fn lit_approaches(&self) -> Vec<Approach> {
        Approach::ALL
            .into_iter()
            .filter(|a| self.color(*a) != LightState::Red)
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
