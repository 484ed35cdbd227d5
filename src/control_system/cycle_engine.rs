use crate::control_system::status::StatusSnapshot;
use crate::error::ControllerError;
use crate::models::{Approach, Mode, ModeController, Phase, SignalState};

/// The signal scheduling state machine for a single intersection.
///
/// Owns both the mode controller and the signal heads. `advance()` is the only
/// place the signal heads change; the mutators below only touch the mode
/// controller (and the countdown, for emergency requests).
#[derive(Debug, Clone)]
pub struct CycleEngine {
    signals: SignalState,
    modes: ModeController,
    // Set at startup and whenever auto control is (re)entered from an
    // emergency. The next auto tick lights the rotation approach with a full
    // green countdown instead of decrementing.
    fresh_green: bool,
    ticks: u64,
}

impl CycleEngine {
    pub fn new(green_secs: i64, yellow_secs: i64) -> Result<Self, ControllerError> {
        Ok(Self {
            signals: SignalState::new(),
            modes: ModeController::new(green_secs, yellow_secs)?,
            fresh_green: true,
            ticks: 0,
        })
    }

    pub fn signals(&self) -> &SignalState {
        &self.signals
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    /// Number of ticks that completed without a fault.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::capture(&self.signals, &self.modes)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        let previous = self.modes.mode;
        self.modes.set_mode(mode);
        if previous == Mode::Emergency && mode != Mode::Emergency {
            self.fresh_green = true;
        }
        if previous != mode {
            log::info!("[CycleEngine] Mode changed from {} to {}", previous, mode);
        }
    }

    pub fn set_green_duration(&mut self, seconds: i64) -> Result<(), ControllerError> {
        let previous = self.modes.green_duration;
        self.modes.set_green_duration(seconds)?;
        log::info!(
            "[CycleEngine] Green duration adjusted from {}s to {}s (applies from next transition)",
            previous,
            seconds
        );
        Ok(())
    }

    /// Preempts the cycle for `approach`. A repeat request re-extends the hold.
    pub fn request_emergency(&mut self, approach: Approach) {
        match self.modes.emergency_approach.filter(|_| self.modes.emergency_active) {
            Some(current) if current == approach => {
                log::warn!("[CycleEngine] Emergency hold for {} extended", approach)
            }
            Some(current) => log::warn!(
                "[CycleEngine] Emergency target switched from {} to {}",
                current,
                approach
            ),
            None => log::warn!("[CycleEngine] Emergency preemption requested for {}", approach),
        }
        self.modes.request_emergency(approach);
        self.signals.countdown = self.modes.green_duration;
    }

    /// Advances the intersection by one tick.
    ///
    /// State is validated before anything is written, so an `Err` leaves the
    /// engine exactly as it was.
    pub fn advance(&mut self) -> Result<(), ControllerError> {
        match self.modes.mode {
            Mode::Emergency => self.advance_emergency()?,
            Mode::Manual => self.signals.set_all_red(),
            Mode::Auto => self.advance_auto()?,
        }
        self.ticks += 1;
        log::debug!(
            "[CycleEngine] tick {} mode={} active={:?} phase={:?} countdown={}",
            self.ticks,
            self.modes.mode,
            self.signals.active_approach(),
            self.signals.phase,
            self.signals.countdown
        );
        Ok(())
    }

    fn advance_emergency(&mut self) -> Result<(), ControllerError> {
        if !self.modes.emergency_active {
            // Emergency mode was set without a target: hold all-Red.
            self.signals.set_all_red();
            return Ok(());
        }
        let approach = self.modes.emergency_approach.ok_or_else(|| {
            ControllerError::InternalInconsistency(
                "emergency active without a target approach".to_string(),
            )
        })?;

        self.signals.show(approach, Phase::Green);
        self.signals.countdown = self.signals.countdown.saturating_sub(1);
        if self.signals.countdown == 0 {
            self.modes.clear_emergency();
            self.modes.set_mode(Mode::Auto);
            self.signals.phase = Phase::Green;
            self.signals.countdown = self.modes.green_duration;
            self.fresh_green = true;
            log::info!(
                "[CycleEngine] Emergency hold for {} expired, resuming auto rotation at {}",
                approach,
                Approach::from_index(self.modes.rotation_index)
                    .map_or("<invalid>", Approach::as_str)
            );
        }
        Ok(())
    }

    fn advance_auto(&mut self) -> Result<(), ControllerError> {
        let index = self.modes.rotation_index;
        let current = Approach::from_index(index).ok_or_else(|| {
            ControllerError::InternalInconsistency(format!("rotation index {} out of range", index))
        })?;

        if self.fresh_green {
            self.fresh_green = false;
            self.signals.show(current, Phase::Green);
            self.signals.countdown = self.modes.green_duration;
            log::info!(
                "[CycleEngine] {} switching to Green for {}s",
                current,
                self.modes.green_duration
            );
            return Ok(());
        }

        let mut approach = current;
        let mut phase = self.signals.phase;
        self.signals.countdown = self.signals.countdown.saturating_sub(1);
        if self.signals.countdown == 0 {
            match phase {
                Phase::Green => {
                    phase = Phase::Yellow;
                    self.signals.countdown = self.modes.yellow_duration;
                }
                Phase::Yellow => {
                    self.modes.rotation_index = (index + 1) % Approach::ALL.len();
                    approach = Approach::ALL[self.modes.rotation_index];
                    phase = Phase::Green;
                    self.signals.countdown = self.modes.green_duration;
                }
            }
            log::info!(
                "[CycleEngine] {} switching to {:?} for {}s",
                approach,
                phase,
                self.signals.countdown
            );
        }
        self.signals.show(approach, phase);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn corrupt_rotation_index(&mut self, index: usize) {
        self.modes.rotation_index = index;
    }
}
