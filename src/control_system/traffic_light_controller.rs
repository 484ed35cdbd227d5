use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::ControllerConfig;
use crate::control_system::cycle_engine::CycleEngine;
use crate::control_system::status::StatusSnapshot;
use crate::error::ControllerError;
use crate::models::{Approach, Mode};

/// Shared handle to the single intersection.
///
/// Every operation, including the driver's tick, runs as one critical section
/// on the same mutex, so readers never see a half-applied transition. Clones
/// share the same engine.
#[derive(Debug, Clone)]
pub struct TrafficLightController {
    engine: Arc<Mutex<CycleEngine>>,
}

impl TrafficLightController {
    pub fn new(green_secs: i64, yellow_secs: i64) -> Result<Self, ControllerError> {
        Ok(Self {
            engine: Arc::new(Mutex::new(CycleEngine::new(green_secs, yellow_secs)?)),
        })
    }

    pub fn from_config(config: &ControllerConfig) -> Result<Self, ControllerError> {
        Self::new(
            i64::from(config.green_duration_secs),
            i64::from(config.yellow_duration_secs),
        )
    }

    // A panicking tick poisons the mutex; the state it guards is still usable
    // because advance() validates before it writes.
    fn lock(&self) -> MutexGuard<'_, CycleEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_mode(&self, mode: Mode) {
        self.lock().set_mode(mode);
    }

    /// String entry point for external callers ("auto", "manual", "emergency").
    pub fn set_mode_named(&self, name: &str) -> Result<(), ControllerError> {
        let mode = name.parse::<Mode>().inspect_err(|e| {
            log::warn!("[TrafficController] Rejected mode change: {}", e);
        })?;
        self.set_mode(mode);
        Ok(())
    }

    pub fn start(&self) {
        self.set_mode(Mode::Auto);
    }

    pub fn stop(&self) {
        self.set_mode(Mode::Manual);
    }

    pub fn set_green_duration(&self, seconds: i64) -> Result<(), ControllerError> {
        self.lock().set_green_duration(seconds).inspect_err(|e| {
            log::warn!("[TrafficController] Rejected timer change: {}", e);
        })
    }

    /// Fire-and-forget preemption request.
    pub fn request_emergency(&self, approach: Approach) {
        self.lock().request_emergency(approach);
    }

    pub fn request_emergency_named(&self, name: &str) -> Result<(), ControllerError> {
        let approach = name.parse::<Approach>().inspect_err(|e| {
            log::warn!("[TrafficController] Rejected emergency request: {}", e);
        })?;
        self.request_emergency(approach);
        Ok(())
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.lock().snapshot()
    }

    /// Number of ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.lock().ticks()
    }

    /// Runs one advance step. Faults are logged and the tick is skipped;
    /// returns whether the tick was applied.
    pub fn tick_once(&self) -> bool {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.lock().advance()));
        match outcome {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                log::error!("[TrafficController] Skipping tick: {}", e);
                false
            }
            Err(_) => {
                log::error!("[TrafficController] Skipping tick: advance panicked");
                false
            }
        }
    }

    // Periodically advances the intersection. Never returns; the first tick
    // fires one `period` after the call.
    pub async fn run_update_loop(self, period: Duration) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        log::info!(
            "[TrafficController] Driver started, ticking every {:?}",
            period
        );
        loop {
            ticker.tick().await;
            self.tick_once();
        }
    }

    /// Spawns the driver onto the current tokio runtime.
    pub fn spawn_driver(&self, period: Duration) -> JoinHandle<()> {
        tokio::spawn(self.clone().run_update_loop(period))
    }
}
