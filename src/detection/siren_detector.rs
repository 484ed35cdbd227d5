use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::config::ControllerConfig;
use crate::control_system::traffic_light_controller::TrafficLightController;
use crate::models::Approach;

/// A producer of emergency detections.
///
/// Each poll either reports the approach an emergency vehicle was detected on
/// or nothing. The controller only ever sees the result through
/// `request_emergency`.
pub trait EmergencySource: Send {
    fn poll(&mut self, now: Instant) -> Option<Approach>;
}

/// Simulated siren listener: each poll outside the cooldown window fires with
/// probability `trigger_probability` on a random approach.
pub struct RandomSirenDetector {
    rng: StdRng,
    trigger_probability: f64,
    cooldown: Duration,
    last_trigger: Option<Instant>,
}

impl RandomSirenDetector {
    pub fn new(trigger_probability: f64, cooldown: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), trigger_probability, cooldown)
    }

    pub fn with_rng(rng: StdRng, trigger_probability: f64, cooldown: Duration) -> Self {
        Self {
            rng,
            // NaN would make random_bool panic; treat it as never firing.
            trigger_probability: if trigger_probability.is_nan() {
                0.0
            } else {
                trigger_probability.clamp(0.0, 1.0)
            },
            cooldown,
            last_trigger: None,
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(config.siren_trigger_probability, config.siren_cooldown())
    }

    fn cooling_down(&self, now: Instant) -> bool {
        self.last_trigger
            .is_some_and(|last| now.saturating_duration_since(last) < self.cooldown)
    }
}

impl EmergencySource for RandomSirenDetector {
    fn poll(&mut self, now: Instant) -> Option<Approach> {
        if self.cooling_down(now) {
            return None;
        }
        if !self.rng.random_bool(self.trigger_probability) {
            return None;
        }
        self.last_trigger = Some(now);
        let approach = Approach::ALL[self.rng.random_range(0..Approach::ALL.len())];
        log::info!("[SirenDetector] Siren detected on {} approach", approach);
        Some(approach)
    }
}

/// Replays a fixed sequence of detections, one per poll, then stays quiet.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Option<Approach>>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Option<Approach>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EmergencySource for ScriptedSource {
    fn poll(&mut self, _now: Instant) -> Option<Approach> {
        self.script.pop_front().flatten()
    }
}

// Polls `source` every `period` and forwards detections to the controller.
pub async fn run_detector_loop<S: EmergencySource>(
    controller: TrafficLightController,
    mut source: S,
    period: Duration,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        let now = ticker.tick().await;
        if let Some(approach) = source.poll(now) {
            controller.request_emergency(approach);
        }
    }
}
