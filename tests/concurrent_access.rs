use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use intersection_controller::{Approach, LightState, Mode, TrafficLightController};

// Readers must never observe a torn state while ticks and mutators race.
#[test]
fn snapshots_stay_consistent_under_contention() {
    let controller = TrafficLightController::new(2, 1).unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let driver = {
        let controller = controller.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                controller.tick_once();
            }
        })
    };

    let producers: Vec<_> = Approach::ALL
        .into_iter()
        .map(|approach| {
            let controller = controller.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    match i % 5 {
                        0 => controller.request_emergency(approach),
                        1 => controller.stop(),
                        2 => controller.start(),
                        3 => {
                            let _ = controller.set_green_duration((i % 4) as i64 + 1);
                        }
                        _ => {
                            let _ = controller.set_mode_named("emergency");
                        }
                    }
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let controller = controller.clone();
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let snapshot = controller.snapshot();
                    assert!(snapshot.lit_approaches().len() <= 1, "{:?}", snapshot);
                    if snapshot.emergency_active {
                        assert_eq!(snapshot.mode, Mode::Emergency);
                        assert!(snapshot.emergency_approach.is_some());
                    }
                }
            })
        })
        .collect();

    for handle in producers.into_iter().chain(readers) {
        handle.join().unwrap();
    }
    done.store(true, Ordering::Relaxed);
    driver.join().unwrap();

    assert!(controller.ticks() > 0);
}

#[tokio::test(start_paused = true)]
async fn driver_and_producer_share_one_intersection() {
    let controller = TrafficLightController::new(3, 1).unwrap();
    let driver = controller.spawn_driver(Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(1500)).await;
    controller.request_emergency(Approach::South);

    // Hold ticks at t=2,3,4; the one at t=4 releases back to auto.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(controller.snapshot().south, LightState::Green);
    assert_eq!(controller.snapshot().mode, Mode::Emergency);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(controller.snapshot().mode, Mode::Auto);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(controller.snapshot().lit_approaches(), vec![Approach::North]);

    driver.abort();
}
