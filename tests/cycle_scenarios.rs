use intersection_controller::{Approach, ControllerError, LightState, Mode, Phase, TrafficLightController};

fn controller(green: i64, yellow: i64) -> TrafficLightController {
    TrafficLightController::new(green, yellow).unwrap()
}

fn run(controller: &TrafficLightController, ticks: usize) {
    for _ in 0..ticks {
        assert!(controller.tick_once());
    }
}

fn active(controller: &TrafficLightController) -> (Approach, LightState) {
    let snapshot = controller.snapshot();
    let lit = snapshot.lit_approaches();
    assert_eq!(lit.len(), 1, "exactly one approach should be lit: {:?}", snapshot);
    (lit[0], snapshot.color(lit[0]))
}

#[test]
fn fresh_start_scenario_15_3() {
    let c = controller(15, 3);
    for tick in 1..=15 {
        run(&c, 1);
        assert_eq!(active(&c), (Approach::North, LightState::Green), "tick {}", tick);
    }
    run(&c, 1); // tick 16
    assert_eq!(active(&c), (Approach::North, LightState::Yellow));
    run(&c, 2);
    assert_eq!(active(&c), (Approach::North, LightState::Yellow));
    run(&c, 1); // tick 19
    assert_eq!(active(&c), (Approach::East, LightState::Green));
}

#[test]
fn rotation_visits_every_approach_in_order() {
    let (g, y) = (4usize, 2usize);
    let c = controller(g as i64, y as i64);
    let mut observed = Vec::new();
    for _ in 0..(g + y) * 5 {
        run(&c, 1);
        observed.push(active(&c));
    }

    let mut expected = Vec::new();
    for cycle in 0..5 {
        let approach = Approach::ALL[cycle % 4];
        expected.extend(std::iter::repeat((approach, LightState::Green)).take(g));
        expected.extend(std::iter::repeat((approach, LightState::Yellow)).take(y));
    }
    assert_eq!(observed, expected);
}

#[test]
fn emergency_preempts_at_any_point_of_the_cycle() {
    for offset in 1..=7 {
        let c = controller(5, 2);
        run(&c, offset);
        c.request_emergency(Approach::East);
        run(&c, 1);

        let snapshot = c.snapshot();
        assert_eq!(snapshot.east, LightState::Green, "offset {}", offset);
        assert_eq!(snapshot.lit_approaches(), vec![Approach::East]);
        assert_eq!(snapshot.mode, Mode::Emergency);
        assert!(snapshot.emergency_active);
    }
}

#[test]
fn emergency_hold_then_release_at_current_rotation_index() {
    let c = controller(6, 2);
    // North green (6) + yellow (2), then two ticks of East green.
    run(&c, 10);
    assert_eq!(active(&c), (Approach::East, LightState::Green));

    c.request_emergency(Approach::South);
    for tick in 1..=6 {
        run(&c, 1);
        assert_eq!(active(&c), (Approach::South, LightState::Green), "hold tick {}", tick);
    }
    let released = c.snapshot();
    assert_eq!(released.mode, Mode::Auto);
    assert!(!released.emergency_active);
    assert_eq!(released.emergency_approach, None);
    assert_eq!(released.phase, Phase::Green);
    assert_eq!(released.countdown, 6);

    run(&c, 1);
    assert_eq!(active(&c), (Approach::East, LightState::Green));
    assert_eq!(c.snapshot().countdown, 6);
}

#[test]
fn retrigger_extends_hold() {
    let c = controller(5, 2);
    c.request_emergency(Approach::West);
    run(&c, 4);
    assert_eq!(c.snapshot().countdown, 1);

    c.request_emergency(Approach::West);
    assert_eq!(c.snapshot().countdown, 5);
    for _ in 0..4 {
        run(&c, 1);
        assert_eq!(c.snapshot().mode, Mode::Emergency);
        assert_eq!(active(&c), (Approach::West, LightState::Green));
    }
    run(&c, 1);
    assert_eq!(c.snapshot().mode, Mode::Auto);
}

#[test]
fn latest_emergency_caller_wins() {
    let c = controller(5, 2);
    c.request_emergency(Approach::North);
    run(&c, 2);
    c.request_emergency(Approach::South);
    run(&c, 1);

    let snapshot = c.snapshot();
    assert_eq!(snapshot.emergency_approach, Some(Approach::South));
    assert_eq!(active(&c), (Approach::South, LightState::Green));
    assert_eq!(snapshot.countdown, 4);
}

#[test]
fn manual_mode_freezes_progression() {
    let c = controller(5, 2);
    run(&c, 3);
    c.stop();
    run(&c, 1);
    let frozen = c.snapshot();
    assert!(frozen.lit_approaches().is_empty());

    for _ in 0..20 {
        run(&c, 1);
        assert_eq!(c.snapshot(), frozen);
    }

    // Resume picks the held phase back up at the same approach.
    c.start();
    run(&c, 1);
    assert_eq!(active(&c), (Approach::North, LightState::Green));
    assert_eq!(c.snapshot().countdown, frozen.countdown - 1);
}

#[test]
fn invalid_input_is_rejected_without_side_effects() {
    let c = controller(15, 3);
    run(&c, 2);
    let before = c.snapshot();

    assert_eq!(c.set_green_duration(0), Err(ControllerError::InvalidDuration(0)));
    assert_eq!(c.set_green_duration(-5), Err(ControllerError::InvalidDuration(-5)));
    assert_eq!(
        c.set_mode_named("foo"),
        Err(ControllerError::InvalidMode("foo".to_string()))
    );
    assert_eq!(c.snapshot(), before);

    // The existing duration still governs the next green.
    run(&c, 13 + 3 + 1);
    assert_eq!(active(&c), (Approach::East, LightState::Green));
    assert_eq!(c.snapshot().countdown, 15);
}

#[test]
fn zero_durations_are_rejected_at_construction() {
    assert_eq!(
        TrafficLightController::new(0, 3).unwrap_err(),
        ControllerError::InvalidDuration(0)
    );
    assert_eq!(
        TrafficLightController::new(15, 0).unwrap_err(),
        ControllerError::InvalidDuration(0)
    );
}
