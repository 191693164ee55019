//! Timed step tests: staggered row start and the interweave jump schedule.
//!
//! Elapsed boundaries use strict comparisons; the samples below pin which
//! side of each edge a tick lands on.

use choreo_core::{
    config::{DelayedStartConfig, GovernorConfig, InterweaveConfig},
    crossing_squares::{DelayedStart, Interweave, NUM_BOTS},
    drone::{Controls, Drone},
    packet::GamePacket,
    step::Step,
    types::Vec3,
};

fn roster() -> Vec<Drone> {
    (0..NUM_BOTS).map(Drone::new).collect()
}

fn packet_at(t: f32) -> GamePacket {
    GamePacket { seconds_elapsed: t, ..GamePacket::default() }
}

fn delayed_start() -> DelayedStart {
    DelayedStart::new(DelayedStartConfig::default(), GovernorConfig::default())
}

fn interweave() -> Interweave {
    Interweave::new(InterweaveConfig::default(), GovernorConfig::default())
}

fn with_speed(mut drone: Drone, speed: f32) -> Drone {
    drone.velocity = Vec3::new(0.0, speed, 0.0);
    drone
}

// ── Delayed start ──────────────────────────────────────────────────

#[test]
fn rows_wait_for_their_delay() {
    let step = delayed_start();
    assert_eq!(step.throttle_start(0), 0.0);
    assert!((step.throttle_start(4) - 0.9).abs() < 1e-6);
    assert!((step.throttle_start(12) - 2.7).abs() < 1e-6);
    // Square B rows repeat square A's.
    assert_eq!(step.throttle_start(16), 0.0);
    assert!((step.throttle_start(28) - 2.7).abs() < 1e-6);
}

#[test]
fn drone_is_neutral_before_its_row_starts() {
    let step = delayed_start();
    let row_two = Drone::new(9);

    assert_eq!(step.controls_for(&row_two, 1.0), Controls::neutral());
    assert_eq!(step.controls_for(&row_two, 1.79), Controls::neutral());
    assert_eq!(step.controls_for(&row_two, 1.81).throttle, 0.7);
}

#[test]
fn front_row_drives_from_first_tick_after_start() {
    let step = delayed_start();
    let front = Drone::new(0);

    // Delay 0 is not strictly less than elapsed 0.
    assert_eq!(step.controls_for(&front, 0.0), Controls::neutral());
    assert_eq!(step.controls_for(&front, 0.01).throttle, 0.7);
}

#[test]
fn started_rows_obey_speed_cap() {
    let step = delayed_start();
    let fast = with_speed(Drone::new(1), 700.0);
    let slow = with_speed(Drone::new(1), 300.0);

    assert_eq!(step.controls_for(&fast, 2.0).throttle, 0.0);
    assert_eq!(step.controls_for(&slow, 2.0).throttle, 0.7);
    assert!(!step.controls_for(&slow, 2.0).jump);
}

#[test]
fn delayed_start_finishes_only_after_duration() {
    let mut step = delayed_start();
    let drones = roster();

    // Start at 10 s match time; elapsed is measured from there.
    let mid = step.perform(&packet_at(12.0), &drones, 10.0);
    assert!(!mid.finished);
    let controls = mid.controls.expect("per-drone controls");
    assert_eq!(controls.len(), NUM_BOTS);
    assert_eq!(controls[0].throttle, 0.7);
    assert_eq!(controls[12].throttle, 0.0, "row 3 has not started at 2.0 s");

    assert!(!step.perform(&packet_at(13.5), &drones, 10.0).finished);
    assert!(step.perform(&packet_at(13.75), &drones, 10.0).finished);
}

#[test]
fn delayed_start_finish_ignores_speeds() {
    let mut step = delayed_start();
    let drones: Vec<Drone> = roster().into_iter().map(|d| with_speed(d, 0.0)).collect();
    assert!(step.perform(&packet_at(4.0), &drones, 0.0).finished);
}

// ── Interweave ─────────────────────────────────────────────────────

#[test]
fn even_drone_jumps_in_first_slot_only_while_held() {
    let step = interweave();
    assert!(step.jumping(0, 0.02));
    assert!(!step.jumping(0, 0.10));
    assert!(!step.jumping(0, 0.68));
    assert!(step.jumping(0, 1.32));
}

#[test]
fn odd_drone_jumps_in_second_slot() {
    let step = interweave();
    assert!(step.jumping(1, 0.68));
    assert!(!step.jumping(1, 0.02));
    assert!(!step.jumping(1, 0.75));
    assert!(step.jumping(1, 1.97));
}

#[test]
fn window_edges_are_exclusive() {
    let step = interweave();
    assert!(!step.jumping(0, 0.0), "slot opening itself does not jump");
    assert!(!step.jumping(1, 0.65));
    assert!(step.jumping(1, 0.651));
    assert!(!step.jumping(1, 0.7001));
}

#[test]
fn no_jumps_after_last_slot() {
    let step = interweave();
    // Slot 7 would belong to odd drones but there are only 7 slots (0..7).
    assert!(!step.jumping(1, 4.57));
    assert!(!step.jumping(0, 5.22));
}

#[test]
fn interweave_keeps_governing_speed() {
    let step = interweave();
    let fast = with_speed(Drone::new(2), 700.0);
    let slow = with_speed(Drone::new(2), 300.0);

    let c = step.controls_for(&fast, 0.02);
    assert_eq!(c.throttle, 0.0);
    assert!(c.jump);
    assert_eq!(step.controls_for(&slow, 0.3).throttle, 0.7);
}

#[test]
fn interweave_finishes_after_eight_buffers() {
    let mut step = interweave();
    let drones = roster();
    assert!((step.duration() - 5.2).abs() < 1e-6);
    assert!(!step.perform(&packet_at(5.1), &drones, 0.0).finished);
    assert!(step.perform(&packet_at(5.25), &drones, 0.0).finished);
}

/// Sample the step at 120 Hz from start to finish and count rising edges.
#[test]
fn even_drones_pulse_four_times_odd_three() {
    let mut step = interweave();
    let drones = roster();
    let mut pulses = vec![0u32; NUM_BOTS];
    let mut held = vec![false; NUM_BOTS];

    let mut tick = 0u32;
    loop {
        let t = tick as f32 / 120.0;
        let result = step.perform(&packet_at(t), &drones, 0.0);
        for (i, ctrl) in result.controls.expect("per-drone controls").iter().enumerate() {
            if ctrl.jump && !held[i] {
                pulses[i] += 1;
            }
            held[i] = ctrl.jump;
        }
        if result.finished {
            break;
        }
        tick += 1;
        assert!(tick < 10_000, "interweave never finished");
    }

    for (i, count) in pulses.iter().enumerate() {
        let expected = if i % 2 == 0 { 4 } else { 3 };
        assert_eq!(*count, expected, "drone {i} pulsed {count} times");
    }
}

#[test]
fn interweave_has_no_memory_between_ticks() {
    let mut step = interweave();
    let drones = roster();
    let first = step.perform(&packet_at(0.02), &drones, 0.0);
    let again = step.perform(&packet_at(0.02), &drones, 0.0);
    assert_eq!(first, again);
}
