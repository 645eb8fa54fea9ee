//! Behavior tests for the throttled evaluation loop


use face_rig::driver::{DriverConfig, FaceRigDriver};
use face_rig::landmarks::topology;
use face_rig::table::default_table;
use std::time::Duration;
use test_helpers::{frame_with, neutral_frame, unrefined_frame, FlakySink, RecordingSink};

fn unthrottled() -> DriverConfig {
    DriverConfig {
        send_interval: Duration::ZERO,
        ..DriverConfig::default()
    }
}

#[test]
fn test_first_pass_positions_every_servo() {
    let sink = RecordingSink::default();
    let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

    // 14 servo commands plus the initial jaw state
    assert_eq!(driver.process_frame(&neutral_frame()), 15);

    let commands = sink.commands();
    assert!(commands.contains(&"servo_debug:5,70".to_string()));
    assert!(commands.contains(&"servo_debug:2,118".to_string()));
    assert!(commands.contains(&"slave_debug:8,80".to_string()));
    assert!(commands.contains(&"jaw_close".to_string()));
}

#[test]
fn test_unchanged_face_is_silent() {
    let sink = RecordingSink::default();
    let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

    driver.process_frame(&neutral_frame());
    sink.clear();

    assert_eq!(driver.process_frame(&neutral_frame()), 0);
    assert_eq!(driver.process_frame(&neutral_frame()), 0);
    assert!(sink.commands().is_empty());
}

#[test]
fn test_single_feature_change_emits_single_command() {
    let sink = RecordingSink::default();
    let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

    driver.process_frame(&neutral_frame());
    sink.clear();

    // Only the lips move; no table entry references them, so only the jaw fires
    let open_jaw = frame_with(&[(topology::LOWER_LIP, 0.5, 0.58)]);
    assert_eq!(driver.process_frame(&open_jaw), 1);
    assert_eq!(sink.commands(), vec!["jaw_open".to_string()]);

    // Same jaw state again: suppressed
    sink.clear();
    assert_eq!(driver.process_frame(&open_jaw), 0);

    // Closing transitions back
    assert_eq!(driver.process_frame(&neutral_frame()), 1);
    assert_eq!(sink.commands(), vec!["jaw_close".to_string()]);
}

#[test]
fn test_throttle_drops_frames_inside_interval() {
    let sink = RecordingSink::default();
    let config = DriverConfig {
        send_interval: Duration::from_millis(40),
        ..DriverConfig::default()
    };
    let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), config).unwrap();

    assert!(driver.process_frame(&neutral_frame()) > 0);

    // Inside the interval even a changed face is dropped whole
    let open_jaw = frame_with(&[(topology::LOWER_LIP, 0.5, 0.58)]);
    assert_eq!(driver.process_frame(&open_jaw), 0);

    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(driver.process_frame(&open_jaw), 1);
}

#[test]
fn test_unrefined_mesh_skips_iris_servos() {
    let sink = RecordingSink::default();
    let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

    // Without iris points the two eyeball servos (pins 2 and 3) are skipped
    assert_eq!(driver.process_frame(&unrefined_frame()), 13);

    let commands = sink.commands();
    assert!(!commands.iter().any(|c| c.starts_with("servo_debug:2,")));
    assert!(!commands.iter().any(|c| c.starts_with("servo_debug:3,")));
    assert!(commands.contains(&"servo_debug:5,70".to_string()));
}

#[test]
fn test_failed_sends_are_retried_on_next_pass() {
    let sink = FlakySink::default();
    let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

    sink.set_failing(true);
    assert_eq!(driver.process_frame(&neutral_frame()), 0);
    assert!(sink.commands().is_empty());

    // The cache was not updated, so the same face re-emits everything
    sink.set_failing(false);
    assert_eq!(driver.process_frame(&neutral_frame()), 15);
}

#[test]
fn test_reset_forgets_cached_state() {
    let sink = RecordingSink::default();
    let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

    driver.process_frame(&neutral_frame());
    driver.reset().unwrap();
    sink.clear();

    // After a reset the rig is in an unknown pose; everything is re-sent
    assert_eq!(driver.process_frame(&neutral_frame()), 15);
}

#[test]
fn test_filtered_driver_converges_to_same_angles() {
    let raw = RecordingSink::default();
    let mut unfiltered = FaceRigDriver::new(default_table(), Box::new(raw.clone()), unthrottled()).unwrap();

    let smoothed = RecordingSink::default();
    let mut filtered = FaceRigDriver::with_filters(default_table(), Box::new(smoothed.clone()), unthrottled(), || {
        face_rig::filters::create_filter("exponential")
    })
    .unwrap();

    // Feed a steady face long enough for the exponential filter to settle
    let frame = frame_with(&[(topology::LEFT_EYEBROW, 0.5, 0.477), (topology::MIDDLE_EYEBROW, 0.5, 0.5)]);
    unfiltered.process_frame(&frame);
    for _ in 0..50 {
        filtered.process_frame(&frame);
    }

    let final_raw: Vec<_> = raw.commands();
    let last_smoothed = smoothed
        .commands()
        .iter()
        .rev()
        .find(|c| c.starts_with("servo_debug:5,"))
        .cloned()
        .unwrap();
    assert!(final_raw.contains(&last_smoothed));
}
