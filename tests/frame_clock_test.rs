use boat_scene::flow::FrameClock;
use instant::{Duration, Instant};

use crate::common::test_utils::assert_close;

mod common;

#[test]
fn reports_milliseconds_between_frames() {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);

    assert_close(clock.advance_to(start + Duration::from_millis(16)), 16.0);
    assert_close(clock.advance_to(start + Duration::from_millis(50)), 34.0);
}

#[test]
fn first_frame_at_start_is_zero() {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);

    assert_close(clock.advance_to(start), 0.0);
}

#[test]
fn earlier_timestamp_counts_as_no_time() {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start + Duration::from_millis(100));

    assert_close(clock.advance_to(start), 0.0);
    // The earlier timestamp becomes the new reference.
    assert_close(clock.advance_to(start + Duration::from_millis(10)), 10.0);
}

#[test]
fn wall_clock_never_goes_backwards() {
    let mut clock = FrameClock::new();
    assert!(clock.advance() >= 0.0);
    assert!(clock.advance() >= 0.0);
}
