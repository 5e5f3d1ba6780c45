//! Lifecycle tests for the mounted clock widget.
//!
//! Tokio's paused clock stands in for fake timers: the widget's ticker fires
//! when the test runtime advances, and a manually advanced wall clock keeps
//! the displayed time deterministic.

use std::sync::Arc;
use std::time::Duration;

use footer_widgets::clock::ClockWidget;
use footer_widgets::test_utils::ManualClock;

#[tokio::test(start_paused = true)]
async fn initial_snapshot_is_available_synchronously() {
    let time = Arc::new(ManualClock::at_hms(2026, 1, 1, 5, 7, 9));
    let widget = ClockWidget::mount(time);

    let state = widget.snapshot();
    assert_eq!(state.text(), "05:07:09");
    assert!(!state.separator_visible, "9 is odd, separators hidden");

    widget.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn one_tick_advances_seconds_and_flips_the_separator() {
    let time = Arc::new(ManualClock::at_hms(2026, 1, 1, 5, 7, 9));
    let widget = ClockWidget::mount(Arc::clone(&time));
    assert_eq!(widget.snapshot().text(), "05:07:09");

    time.advance_secs(1);
    widget.updated().await;

    let state = widget.snapshot();
    assert_eq!(state.text(), "05:07:10");
    assert!(state.separator_visible, "10 is even, separators visible");

    widget.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn ticks_carry_into_minutes_and_hours() {
    let time = Arc::new(ManualClock::at_hms(2026, 1, 1, 23, 59, 59));
    let widget = ClockWidget::mount(Arc::clone(&time));

    time.advance_secs(1);
    widget.updated().await;

    let state = widget.snapshot();
    assert_eq!(state.text(), "00:00:00");
    assert!(state.separator_visible);

    widget.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn consecutive_ticks_alternate_separator_visibility() {
    let time = Arc::new(ManualClock::at_hms(2026, 1, 1, 12, 0, 0));
    let widget = ClockWidget::mount(Arc::clone(&time));
    assert!(widget.snapshot().separator_visible);

    for expected in ["12:00:01", "12:00:02", "12:00:03"] {
        time.advance_secs(1);
        widget.updated().await;

        let state = widget.snapshot();
        assert_eq!(state.text(), expected);
        assert_eq!(state.separator_visible, state.seconds % 2 == 0);
    }

    widget.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_publishing() {
    let time = Arc::new(ManualClock::at_hms(2026, 1, 1, 5, 7, 9));
    let widget = ClockWidget::mount(Arc::clone(&time));
    let rx = widget.watch();

    widget.unmount().await;

    time.advance_secs(5);
    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;

    assert_eq!(rx.borrow().text(), "05:07:09");
}

#[tokio::test(start_paused = true)]
async fn rendered_markup_follows_the_blink_cycle() {
    let time = Arc::new(ManualClock::at_hms(2026, 1, 1, 5, 7, 9));
    let widget = ClockWidget::mount(Arc::clone(&time));

    let html = widget.render();
    assert!(html.contains(">05<span"));
    assert!(html.contains(":</span>07<span"));
    assert!(html.contains(":</span>09</a>"));
    assert_eq!(html.matches("visibility: hidden").count(), 2);

    time.advance_secs(1);
    widget.updated().await;

    let html = widget.render();
    assert!(html.contains(":</span>10</a>"));
    assert_eq!(html.matches("visibility: visible").count(), 2);

    widget.unmount().await;
}
