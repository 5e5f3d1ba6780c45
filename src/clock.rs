//! The digital clock widget: current local time as `HH:MM:SS` with colons
//! that blink in lock-step once per second, presented as a link to NBA.com.

use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::color_constants;

pub const CLOCK_HREF: &str = "https://www.nba.com";
pub const CLOCK_ARIA_LABEL: &str = "Visit NBA.com";

const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Source of wall-clock time. Production uses [`SystemClock`]; tests inject
/// a manually advanced clock so ticks are deterministic.
pub trait TimeSource: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// One snapshot of the clock face. A fresh snapshot replaces the previous
/// one on every tick; both colon separators read the same
/// `separator_visible` value, so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockState {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub separator_visible: bool,
}

impl ClockState {
    /// Derive the display state for `now`. Colons are visible on even
    /// seconds.
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            hours: now.hour(),
            minutes: now.minute(),
            seconds: now.second(),
            separator_visible: now.second() % 2 == 0,
        }
    }

    pub fn hh(&self) -> String {
        format!("{:02}", self.hours)
    }

    pub fn mm(&self) -> String {
        format!("{:02}", self.minutes)
    }

    pub fn ss(&self) -> String {
        format!("{:02}", self.seconds)
    }

    /// The full `HH:MM:SS` text. The colon glyphs are always part of the
    /// content; odd seconds only hide them visually.
    pub fn text(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }

    fn separator_visibility(&self) -> &'static str {
        if self.separator_visible {
            "visible"
        } else {
            "hidden"
        }
    }
}

#[derive(Template)]
#[template(path = "clock.html")]
struct ClockTemplate {
    href: &'static str,
    aria_label: &'static str,
    background: &'static str,
    text_color: &'static str,
    hh: String,
    mm: String,
    ss: String,
    colon_visibility: &'static str,
}

/// Render the anchor markup for one snapshot.
pub fn render_clock(state: &ClockState) -> String {
    let template = ClockTemplate {
        href: CLOCK_HREF,
        aria_label: CLOCK_ARIA_LABEL,
        background: color_constants::clock::BACKGROUND,
        text_color: color_constants::clock::TEXT,
        hh: state.hh(),
        mm: state.mm(),
        ss: state.ss(),
        colon_visibility: state.separator_visibility(),
    };

    template.render().unwrap_or_else(|e| {
        tracing::error!("Failed to render clock template: {}", e);
        format!("<a href=\"{}\">{}</a>", CLOCK_HREF, state.text())
    })
}

/// A mounted clock face. The initial snapshot is computed synchronously at
/// mount so there is never a blank first paint; after that a single ticker
/// task publishes a fresh snapshot every second until the widget is
/// unmounted.
pub struct ClockWidget {
    state: watch::Receiver<ClockState>,
    ticker: Option<JoinHandle<()>>,
}

impl ClockWidget {
    pub fn mount(time: Arc<dyn TimeSource>) -> Self {
        let (tx, rx) = watch::channel(ClockState::at(time.now()));

        let ticker = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + TICK_PERIOD;
            let mut ticks = tokio::time::interval_at(start, TICK_PERIOD);
            // A late tick is display lag, not an error; don't burst to
            // catch up.
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(ClockState::at(time.now())).is_err() {
                    break;
                }
            }
        });

        tracing::info!("Clock widget mounted");
        Self {
            state: rx,
            ticker: Some(ticker),
        }
    }

    /// The snapshot published by the most recent tick.
    pub fn snapshot(&self) -> ClockState {
        *self.state.borrow()
    }

    /// A receiver that observes every published snapshot.
    pub fn watch(&self) -> watch::Receiver<ClockState> {
        self.state.clone()
    }

    /// Wait for the next tick to publish a snapshot.
    pub async fn updated(&self) {
        let mut rx = self.state.clone();
        rx.borrow_and_update();
        let _ = rx.changed().await;
    }

    /// Render the anchor markup from the current snapshot.
    pub fn render(&self) -> String {
        render_clock(&self.snapshot())
    }

    /// Cancel the ticker. Once this returns the ticker task has terminated
    /// and no further snapshot can be published.
    pub async fn unmount(mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            let _ = ticker.await;
        }
        tracing::info!("Clock widget unmounted");
    }
}

impl Drop for ClockWidget {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}
