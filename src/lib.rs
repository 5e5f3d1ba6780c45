//! Server-rendered footer widgets: a live digital clock that links out to
//! NBA.com and a decorative rainbow arc motif that fades in after the first
//! paint.
//!
//! The widgets themselves are pure derivations (wall-clock time to display
//! state, fixed constants to arc geometry) plus a small owned lifecycle: the
//! clock owns one repeating ticker, the rainbow owns one cancellable
//! post-paint callback. The HTTP layer in [`server`] is only a host binding
//! over their current snapshots.

pub mod clock;
pub mod color_constants;
pub mod rainbow;
pub mod raster;
pub mod server;
pub mod test_utils;

pub use clock::{ClockState, ClockWidget, SystemClock, TimeSource};
pub use rainbow::{ArcGeometry, RainbowWidget};
