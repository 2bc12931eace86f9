#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod animator;
mod config;
mod driver;

use geom::{Duration, Time};

pub use self::animator::{completion_fraction, Frame, RouteAnimator, Tick, TripProgress};
pub use self::config::{AnimatorConfig, DEFAULT_ORIGIN_CITY, DEFAULT_ORIGIN_LABEL};
pub use self::driver::{Driver, Sink};

/// Converts a browser-style timestamp (milliseconds since some epoch) into a `Time`. Negative
/// values clamp to the epoch.
pub fn time_from_millis(ms: f64) -> Time {
    Time::START_OF_DAY + Duration::seconds(ms.max(0.0) / 1000.0)
}
