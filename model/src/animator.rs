use geom::{Duration, Time};
use route::{Position, Route, Waypoint};

use crate::AnimatorConfig;

/// Where the sleigh is along the route. Only the animator that owns it changes it.
#[derive(Clone, Debug, PartialEq)]
pub struct TripProgress {
    /// Index of the leg being flown; the leg goes from stop `segment` to stop `segment + 1`
    pub segment: usize,
    /// Set by the first tick on a leg
    pub segment_start: Option<Time>,
    pub looping: bool,
}

impl TripProgress {
    fn new(looping: bool) -> Self {
        Self {
            segment: 0,
            segment_start: None,
            looping,
        }
    }

    fn restart_trip(&mut self) {
        self.segment = 0;
        self.segment_start = None;
    }
}

/// The result of one tick
#[derive(Clone, Debug, PartialEq)]
pub enum Tick {
    /// Looping was switched off. Nothing more should be scheduled.
    Stopped,
    /// The route has fewer than 2 stops.
    NoMovement,
    /// The last leg just finished and the trip went back to the first stop. Nothing to draw.
    Reset,
    Frame(Frame),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub position: Position,
    pub segment: usize,
    /// How much of the current leg is done, in [0, 1]
    pub segment_fraction: f64,
    /// How much of the whole trip is done, in [0, 100]
    pub progress_percent: f64,
    pub message: String,
}

impl Frame {
    pub fn completion_label(&self) -> String {
        format!("Route Completion: {}%", self.progress_percent.round())
    }

    pub fn summary(&self) -> String {
        format!("{}\n{}", self.message, self.completion_label())
    }
}

pub struct RouteAnimator {
    route: Route,
    config: AnimatorConfig,
    progress: TripProgress,
}

impl RouteAnimator {
    pub fn new(route: Route, config: AnimatorConfig) -> Self {
        let progress = TripProgress::new(config.looping);
        Self {
            route,
            config,
            progress,
        }
    }

    /// Called once per tick with a non-decreasing timestamp.
    pub fn advance(&mut self, now: Time) -> Tick {
        if !self.progress.looping {
            return Tick::Stopped;
        }
        if !self.route.can_animate() {
            return Tick::NoMovement;
        }

        let idx = self.progress.segment;
        let (from, to) = match (self.route.get(idx), self.route.get(idx + 1)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                debug!("Finished all {} legs, starting over", self.route.num_segments());
                self.progress.restart_trip();
                return Tick::Reset;
            }
        };

        let start = *self.progress.segment_start.get_or_insert(now);
        let elapsed = now - start;
        let fraction = completion_fraction(elapsed, self.config.segment_duration);

        let frame = Frame {
            position: from.position().lerp(to.position(), fraction),
            segment: idx,
            segment_fraction: fraction,
            progress_percent: (idx as f64 + fraction) / (self.route.len() - 1) as f64 * 100.0,
            message: describe_leg(&self.config, from, to),
        };

        // The finished leg is drawn at 100% once; the next tick starts the next leg from zero.
        if elapsed >= self.config.segment_duration {
            self.progress.segment += 1;
            self.progress.segment_start = None;
        }

        Tick::Frame(frame)
    }

    /// Stops the loop. The sleigh stays wherever the last frame put it.
    pub fn stop(&mut self) {
        self.progress.looping = false;
    }

    /// Starts looping again. The current leg restarts from its beginning.
    pub fn resume(&mut self) {
        if !self.progress.looping {
            self.progress.looping = true;
            self.progress.segment_start = None;
        }
    }

    pub fn is_looping(&self) -> bool {
        self.progress.looping
    }

    pub fn progress(&self) -> &TripProgress {
        &self.progress
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }
}

/// Clamped to [0, 1], so a late tick never overshoots the end of the leg.
pub fn completion_fraction(elapsed: Duration, duration: Duration) -> f64 {
    if duration <= Duration::ZERO {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

fn describe_leg(config: &AnimatorConfig, from: &Waypoint, to: &Waypoint) -> String {
    if from.city == config.origin_city {
        format!(
            "🚀 DEPARTING {} ➔ Delivering to {} in {}",
            config.origin_label, to.recipient, to.city
        )
    } else {
        format!(
            "🎁 Flying from {} ➔ {} in {}",
            from.city, to.recipient, to.city
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::time_from_millis;

    fn stop(city: &str, recipient: &str, lat: f64, lng: f64) -> Waypoint {
        Waypoint {
            city: city.to_string(),
            recipient: recipient.to_string(),
            lat,
            lng,
        }
    }

    fn two_stops() -> RouteAnimator {
        let route =
            Route::new(vec![stop("A", "a", 0.0, 0.0), stop("B", "b", 10.0, 10.0)]).unwrap();
        RouteAnimator::new(route, AnimatorConfig::default())
    }

    fn frame(tick: Tick) -> Frame {
        match tick {
            Tick::Frame(frame) => frame,
            x => panic!("expected a frame, got {:?}", x),
        }
    }

    #[test]
    fn fraction_is_clamped() {
        let duration = Duration::seconds(5.0);
        assert_eq!(completion_fraction(Duration::ZERO, duration), 0.0);
        assert_eq!(completion_fraction(Duration::seconds(2.5), duration), 0.5);
        assert_eq!(completion_fraction(Duration::seconds(5.0), duration), 1.0);
        assert_eq!(completion_fraction(Duration::hours(3), duration), 1.0);
        assert_eq!(completion_fraction(Duration::seconds(1.0), Duration::ZERO), 1.0);
    }

    #[test]
    fn never_overshoots_no_matter_how_late() {
        for late_ms in [5_000.0, 5_001.0, 60_000.0, 3_600_000.0] {
            let mut animator = two_stops();
            animator.advance(time_from_millis(0.0));
            let frame = frame(animator.advance(time_from_millis(late_ms)));
            assert!(frame.segment_fraction <= 1.0);
            assert_eq!(frame.position, Position::new(10.0, 10.0));
        }
    }

    #[test]
    fn same_timestamp_same_output() {
        let mut animator = two_stops();
        let t0 = time_from_millis(500.0);
        assert_eq!(animator.advance(t0), animator.advance(t0));

        let t1 = time_from_millis(3_000.0);
        assert_eq!(animator.advance(t1), animator.advance(t1));
    }

    #[test]
    fn first_tick_seeds_the_leg() {
        let mut animator = two_stops();
        let t0 = time_from_millis(12_345.0);
        assert_eq!(animator.progress().segment_start, None);
        let frame = frame(animator.advance(t0));
        assert_eq!(animator.progress().segment_start, Some(t0));
        assert_eq!(frame.segment_fraction, 0.0);
        assert_eq!(frame.position, Position::new(0.0, 0.0));
    }

    #[test]
    fn messages() {
        let route = Route::new(vec![
            stop("North Pole", "Elves", 90.0, 0.0),
            stop("Lagos", "Chidi", 6.5, 3.4),
            stop("Lima", "Rosa", -12.0, -77.0),
        ])
        .unwrap();
        let mut animator = RouteAnimator::new(route, AnimatorConfig::default());

        let first = frame(animator.advance(time_from_millis(0.0)));
        assert_eq!(
            first.message,
            "🚀 DEPARTING Santa's Workshop ➔ Delivering to Chidi in Lagos"
        );
        animator.advance(time_from_millis(5_000.0));

        let second = frame(animator.advance(time_from_millis(5_016.0)));
        assert_eq!(second.message, "🎁 Flying from Lagos ➔ Rosa in Lima");
        assert_eq!(
            second.summary(),
            "🎁 Flying from Lagos ➔ Rosa in Lima\nRoute Completion: 50%"
        );
    }

    #[test]
    fn configured_origin() {
        let route = Route::new(vec![
            stop("Rovaniemi", "Elves", 66.5, 25.7),
            stop("Oslo", "Ola", 59.9, 10.7),
        ])
        .unwrap();
        let config = AnimatorConfig::default().with_origin_city("Rovaniemi");
        let mut animator = RouteAnimator::new(route, config);
        let frame = frame(animator.advance(time_from_millis(0.0)));
        assert!(frame.message.starts_with("🚀 DEPARTING"));
    }

    #[test]
    fn stop_and_resume() {
        let mut animator = two_stops();
        animator.advance(time_from_millis(0.0));
        animator.advance(time_from_millis(1_000.0));

        animator.stop();
        assert!(!animator.is_looping());
        assert_eq!(animator.advance(time_from_millis(2_000.0)), Tick::Stopped);
        assert_eq!(animator.advance(time_from_millis(9_000.0)), Tick::Stopped);
        assert_eq!(animator.progress().segment, 0);

        animator.resume();
        let frame = frame(animator.advance(time_from_millis(20_000.0)));
        assert_eq!(frame.segment, 0);
        assert_eq!(frame.segment_fraction, 0.0);
        let later = self::frame(animator.advance(time_from_millis(21_000.0)));
        assert_abs_diff_eq!(later.segment_fraction, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn starts_stopped_when_configured() {
        let route = Route::new(vec![stop("A", "a", 0.0, 0.0), stop("B", "b", 1.0, 1.0)]).unwrap();
        let config = AnimatorConfig {
            looping: false,
            ..Default::default()
        };
        let mut animator = RouteAnimator::new(route, config);
        assert_eq!(animator.advance(time_from_millis(0.0)), Tick::Stopped);
    }

    #[test]
    fn custom_duration() {
        let route = Route::new(vec![stop("A", "a", 0.0, 0.0), stop("B", "b", 0.0, 8.0)]).unwrap();
        let config = AnimatorConfig::default().with_segment_secs(2.0).unwrap();
        let mut animator = RouteAnimator::new(route, config);
        animator.advance(time_from_millis(0.0));
        let frame = frame(animator.advance(time_from_millis(500.0)));
        assert_abs_diff_eq!(frame.position.lng, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(frame.progress_percent, 25.0, epsilon = 1e-4);
    }
}
