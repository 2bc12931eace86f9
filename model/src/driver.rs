use geom::{Duration, Time};

use crate::{Frame, RouteAnimator, Tick};

/// Whatever shows the sleigh and the progress bar. Implementations without anywhere to draw just
/// ignore the calls.
pub trait Sink {
    fn render(&mut self, frame: &Frame);

    /// The route has too few stops to ever move
    fn no_movement(&mut self) {}
}

impl Sink for () {
    fn render(&mut self, _: &Frame) {}
}

impl Sink for Vec<Frame> {
    fn render(&mut self, frame: &Frame) {
        self.push(frame.clone());
    }
}

/// Owns the animator and a clock, and forwards each tick's output to a sink. The caller decides
/// when ticks happen.
pub struct Driver {
    animator: RouteAnimator,
    clock: Time,
}

impl Driver {
    pub fn new(animator: RouteAnimator) -> Self {
        Self {
            animator,
            clock: Time::START_OF_DAY,
        }
    }

    /// Moves the clock forward by the real time since the last update, then ticks.
    pub fn step(&mut self, dt: Duration, sink: &mut dyn Sink) -> Tick {
        self.clock += dt;
        self.tick(sink)
    }

    /// Ticks once per timestamp until the animator stops. Returns the number of frames rendered.
    pub fn run<I: IntoIterator<Item = Time>>(&mut self, timestamps: I, sink: &mut dyn Sink) -> usize {
        let mut frames = 0;
        for time in timestamps {
            self.clock = time;
            match self.tick(sink) {
                Tick::Frame(_) => {
                    frames += 1;
                }
                Tick::Reset => {}
                Tick::Stopped | Tick::NoMovement => {
                    break;
                }
            }
        }
        frames
    }

    fn tick(&mut self, sink: &mut dyn Sink) -> Tick {
        let tick = self.animator.advance(self.clock);
        match tick {
            Tick::Frame(ref frame) => sink.render(frame),
            Tick::NoMovement => sink.no_movement(),
            Tick::Stopped | Tick::Reset => {}
        }
        tick
    }

    /// True if more ticks should be scheduled
    pub fn is_running(&self) -> bool {
        self.animator.is_looping() && self.animator.route().can_animate()
    }

    pub fn clock(&self) -> Time {
        self.clock
    }

    pub fn animator(&self) -> &RouteAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut RouteAnimator {
        &mut self.animator
    }
}
