//! Time-based eased animations.

use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

mod clock;

pub use self::clock::Clock;

#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    /// Whether the animation should complete as soon as it starts.
    is_off: bool,
    start_time: Duration,
    curve: Curve,
    clock: Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, config: sidemenu_config::Animation) -> Self {
        let is_off = config.off || clock.should_complete_instantly();
        let start_time = clock.now();

        Self {
            from,
            to,
            duration: Duration::from_millis(u64::from(config.duration_ms)),
            is_off,
            start_time,
            curve: Curve::from(config.curve),
            clock,
        }
    }

    /// Returns an animation with the same timing parameters, starting now.
    pub fn restarted(&self, from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            start_time: self.clock.now(),
            clock: self.clock.clone(),
            ..*self
        }
    }

    pub fn is_done(&self) -> bool {
        if self.is_off {
            return true;
        }

        self.clock.now() >= self.end_time()
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);
        let x = passed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.curve.y(x.clamp(0., 1.))
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    pub fn end_time(&self) -> Duration {
        self.start_time + self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}

impl From<sidemenu_config::Curve> for Curve {
    fn from(value: sidemenu_config::Curve) -> Self {
        match value {
            sidemenu_config::Curve::Linear => Curve::Linear,
            sidemenu_config::Curve::EaseOutQuad => Curve::EaseOutQuad,
            sidemenu_config::Curve::EaseOutCubic => Curve::EaseOutCubic,
            sidemenu_config::Curve::EaseOutExpo => Curve::EaseOutExpo,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn config(duration_ms: u32, curve: sidemenu_config::Curve) -> sidemenu_config::Animation {
        sidemenu_config::Animation {
            off: false,
            duration_ms,
            curve,
        }
    }

    #[test]
    fn linear_progress() {
        let clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(
            clock.clone(),
            0.,
            100.,
            config(200, sidemenu_config::Curve::Linear),
        );
        assert!(!anim.is_done());
        assert_eq!(anim.value(), 0.);

        clock.advance(Duration::from_millis(50));
        assert_abs_diff_eq!(anim.value(), 25., epsilon = 1e-9);

        clock.advance(Duration::from_millis(150));
        assert!(anim.is_done());
        assert_eq!(anim.value(), 100.);
    }

    #[test]
    fn ease_out_is_ahead_of_linear() {
        let clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(
            clock.clone(),
            0.,
            1.,
            config(350, sidemenu_config::Curve::EaseOutQuad),
        );

        clock.advance(Duration::from_millis(175));
        let value = anim.value();
        assert!(value > 0.5 && value < 1., "{value}");
    }

    #[test]
    fn off_completes_instantly() {
        let clock = Clock::with_time(Duration::ZERO);
        let mut config = config(350, sidemenu_config::Curve::EaseOutQuad);
        config.off = true;

        let anim = Animation::new(clock.clone(), 0., 10., config);
        assert!(anim.is_done());
        assert_eq!(anim.value(), 10.);
    }

    #[test]
    fn clock_instant_completion() {
        let clock = Clock::with_time(Duration::ZERO);
        clock.set_complete_instantly(true);

        let anim = Animation::new(
            clock,
            0.,
            10.,
            config(350, sidemenu_config::Curve::Linear),
        );
        assert!(anim.is_done());
    }

    #[test]
    fn zero_duration_is_done() {
        let clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(
            clock,
            5.,
            10.,
            config(0, sidemenu_config::Curve::Linear),
        );
        assert!(anim.is_done());
        assert_eq!(anim.value(), 10.);
    }

    #[test]
    fn restarted_keeps_timing() {
        let clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(
            clock.clone(),
            0.,
            10.,
            config(100, sidemenu_config::Curve::Linear),
        );

        clock.advance(Duration::from_millis(60));
        let restarted = anim.restarted(anim.value(), 0.);
        assert_eq!(restarted.start_time(), Duration::from_millis(60));
        assert_eq!(restarted.duration(), Duration::from_millis(100));
        assert_abs_diff_eq!(restarted.from(), 6., epsilon = 1e-9);
    }

    #[test]
    fn curves_hit_endpoints() {
        for curve in [
            Curve::Linear,
            Curve::EaseOutQuad,
            Curve::EaseOutCubic,
        ] {
            assert_abs_diff_eq!(curve.y(0.), 0., epsilon = 1e-9);
            assert_abs_diff_eq!(curve.y(1.), 1., epsilon = 1e-9);
        }
        assert_abs_diff_eq!(Curve::EaseOutExpo.y(1.), 1., epsilon = 1e-3);
    }
}
