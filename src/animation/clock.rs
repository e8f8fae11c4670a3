use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared animation clock.
///
/// The clock can either follow the monotonic system clock, or be pinned to explicit times by the
/// host (for example from frame callbacks, or in tests). On top of the underlying time it keeps an
/// adjusted time which passes at a configurable rate, used to slow animations down.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct Clock {
    inner: Rc<RefCell<AdjustableClock>>,
}

#[derive(Debug)]
struct AdjustableClock {
    source: TimeSource,
    /// Adjusted time as of the last update.
    current_time: Duration,
    /// Unadjusted time as of the last update.
    last_seen_time: Duration,
    rate: f64,
    complete_instantly: bool,
}

#[derive(Debug)]
enum TimeSource {
    Monotonic(Instant),
    Manual(Duration),
}

impl Clock {
    /// Creates a clock following the monotonic system clock, starting at zero.
    pub fn new() -> Self {
        Self::from_source(TimeSource::Monotonic(Instant::now()), Duration::ZERO)
    }

    /// Creates a clock pinned at `time`.
    pub fn with_time(time: Duration) -> Self {
        Self::from_source(TimeSource::Manual(time), time)
    }

    fn from_source(source: TimeSource, time: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AdjustableClock {
                source,
                current_time: time,
                last_seen_time: time,
                rate: 1.,
                complete_instantly: false,
            })),
        }
    }

    /// Returns the adjusted time.
    pub fn now(&self) -> Duration {
        self.inner.borrow_mut().now()
    }

    /// Returns the underlying time, ignoring the rate.
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow().source.now()
    }

    /// Pins the clock to `time`.
    ///
    /// Time cannot go backwards; earlier values leave the clock as is.
    pub fn set_unadjusted(&self, time: Duration) {
        let mut inner = self.inner.borrow_mut();
        inner.now();
        inner.source = TimeSource::Manual(time.max(inner.last_seen_time));
    }

    /// Moves a pinned clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let time = self.now_unadjusted() + delta;
        self.set_unadjusted(time);
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    pub fn set_rate(&self, rate: f64) {
        let mut inner = self.inner.borrow_mut();
        // Account for the time passed at the previous rate.
        inner.now();
        inner.rate = rate.clamp(0., 1000.);
    }

    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }

    /// Applies the rate and instant completion from the animation config.
    pub fn apply_config(&self, config: &sidemenu_config::Animations) {
        match config.rate() {
            Some(rate) => {
                self.set_complete_instantly(false);
                self.set_rate(rate);
            }
            None => {
                self.set_complete_instantly(true);
                self.set_rate(1.);
            }
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

impl TimeSource {
    fn now(&self) -> Duration {
        match self {
            TimeSource::Monotonic(start) => start.elapsed(),
            TimeSource::Manual(time) => *time,
        }
    }
}

impl AdjustableClock {
    fn now(&mut self) -> Duration {
        let time = self.source.now();
        if time <= self.last_seen_time {
            return self.current_time;
        }

        let delta = time - self.last_seen_time;
        self.current_time += if self.rate == 1. {
            delta
        } else {
            delta.mul_f64(self.rate)
        };
        self.last_seen_time = time;
        self.current_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = Clock::with_time(Duration::ZERO);
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(100));
        assert_eq!(clock.now_unadjusted(), Duration::from_millis(100));
    }

    #[test]
    fn rate_slows_adjusted_time() {
        let clock = Clock::with_time(Duration::ZERO);
        clock.set_rate(0.5);
        clock.advance(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(50));
        assert_eq!(clock.now_unadjusted(), Duration::from_millis(100));

        // Time passed before a rate change keeps the old rate.
        clock.set_rate(1.);
        clock.advance(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(150));
    }

    #[test]
    fn time_does_not_go_backwards() {
        let clock = Clock::with_time(Duration::from_secs(1));
        clock.set_unadjusted(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn clones_share_state() {
        let clock = Clock::with_time(Duration::ZERO);
        let clone = clock.clone();
        clone.advance(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(clock, clone);
        assert_ne!(clock, Clock::with_time(Duration::ZERO));
    }

    #[test]
    fn config_off_completes_instantly() {
        let clock = Clock::with_time(Duration::ZERO);
        let config = sidemenu_config::Animations {
            off: true,
            ..Default::default()
        };
        clock.apply_config(&config);
        assert!(clock.should_complete_instantly());

        clock.apply_config(&Default::default());
        assert!(!clock.should_complete_instantly());
        assert_eq!(clock.rate(), 1.);
    }
}
