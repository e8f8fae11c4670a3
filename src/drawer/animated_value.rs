//! Values that can be static, animating, or following a drag.

use super::gesture::DragSession;
use crate::animation::Animation;

#[derive(Debug)]
pub enum AnimatedValue {
    /// The value is static.
    Static(f64),
    /// The value is animating toward a target.
    Animation(Animation),
    /// The value is controlled by an ongoing drag.
    Gesture(DragSession),
}

impl AnimatedValue {
    pub fn new(value: f64) -> Self {
        Self::Static(value)
    }

    /// Returns the current value.
    pub fn current(&self) -> f64 {
        match self {
            AnimatedValue::Static(value) => *value,
            AnimatedValue::Animation(anim) => anim.value(),
            AnimatedValue::Gesture(session) => session.current_x,
        }
    }

    /// Returns the value this will settle at if left alone.
    pub fn target(&self) -> f64 {
        match self {
            AnimatedValue::Static(value) => *value,
            AnimatedValue::Animation(anim) => anim.to(),
            // This can be used for example if a gesture is interrupted.
            AnimatedValue::Gesture(session) => session.current_x,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    pub fn is_gesture(&self) -> bool {
        matches!(self, Self::Gesture(_))
    }

    pub fn gesture(&self) -> Option<&DragSession> {
        match self {
            AnimatedValue::Gesture(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_animation_ongoing(&self) -> bool {
        match self {
            AnimatedValue::Animation(anim) => !anim.is_done(),
            _ => false,
        }
    }

    /// Replaces a finished animation with its final value.
    pub fn advance(&mut self) {
        if let AnimatedValue::Animation(anim) = self {
            if anim.is_done() {
                *self = AnimatedValue::Static(anim.to());
            }
        }
    }

    /// Cancels the ongoing gesture, keeping the current value.
    pub fn cancel_gesture(&mut self) {
        if let AnimatedValue::Gesture(session) = self {
            *self = AnimatedValue::Static(session.current_x);
        }
    }
}

/// Value that is static or animating, but never driven by a gesture directly.
#[derive(Debug)]
pub enum FadeValue {
    Static(f64),
    Animation(Animation),
}

impl FadeValue {
    pub fn new(value: f64) -> Self {
        Self::Static(value)
    }

    pub fn current(&self) -> f64 {
        match self {
            FadeValue::Static(value) => *value,
            FadeValue::Animation(anim) => anim.value(),
        }
    }

    pub fn is_animation_ongoing(&self) -> bool {
        match self {
            FadeValue::Animation(anim) => !anim.is_done(),
            FadeValue::Static(_) => false,
        }
    }

    /// Replaces a finished animation with its final value.
    pub fn advance(&mut self) {
        if let FadeValue::Animation(anim) = self {
            if anim.is_done() {
                *self = FadeValue::Static(anim.to());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::Clock;
    use crate::drawer::gesture::{DragSource, GeometrySnapshot};
    use crate::utils::geometry::{Rectangle, Size};

    #[test]
    fn static_value() {
        let v = AnimatedValue::new(42.0);
        assert!(v.is_static());
        assert!(!v.is_gesture());
        assert!(!v.is_animation_ongoing());
        assert_eq!(v.current(), 42.0);
        assert_eq!(v.target(), 42.0);
    }

    #[test]
    fn finished_animation_becomes_static() {
        let clock = Clock::with_time(Duration::ZERO);
        let config = sidemenu_config::FrontMovementAnim::default().0;
        let mut v = AnimatedValue::Animation(Animation::new(clock.clone(), 0., 320., config));
        assert!(v.is_animation_ongoing());
        assert_eq!(v.target(), 320.);

        v.advance();
        assert!(!v.is_static());

        clock.advance(Duration::from_millis(350));
        assert!(!v.is_animation_ongoing());
        v.advance();
        assert!(v.is_static());
        assert_eq!(v.current(), 320.);
    }

    #[test]
    fn cancel_gesture_keeps_position() {
        let snapshot = GeometrySnapshot {
            frame: Rectangle::from_size(Size::from((400., 800.))),
        };
        let mut v = AnimatedValue::Gesture(DragSession {
            source: DragSource::FrontPage,
            snapshot,
            current_x: 120.,
        });
        assert!(v.is_gesture());

        v.cancel_gesture();
        assert!(v.is_static());
        assert_eq!(v.current(), 120.);
    }

    #[test]
    fn fade_settles_on_target() {
        let clock = Clock::with_time(Duration::ZERO);
        let config = sidemenu_config::DimFadeAnim::default().0;
        let mut v = FadeValue::Animation(Animation::new(clock.clone(), 1., 0., config));
        assert!(v.is_animation_ongoing());

        clock.advance(Duration::from_millis(200));
        v.advance();
        assert!(matches!(v, FadeValue::Static(_)));
        assert_eq!(v.current(), 0.);
    }
}
