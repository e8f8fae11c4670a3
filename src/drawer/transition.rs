//! Moving the front panel and the dim overlay to their resting positions.

use tracing::debug;

use super::animated_value::{AnimatedValue, FadeValue};
use super::{DrawerController, DrawerState, Page};
use crate::animation::Animation;
use crate::utils::geometry::{Point, Rectangle};

impl<P: Page> DrawerController<P> {
    /// Shows or hides the menu.
    ///
    /// An ongoing drag is dropped; its remaining events are ignored.
    pub fn toggle(&mut self, open: bool, animated: bool) {
        if self.front_x.is_gesture() {
            debug!("toggle during a drag, dropping the drag");
            self.front_x.cancel_gesture();
        }

        self.apply(open, animated);
    }

    /// Front panel position when resting in `state`.
    pub fn resting_x(&self, state: DrawerState) -> f64 {
        match state {
            DrawerState::Closed => 0.,
            DrawerState::Open => self.options.drawer.open_offset(self.view_size.w),
        }
    }

    /// Front panel frame when resting in `state`.
    pub fn resting_frame(&self, state: DrawerState) -> Rectangle {
        Rectangle::new(Point::from((self.resting_x(state), 0.)), self.view_size)
    }

    /// Sets the state and moves the front panel and dim overlay to match it.
    ///
    /// Animations in progress are replaced, starting from their current values.
    pub(super) fn apply(&mut self, open: bool, animated: bool) {
        let state = if open {
            DrawerState::Open
        } else {
            DrawerState::Closed
        };
        if self.state != state {
            debug!("drawer {:?}: {:?} -> {state:?}", self.id, self.state);
        }
        self.state = state;

        let target_x = self.resting_x(state);
        let target_opacity = if open { 1. } else { 0. };

        if !animated {
            self.front_x = AnimatedValue::Static(target_x);
            self.dim_opacity = FadeValue::Static(target_opacity);
            return;
        }

        self.animate_front_to(target_x);

        let animations = &self.options.animations;
        let from = self.dim_opacity.current();
        self.dim_opacity = FadeValue::Animation(Animation::new(
            self.clock.clone(),
            from,
            target_opacity,
            animations.dim_fade.0,
        ));
    }

    pub(super) fn animate_front_to(&mut self, target_x: f64) {
        let from = self.front_x.current();
        self.front_x = AnimatedValue::Animation(Animation::new(
            self.clock.clone(),
            from,
            target_x,
            self.options.animations.front_movement.0,
        ));
    }

    /// Drops finished animations.
    pub fn advance_animations(&mut self) {
        self.front_x.advance();
        self.dim_opacity.advance();
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.front_x.is_animation_ongoing() || self.dim_opacity.is_animation_ongoing()
    }

    /// Current frame of the front panel, following animations and drags.
    pub fn front_frame(&self) -> Rectangle {
        Rectangle::new(Point::from((self.front_x.current(), 0.)), self.view_size)
    }

    /// Frame the front panel is heading to.
    pub fn target_front_frame(&self) -> Rectangle {
        Rectangle::new(Point::from((self.front_x.target(), 0.)), self.view_size)
    }

    /// Current opacity of the dim overlay.
    pub fn dim_opacity(&self) -> f64 {
        self.dim_opacity.current()
    }

    pub fn dim_color(&self) -> sidemenu_config::Color {
        self.options.drawer.dim_color
    }
}
