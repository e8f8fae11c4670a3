//! Drag gesture interpretation.
//!
//! Drags can come from two places: the presented front page, and the dim overlay covering it
//! while the menu is shown. Both feed the same [`DragSession`], stored in the front panel
//! position for the duration of the drag.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::animated_value::{AnimatedValue, FadeValue};
use super::{DrawerController, DrawerState, Page};
use crate::utils::geometry::{Point, Rectangle};

/// Overlays less opaque than this don't receive input.
pub const MIN_HIT_TEST_OPACITY: f64 = 0.01;

/// Surface a drag or tap was recognized on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum DragSource {
    /// The presented front page.
    FrontPage,
    /// The dim overlay above the front page.
    DimOverlay,
}

/// Translation and velocity of a drag, as reported when it ends.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub translation: Point,
    pub velocity: Point,
}

/// Front panel frame at the moment a drag began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub frame: Rectangle,
}

/// State of an ongoing drag.
#[derive(Debug)]
pub struct DragSession {
    pub source: DragSource,
    pub snapshot: GeometrySnapshot,
    /// Front panel position as moved by the drag.
    pub current_x: f64,
}

impl DragSample {
    pub fn new(translation: impl Into<Point>, velocity: impl Into<Point>) -> Self {
        Self {
            translation: translation.into(),
            velocity: velocity.into(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.velocity.is_finite()
    }
}

impl DragSession {
    /// Front panel position for a drag translated by `translation_x`.
    ///
    /// The panel never moves left of its closed position.
    pub fn dragged_x(&self, translation_x: f64) -> f64 {
        f64::max(0., self.snapshot.frame.loc.x + translation_x)
    }
}

/// Returns whether a drag ending with the given translation and velocity should flip `state`.
///
/// From [`DrawerState::Closed`] the drag has to go right, from [`DrawerState::Open`] it has to go
/// left, past either the translation or the velocity threshold. Reaching a threshold exactly
/// counts.
pub fn should_toggle(
    state: DrawerState,
    translation_x: f64,
    velocity_x: f64,
    container_width: f64,
    config: &sidemenu_config::Drawer,
) -> bool {
    let minimum_translation = config.minimum_translation(container_width);
    let minimum_velocity = config.minimum_velocity.0;

    match state {
        DrawerState::Closed => {
            translation_x >= minimum_translation || velocity_x >= minimum_velocity
        }
        DrawerState::Open => {
            translation_x <= -minimum_translation || velocity_x <= -minimum_velocity
        }
    }
}

/// Returns whether the drawer should end up open after a drag from `state`.
///
/// A drag that doesn't toggle snaps back to where it started.
pub fn target_open(state: DrawerState, should_toggle: bool) -> bool {
    (state == DrawerState::Closed && should_toggle) || (state == DrawerState::Open && !should_toggle)
}

impl<P: Page> DrawerController<P> {
    /// Returns whether input from `source` reaches the drawer right now.
    pub fn accepts_input_from(&self, source: DragSource) -> bool {
        match source {
            DragSource::FrontPage => self.front_idx.is_some(),
            DragSource::DimOverlay => self.dim_opacity() >= MIN_HIT_TEST_OPACITY,
        }
    }

    /// Returns the ongoing drag, if any.
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.front_x.gesture()
    }

    pub fn is_dragging(&self) -> bool {
        self.front_x.is_gesture()
    }

    /// Begins a drag recognized on `source`.
    ///
    /// Captures the current front panel frame; an animation in progress stops where it is. The dim
    /// overlay stops too, and follows the panel from then on.
    pub fn drag_begin(&mut self, source: DragSource) -> bool {
        if !self.accepts_input_from(source) {
            trace!("ignoring drag begin from {source:?}");
            return false;
        }

        if let Some(session) = self.drag_session() {
            trace!(
                "ignoring drag begin from {source:?} during a drag from {:?}",
                session.source
            );
            return false;
        }

        let frame = self.front_frame();
        self.front_x = AnimatedValue::Gesture(DragSession {
            source,
            snapshot: GeometrySnapshot { frame },
            current_x: frame.loc.x,
        });
        self.dim_opacity = FadeValue::Static(self.dim_opacity_for_offset(frame.loc.x));
        trace!("drag began from {source:?} at x={}", frame.loc.x);

        true
    }

    /// Moves the front panel along with an ongoing drag.
    ///
    /// Returns `None` if there's no drag from `source`, otherwise whether the panel moved.
    pub fn drag_update(&mut self, source: DragSource, translation: Point) -> Option<bool> {
        if !translation.is_finite() {
            warn!("ignoring non-finite drag translation {translation:?}");
            return None;
        }

        let AnimatedValue::Gesture(session) = &mut self.front_x else {
            trace!("ignoring drag update without a drag");
            return None;
        };

        if session.source != source {
            return None;
        }

        let new_x = session.dragged_x(translation.x);
        if session.current_x == new_x {
            return Some(false);
        }
        session.current_x = new_x;

        let opacity = self.dim_opacity_for_offset(new_x);
        self.dim_opacity = FadeValue::Static(opacity);

        Some(true)
    }

    /// Ends a drag, settling the drawer open or closed with an animation.
    pub fn drag_end(&mut self, source: DragSource, sample: DragSample) -> bool {
        if !sample.is_finite() {
            warn!("ignoring non-finite drag sample {sample:?}");
            return false;
        }

        let Some(session) = self.drag_session() else {
            trace!("ignoring drag end without a drag");
            return false;
        };

        if session.source != source {
            return false;
        }

        let toggle = should_toggle(
            self.state,
            sample.translation.x,
            sample.velocity.x,
            self.view_size.w,
            &self.options.drawer,
        );
        let open = target_open(self.state, toggle);
        debug!(
            "drag from {source:?} ended: translation={}, velocity={}, {:?} -> open={open}",
            sample.translation.x, sample.velocity.x, self.state
        );

        // Animate from where the drag left the panel.
        self.front_x.cancel_gesture();
        self.apply(open, true);

        true
    }

    /// Cancels a drag, for example when the platform recognizer was interrupted.
    ///
    /// The drawer settles back into its current state.
    pub fn drag_cancel(&mut self, source: DragSource) -> bool {
        match self.drag_session() {
            Some(session) if session.source == source => (),
            _ => return false,
        }

        trace!("drag from {source:?} cancelled");
        self.front_x.cancel_gesture();
        self.apply(self.state.is_open(), true);
        true
    }

    /// Handles a tap on the dim overlay, which closes the menu.
    pub fn dim_overlay_tap(&mut self) -> bool {
        if !self.accepts_input_from(DragSource::DimOverlay) {
            trace!("ignoring tap on a transparent dim overlay");
            return false;
        }

        if self.is_dragging() {
            return false;
        }

        self.toggle(false, true);
        true
    }

    /// Dim overlay opacity for the front panel at `x`.
    pub(super) fn dim_opacity_for_offset(&self, x: f64) -> f64 {
        let open_x = self.options.drawer.open_offset(self.view_size.w);
        if open_x <= 0. {
            return 0.;
        }

        let opacity = f64::max(0., x / open_x);
        if self.options.drawer.allow_dim_overshoot {
            opacity
        } else {
            opacity.min(1.)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(velocity: f64, translation_ratio: f64) -> sidemenu_config::Drawer {
        sidemenu_config::Drawer {
            minimum_velocity: sidemenu_config::FloatOrInt(velocity),
            minimum_translation_ratio: sidemenu_config::Ratio(translation_ratio),
            ..Default::default()
        }
    }

    #[test]
    fn closed_opens_past_translation() {
        let config = config(1000., 0.8);
        assert!(should_toggle(DrawerState::Closed, 350., 0., 400., &config));
        assert!(!should_toggle(DrawerState::Closed, 319., 0., 400., &config));
    }

    #[test]
    fn closed_translation_threshold_is_inclusive() {
        let config = config(1000., 0.5);
        assert!(should_toggle(DrawerState::Closed, 200., 0., 400., &config));
    }

    #[test]
    fn closed_opens_on_fling() {
        let config = config(1000., 0.3);
        assert!(should_toggle(DrawerState::Closed, 1., 1000., 400., &config));
        assert!(!should_toggle(DrawerState::Closed, 1., 999., 400., &config));
        // Flinging the wrong way doesn't count.
        assert!(!should_toggle(DrawerState::Closed, 0., -5000., 400., &config));
    }

    #[test]
    fn open_requires_leftward_drag() {
        let config = config(1000., 0.3);
        assert!(should_toggle(DrawerState::Open, -120., 0., 400., &config));
        assert!(!should_toggle(DrawerState::Open, -119., 0., 400., &config));
        assert!(should_toggle(DrawerState::Open, 0., -1000., 400., &config));
        assert!(!should_toggle(DrawerState::Open, 500., 5000., 400., &config));
    }

    #[test]
    fn target_snaps_back_without_toggle() {
        assert!(target_open(DrawerState::Closed, true));
        assert!(!target_open(DrawerState::Closed, false));
        assert!(!target_open(DrawerState::Open, true));
        assert!(target_open(DrawerState::Open, false));
    }

    #[test]
    fn dragged_x_is_clamped() {
        let session = DragSession {
            source: DragSource::FrontPage,
            snapshot: GeometrySnapshot {
                frame: Rectangle::new(Point::from((100., 0.)), Default::default()),
            },
            current_x: 100.,
        };
        assert_eq!(session.dragged_x(50.), 150.);
        assert_eq!(session.dragged_x(-1000.), 0.);
    }
}
