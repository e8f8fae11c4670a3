//! Side drawer controller.
//!
//! The drawer is made of two layers filling the container: the menu page at the bottom, and the
//! front panel above it. The front panel holds the presented page and, on top of it, the dim
//! overlay. Showing the menu slides the front panel to the right by a fraction of the container
//! width and fades the overlay in.
//!
//! The [`DrawerState`] is the single source of truth for whether the menu is shown. Once
//! animations settle, the front panel rests at x = 0 when closed, and at `width × menu-width-ratio`
//! when open. Drags move the panel freely (though never left of x = 0) without touching the state;
//! when a drag ends, [`gesture::should_toggle()`] decides which state to settle in.
//!
//! All methods are expected to be called from a single thread, in the order events happen.

use std::rc::Rc;

use serde::Serialize;
use sidemenu_config::Config;
use tracing::debug;

use self::animated_value::{AnimatedValue, FadeValue};
use crate::animation::Clock;
use crate::utils::geometry::Size;
use crate::utils::id::IdCounter;

pub mod animated_value;
pub mod gesture;
pub mod pages;
mod resize;
pub mod snapshot;
mod transition;

pub use self::gesture::{DragSample, DragSession, DragSource, GeometrySnapshot};
pub use self::pages::{Page, StatusBarStyle};
pub use self::snapshot::DrawerSnapshot;


static DRAWER_ID_COUNTER: IdCounter = IdCounter::new();

/// Unique ID of a drawer, held by the pages attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawerId(u32);

impl DrawerId {
    fn next() -> DrawerId {
        DrawerId(DRAWER_ID_COUNTER.next())
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

impl DrawerState {
    pub fn is_open(self) -> bool {
        self == DrawerState::Open
    }
}

/// Configurable properties of the drawer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Options {
    pub drawer: sidemenu_config::Drawer,
    pub animations: sidemenu_config::Animations,
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let mut animations = config.animations;
        if animations.off {
            animations.front_movement.0.off = true;
            animations.dim_fade.0.off = true;
        }

        Self {
            drawer: config.drawer,
            animations,
        }
    }
}

#[derive(Debug)]
pub struct DrawerController<P: Page> {
    /// Unique ID of this drawer.
    id: DrawerId,
    /// Size of the container.
    view_size: Size,
    /// Whether the menu is shown.
    state: DrawerState,
    /// Horizontal position of the front panel.
    front_x: AnimatedValue,
    /// Opacity of the dim overlay.
    dim_opacity: FadeValue,
    /// Page shown underneath the front panel.
    menu: Option<P>,
    /// Pages that can be presented.
    pages: Vec<P>,
    /// Index of the presented page in `pages`.
    front_idx: Option<usize>,
    /// Whether the container is between `resize_begin()` and `resize_complete()`.
    resize_in_progress: bool,
    /// Clock for driving animations.
    clock: Clock,
    /// Configurable properties of the drawer.
    options: Rc<Options>,
}

impl<P: Page> DrawerController<P> {
    pub fn new(view_size: Size, clock: Clock, options: Options) -> Self {
        Self::with_options(view_size, clock, Rc::new(options))
    }

    pub fn with_options(view_size: Size, clock: Clock, options: Rc<Options>) -> Self {
        Self {
            id: DrawerId::next(),
            view_size,
            state: DrawerState::Closed,
            front_x: AnimatedValue::new(0.),
            dim_opacity: FadeValue::new(0.),
            menu: None,
            pages: Vec::new(),
            front_idx: None,
            resize_in_progress: false,
            clock,
            options,
        }
    }

    pub fn id(&self) -> DrawerId {
        self.id
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    /// Replaces the options; they apply from the next decision or animation.
    ///
    /// A front panel resting at, or animating to, its open position follows a changed menu width.
    pub fn update_options(&mut self, options: Rc<Options>) {
        let old_open_x = self.resting_x(DrawerState::Open);
        self.options = options;
        let open_x = self.resting_x(DrawerState::Open);

        if !self.state.is_open() || old_open_x == open_x {
            return;
        }

        // The panel stays reset until resize_complete() closes the drawer.
        if self.resize_in_progress {
            return;
        }

        debug!(
            "drawer {:?}: menu width changed from {old_open_x} to {open_x}",
            self.id
        );
        match &mut self.front_x {
            AnimatedValue::Static(x) => *x = open_x,
            AnimatedValue::Animation(anim) => *anim = anim.restarted(anim.value(), open_x),
            // The drag decides where the panel goes.
            AnimatedValue::Gesture(_) => (),
        }
    }

    /// Replaces the options from a config, and applies its slowdown to the clock.
    pub fn update_config(&mut self, config: &Config) {
        self.clock.apply_config(&config.animations);
        self.update_options(Rc::new(Options::from_config(config)));
    }

    #[cfg(test)]
    fn verify_invariants(&self) {
        use approx::assert_abs_diff_eq;

        assert!(self.view_size.w >= 0.);
        assert!(self.view_size.h >= 0.);

        let x = self.front_x.current();
        assert!(x >= 0., "front panel must never move left of closed: {x}");

        let opacity = self.dim_opacity();
        assert!(opacity >= 0., "dim opacity must not be negative: {opacity}");
        if !self.options.drawer.allow_dim_overshoot {
            assert!(opacity <= 1., "dim opacity must not overshoot: {opacity}");
        }

        if let Some(session) = self.drag_session() {
            assert!(session.snapshot.frame.loc.x >= 0.);
            assert_eq!(session.snapshot.frame.loc.y, 0.);
        } else if !self.are_animations_ongoing() && !self.resize_in_progress {
            assert_abs_diff_eq!(x, self.resting_x(self.state), epsilon = 1e-9);
            let expected_opacity = if self.state.is_open() { 1. } else { 0. };
            assert_abs_diff_eq!(opacity, expected_opacity, epsilon = 1e-9);
        }

        if let Some(idx) = self.front_idx {
            assert!(idx < self.pages.len(), "front page index out of range");
        }

        for (idx, page) in self.pages.iter().enumerate() {
            let attached = page.drawer() == Some(self.id);
            assert_eq!(
                attached,
                self.front_idx == Some(idx),
                "only the front page can be attached"
            );
        }

        if let Some(menu) = &self.menu {
            assert_eq!(menu.drawer(), Some(self.id), "menu page must be attached");
        }
    }
}
