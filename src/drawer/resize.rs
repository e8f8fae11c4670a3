//! Container size changes (rotation, window resize).

use tracing::{debug, trace};

use super::animated_value::AnimatedValue;
use super::{DrawerController, Page};
use crate::utils::geometry::Size;

impl<P: Page> DrawerController<P> {
    /// Starts a transition to a new container size.
    ///
    /// Any ongoing drag is dropped and every tracked frame is reset to the new bounds. The menu is
    /// forced closed in [`resize_complete()`](Self::resize_complete), once the host's resize
    /// transition finishes.
    pub fn resize_begin(&mut self, size: Size) {
        debug!("drawer {:?}: resizing to {}×{}", self.id, size.w, size.h);

        // Resetting the recognizers ends whatever drag was in flight; its remaining events will
        // find no session and be ignored.
        if let Some(session) = self.drag_session() {
            trace!("dropping drag from {:?} for resize", session.source);
        }

        self.view_size = size;
        self.front_x = AnimatedValue::Static(0.);

        let bounds = self.bounds();
        if let Some(menu) = &mut self.menu {
            menu.set_frame(bounds);
        }
        if let Some(idx) = self.front_idx {
            self.pages[idx].set_frame(bounds);
        }

        self.resize_in_progress = true;
    }

    /// Finishes a resize transition started with [`resize_begin()`](Self::resize_begin).
    pub fn resize_complete(&mut self) {
        if !self.resize_in_progress {
            trace!("ignoring resize completion without a resize");
            return;
        }

        self.resize_in_progress = false;
        self.toggle(false, false);
    }

    pub fn view_size(&self) -> Size {
        self.view_size
    }

    pub fn is_resize_in_progress(&self) -> bool {
        self.resize_in_progress
    }
}
