//! Serializable view of the observable drawer state.

use serde::Serialize;

use super::gesture::DragSource;
use super::pages::StatusBarStyle;
use super::{DrawerController, DrawerState, Page};
use crate::utils::geometry::Rectangle;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawerSnapshot {
    pub state: DrawerState,
    /// Current front panel frame.
    pub front_frame: Rectangle,
    pub dim_opacity: f64,
    /// Unpremultiplied RGBA of the dim overlay.
    pub dim_color: [f32; 4],
    pub front_page_idx: Option<usize>,
    pub has_menu: bool,
    /// Source of the ongoing drag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag: Option<DragSource>,
    pub animations_ongoing: bool,
    pub status_bar_style: StatusBarStyle,
}

impl<P: Page> DrawerController<P> {
    pub fn snapshot(&self) -> DrawerSnapshot {
        DrawerSnapshot {
            state: self.state,
            front_frame: self.front_frame(),
            dim_opacity: self.dim_opacity(),
            dim_color: self.dim_color().to_array_unpremul(),
            front_page_idx: self.front_idx,
            has_menu: self.menu.is_some(),
            drag: self.drag_session().map(|session| session.source),
            animations_ongoing: self.are_animations_ongoing(),
            status_bar_style: self.status_bar_style(),
        }
    }
}
