//! Menu and front pages.

use serde::Serialize;
use tracing::debug;

use super::{DrawerController, DrawerId};
use crate::utils::geometry::Rectangle;

/// Content hosted by a drawer: the menu, or one of the front pages.
pub trait Page {
    /// Type that can be used as a unique ID of this page.
    type Id: PartialEq + std::fmt::Debug + Clone;

    /// Unique ID of this page.
    fn id(&self) -> &Self::Id;

    /// Records the drawer the page is attached to, or `None` when detached.
    ///
    /// Pages nested inside this page should answer [`Page::drawer()`] through it.
    fn set_drawer(&mut self, drawer: Option<DrawerId>);

    /// Drawer this page is attached to.
    fn drawer(&self) -> Option<DrawerId>;

    /// Sets the page frame within its container.
    fn set_frame(&mut self, frame: Rectangle);

    /// Status bar appearance requested by the page.
    fn status_bar_style(&self) -> StatusBarStyle {
        StatusBarStyle::Default
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBarStyle {
    #[default]
    Default,
    LightContent,
}

impl<P: Page> DrawerController<P> {
    /// Sets the page shown underneath the front panel.
    ///
    /// The previous menu page is detached and returned.
    pub fn set_menu_page(&mut self, mut page: P) -> Option<P> {
        let old = self.menu.take().map(|mut old| {
            old.set_drawer(None);
            old
        });

        debug!("drawer {:?}: setting menu page {:?}", self.id, page.id());
        page.set_drawer(Some(self.id));
        page.set_frame(self.bounds());
        self.menu = Some(page);

        old
    }

    pub fn menu_page(&self) -> Option<&P> {
        self.menu.as_ref()
    }

    /// Replaces the set of pages that can be presented.
    ///
    /// The currently presented page, if any, is detached; nothing is presented until the next
    /// [`present()`](Self::present) call. The previous pages are returned.
    pub fn set_pages(&mut self, pages: Vec<P>) -> Vec<P> {
        self.detach_front_page();

        debug!("drawer {:?}: setting {} pages", self.id, pages.len());
        std::mem::replace(&mut self.pages, pages)
    }

    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    pub fn page(&self, idx: usize) -> Option<&P> {
        self.pages.get(idx)
    }

    pub fn front_page_idx(&self) -> Option<usize> {
        self.front_idx
    }

    pub fn front_page(&self) -> Option<&P> {
        self.front_idx.map(|idx| &self.pages[idx])
    }

    /// Makes the page at `idx` the front page and closes the menu.
    ///
    /// # Panics
    ///
    /// Panics if no pages were set or if `idx` is out of range.
    pub fn present(&mut self, idx: usize, animated: bool) {
        assert!(
            !self.pages.is_empty(),
            "present({idx}) called before any pages were set"
        );
        assert!(
            idx < self.pages.len(),
            "page index {idx} out of range ({} pages)",
            self.pages.len()
        );

        self.detach_front_page();

        debug!("drawer {:?}: presenting page {idx}", self.id);
        let bounds = self.bounds();
        let page = &mut self.pages[idx];
        page.set_drawer(Some(self.id));
        page.set_frame(bounds);
        self.front_idx = Some(idx);

        self.toggle(false, animated);
    }

    fn detach_front_page(&mut self) {
        if let Some(idx) = self.front_idx.take() {
            self.pages[idx].set_drawer(None);
        }
    }

    /// Status bar appearance: the menu's while the menu is shown, the front page's otherwise.
    pub fn status_bar_style(&self) -> StatusBarStyle {
        let page = if self.state.is_open() {
            self.menu.as_ref()
        } else {
            self.front_page()
        };
        page.map(P::status_bar_style).unwrap_or_default()
    }

    /// Returns whether `page` is attached to this drawer.
    pub fn contains(&self, page: &P) -> bool {
        page.drawer() == Some(self.id)
    }

    /// Frame of the container, also used for attached pages.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.view_size)
    }
}
