use crate::utils::{Color, FloatOrInt, Ratio};

/// Drawer geometry and gesture thresholds.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Drawer {
    /// Width of the revealed menu relative to the container width.
    #[knuffel(child, unwrap(argument), default = Self::default().menu_width_ratio)]
    pub menu_width_ratio: Ratio,
    /// Horizontal fling velocity, in points per second, that opens or closes the menu regardless
    /// of the distance dragged.
    #[knuffel(child, unwrap(argument), default = Self::default().minimum_velocity)]
    pub minimum_velocity: FloatOrInt<0, 1_000_000>,
    /// Horizontal drag distance, relative to the container width, that opens or closes the menu.
    #[knuffel(child, unwrap(argument), default = Self::default().minimum_translation_ratio)]
    pub minimum_translation_ratio: Ratio,
    /// Color of the overlay dimming the front page while the menu is shown.
    #[knuffel(child, unwrap(argument, str), default = Self::default().dim_color)]
    pub dim_color: Color,
    /// Let the overlay opacity go above 1 while the front page is dragged past the menu width.
    #[knuffel(child)]
    pub allow_dim_overshoot: bool,
}

impl Default for Drawer {
    fn default() -> Self {
        Self {
            menu_width_ratio: Ratio(0.8),
            minimum_velocity: FloatOrInt(1000.),
            minimum_translation_ratio: Ratio(0.3),
            dim_color: Color::new_unpremul(0., 0., 0., 0.),
            allow_dim_overshoot: false,
        }
    }
}

impl Drawer {
    /// Horizontal position of the front panel when the menu is shown.
    pub fn open_offset(&self, container_width: f64) -> f64 {
        container_width * self.menu_width_ratio.0
    }

    /// Distance that has to be dragged to toggle the menu.
    pub fn minimum_translation(&self, container_width: f64) -> f64 {
        container_width * self.minimum_translation_ratio.0
    }
}
