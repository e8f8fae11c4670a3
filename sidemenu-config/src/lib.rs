//! Configuration for the side drawer controller.
//!
//! The config is a KDL document with two optional sections, `drawer` and `animations`. Every node
//! is optional and falls back to its default: a menu covering 80% of
//! the container, a 30% translation threshold, a 1000 points/second fling threshold, and
//! ease-out transitions of 350 ms for the front panel and 200 ms for the dim overlay.

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

pub mod animations;
pub mod drawer;
pub mod utils;

pub use crate::animations::{Animation, Animations, Curve, DimFadeAnim, FrontMovementAnim};
pub use crate::drawer::Drawer;
pub use crate::utils::{Color, FloatOrInt, Ratio};

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub drawer: Drawer,
    #[knuffel(child, default)]
    pub animations: Animations,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn parse_empty() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn default_values() {
        let config = Config::default();
        assert_eq!(config.drawer.menu_width_ratio, Ratio(0.8));
        assert_eq!(config.drawer.minimum_velocity, FloatOrInt(1000.));
        assert_eq!(config.drawer.minimum_translation_ratio, Ratio(0.3));
        assert!(!config.drawer.allow_dim_overshoot);
        assert_eq!(config.animations.front_movement.0.duration_ms, 350);
        assert_eq!(config.animations.dim_fade.0.duration_ms, 200);
        assert_eq!(config.animations.front_movement.0.curve, Curve::EaseOutQuad);
    }

    #[test]
    fn parse_full() {
        let parsed = do_parse(
            r##"
            drawer {
                menu-width-ratio 0.75
                minimum-velocity 800
                minimum-translation-ratio 0.25
                dim-color "#ffffff80"
                allow-dim-overshoot
            }

            animations {
                slowdown 2

                front-movement {
                    duration-ms 500
                    curve "ease-out-cubic"
                }

                dim-fade {
                    off
                }
            }
            "##,
        );

        assert_eq!(
            parsed,
            Config {
                drawer: Drawer {
                    menu_width_ratio: Ratio(0.75),
                    minimum_velocity: FloatOrInt(800.),
                    minimum_translation_ratio: Ratio(0.25),
                    dim_color: Color::from_rgba8_unpremul(255, 255, 255, 128),
                    allow_dim_overshoot: true,
                },
                animations: Animations {
                    off: false,
                    slowdown: FloatOrInt(2.),
                    front_movement: FrontMovementAnim(Animation {
                        off: false,
                        duration_ms: 500,
                        curve: Curve::EaseOutCubic,
                    }),
                    dim_fade: DimFadeAnim(Animation {
                        off: true,
                        duration_ms: 200,
                        curve: Curve::EaseOutQuad,
                    }),
                },
            }
        );
    }

    #[test]
    fn partial_animation_keeps_its_own_defaults() {
        let parsed = do_parse(
            r#"
            animations {
                dim-fade {
                    curve "linear"
                }
            }
            "#,
        );

        assert_eq!(parsed.animations.dim_fade.0.duration_ms, 200);
        assert_eq!(parsed.animations.dim_fade.0.curve, Curve::Linear);
        assert_eq!(parsed.animations.front_movement, FrontMovementAnim::default());
    }

    #[test]
    fn rejects_zero_width_ratio() {
        let res = Config::parse("test.kdl", "drawer { menu-width-ratio 0; }");
        assert!(res.is_err());
    }

    #[test]
    fn rejects_ratio_above_one() {
        let res = Config::parse("test.kdl", "drawer { minimum-translation-ratio 1.5; }");
        assert!(res.is_err());
    }

    #[test]
    fn rejects_negative_velocity() {
        let res = Config::parse("test.kdl", "drawer { minimum-velocity -10; }");
        assert!(res.is_err());
    }

    #[test]
    fn rejects_bad_color() {
        let res = Config::parse("test.kdl", r#"drawer { dim-color "not a color"; }"#);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_unknown_curve() {
        let res = Config::parse(
            "test.kdl",
            r#"animations { front-movement { curve "bounce"; }; }"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn load_missing_file_fails() {
        let res = Config::load(Path::new("/nonexistent/sidemenu/config.kdl"));
        assert!(res.is_err());
    }
}
