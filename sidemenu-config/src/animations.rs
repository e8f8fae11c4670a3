use knuffel::errors::DecodeError;
use knuffel::Decode as _;

use crate::utils::FloatOrInt;

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Animations {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument), default = Self::default().slowdown)]
    pub slowdown: FloatOrInt<0, 65535>,
    #[knuffel(child, default)]
    pub front_movement: FrontMovementAnim,
    #[knuffel(child, default)]
    pub dim_fade: DimFadeAnim,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            off: false,
            slowdown: FloatOrInt(1.),
            front_movement: Default::default(),
            dim_fade: Default::default(),
        }
    }
}

impl Animations {
    /// Rate at which animation time passes relative to real time.
    ///
    /// Returns `None` when animations should complete instantly.
    pub fn rate(&self) -> Option<f64> {
        if self.off || self.slowdown.0 <= 0. {
            None
        } else {
            Some(1. / self.slowdown.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub duration_ms: u32,
    pub curve: Curve,
}

#[derive(knuffel::DecodeScalar, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

/// Movement of the front panel between its resting positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontMovementAnim(pub Animation);

impl Default for FrontMovementAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            duration_ms: 350,
            curve: Curve::EaseOutQuad,
        })
    }
}

/// Fade of the dim overlay, independent from the front panel movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimFadeAnim(pub Animation);

impl Default for DimFadeAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            duration_ms: 200,
            curve: Curve::EaseOutQuad,
        })
    }
}

#[derive(knuffel::Decode, Debug, Default)]
struct AnimationPart {
    #[knuffel(child)]
    off: bool,
    #[knuffel(child, unwrap(argument))]
    duration_ms: Option<u32>,
    #[knuffel(child, unwrap(argument))]
    curve: Option<Curve>,
}

impl AnimationPart {
    fn resolve(self, default: Animation) -> Animation {
        Animation {
            off: self.off || default.off,
            duration_ms: self.duration_ms.unwrap_or(default.duration_ms),
            curve: self.curve.unwrap_or(default.curve),
        }
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::Decode<S> for FrontMovementAnim {
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        let part = AnimationPart::decode_node(node, ctx)?;
        Ok(Self(part.resolve(default)))
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::Decode<S> for DimFadeAnim {
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        let part = AnimationPart::decode_node(node, ctx)?;
        Ok(Self(part.resolve(default)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_follows_slowdown() {
        let mut animations = Animations::default();
        assert_eq!(animations.rate(), Some(1.));

        animations.slowdown = FloatOrInt(4.);
        assert_eq!(animations.rate(), Some(0.25));

        animations.slowdown = FloatOrInt(0.);
        assert_eq!(animations.rate(), None);

        animations.slowdown = FloatOrInt(1.);
        animations.off = true;
        assert_eq!(animations.rate(), None);
    }
}
