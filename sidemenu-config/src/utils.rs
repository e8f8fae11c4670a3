use std::str::FromStr;

use knuffel::errors::DecodeError;
use miette::IntoDiagnostic as _;

/// A number that may be written either as an integer or as a decimal, bounded to `MIN..=MAX`.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatOrInt<const MIN: i32, const MAX: i32>(pub f64);

/// A fraction of the container width, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ratio(pub f64);

/// RGBA color in [0, 1] with unpremultiplied alpha.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new_unpremul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8_unpremul(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_array_unpremul([r, g, b, a].map(|x| f32::from(x) / 255.))
    }

    pub fn from_array_unpremul([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array_unpremul(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Color {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = csscolorparser::parse(s).into_diagnostic()?.to_array();
        Ok(Self::from_array_unpremul(color))
    }
}

fn check_no_type_name<S: knuffel::traits::ErrorSpan>(
    type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
    ctx: &mut knuffel::decode::Context<S>,
) {
    if let Some(type_name) = &type_name {
        ctx.emit_error(DecodeError::unexpected(
            type_name,
            "type name",
            "no type name expected for this node",
        ));
    }
}

/// Decodes an integer or decimal literal into an `f64`.
///
/// Errors are emitted into `ctx`; `None` is returned in that case.
fn decode_number<S: knuffel::traits::ErrorSpan>(
    val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
    ctx: &mut knuffel::decode::Context<S>,
) -> Option<f64> {
    match &**val {
        knuffel::ast::Literal::Int(ref value) => {
            let value: Result<i32, _> = value.try_into();
            match value {
                Ok(v) => Some(f64::from(v)),
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    None
                }
            }
        }
        knuffel::ast::Literal::Decimal(ref value) => {
            let value: Result<f64, _> = value.try_into();
            match value {
                Ok(v) => Some(v),
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    None
                }
            }
        }
        _ => {
            ctx.emit_error(DecodeError::scalar_kind(
                knuffel::decode::Kind::Decimal,
                val,
            ));
            None
        }
    }
}

impl<S: knuffel::traits::ErrorSpan, const MIN: i32, const MAX: i32> knuffel::DecodeScalar<S>
    for FloatOrInt<MIN, MAX>
{
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        check_no_type_name(type_name, ctx);
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let Some(v) = decode_number(val, ctx) else {
            return Ok(FloatOrInt::default());
        };

        if (f64::from(MIN)..=f64::from(MAX)).contains(&v) {
            Ok(FloatOrInt(v))
        } else {
            ctx.emit_error(DecodeError::conversion(
                val,
                format!("value must be between {MIN} and {MAX}"),
            ));
            Ok(FloatOrInt::default())
        }
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for Ratio {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        check_no_type_name(type_name, ctx);
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let Some(v) = decode_number(val, ctx) else {
            return Ok(Ratio(1.));
        };

        if v > 0. && v <= 1. {
            Ok(Ratio(v))
        } else {
            ctx.emit_error(DecodeError::conversion(
                val,
                "ratio must be greater than 0 and at most 1",
            ));
            Ok(Ratio(1.))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color() {
        let color: Color = "#ff000080".parse().unwrap();
        assert_eq!(color, Color::from_rgba8_unpremul(255, 0, 0, 128));

        let color: Color = "white".parse().unwrap();
        assert_eq!(color.to_array_unpremul(), [1., 1., 1., 1.]);

        assert!("#zz".parse::<Color>().is_err());
    }
}
