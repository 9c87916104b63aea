//! Declarative style expressions in the Mapbox GL JSON dialect.
//!
//! Only the subset the transition needs is modeled: literals, `["zoom"]`, and
//! linear interpolation over zoom. Each expression can also be evaluated here,
//! which is how the emitted style is checked against the selector.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::{animation::interpolation::ZoomCurve, style::color::Color, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    Zoom,
    /// `["interpolate", ["linear"], ["zoom"], z0, v0, z1, v1, ...]`
    Interpolate(ZoomCurve),
}

impl Expression {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn interpolate_linear_zoom(curve: ZoomCurve) -> Self {
        Expression::Interpolate(curve)
    }

    pub fn to_json(&self) -> Value {
        match self {
            // Bare arrays and objects would be read back as expressions.
            Expression::Literal(value @ (Value::Array(_) | Value::Object(_))) => {
                json!(["literal", value])
            }
            Expression::Literal(value) => value.clone(),
            Expression::Zoom => json!(["zoom"]),
            Expression::Interpolate(curve) => {
                let mut items = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
                for stop in curve.stops() {
                    items.push(json!(stop.zoom));
                    items.push(json!(stop.value));
                }
                Value::Array(items)
            }
        }
    }

    /// Evaluates a numeric expression at `zoom`
    pub fn evaluate(&self, zoom: f64) -> Result<f64> {
        match self {
            Expression::Literal(value) => value
                .as_f64()
                .ok_or_else(|| Error::Expression(format!("literal {} is not numeric", value))),
            Expression::Zoom => Ok(zoom),
            Expression::Interpolate(curve) => Ok(curve.evaluate(zoom)),
        }
    }

    pub fn is_zoom_dependent(&self) -> bool {
        !matches!(self, Expression::Literal(_))
    }
}

impl Serialize for Expression {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<ZoomCurve> for Expression {
    fn from(curve: ZoomCurve) -> Self {
        Expression::Interpolate(curve)
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Literal(value.into())
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Literal(value.into())
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::Literal(value.into())
    }
}

impl From<Color> for Expression {
    fn from(color: Color) -> Self {
        Expression::Literal(color.to_hex().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_json_shape() {
        let curve = ZoomCurve::new([(0.0, 2.0), (9.0, 5.0), (12.0, 12.0)]).unwrap();
        let expr = Expression::interpolate_linear_zoom(curve);
        assert_eq!(
            expr.to_json(),
            json!(["interpolate", ["linear"], ["zoom"], 0.0, 2.0, 9.0, 5.0, 12.0, 12.0])
        );
        assert!(expr.is_zoom_dependent());
    }

    #[test]
    fn test_literals() {
        assert_eq!(Expression::literal("ICON_ID").to_json(), json!("ICON_ID"));
        assert_eq!(Expression::literal(true).to_json(), json!(true));
        assert_eq!(
            Expression::literal(json!([1, 2])).to_json(),
            json!(["literal", [1, 2]])
        );
        assert!(!Expression::literal(1.0).is_zoom_dependent());
    }

    #[test]
    fn test_evaluate() {
        let curve = ZoomCurve::new([(10.9, 0.0), (12.0, 1.0)]).unwrap();
        let expr = Expression::from(curve);
        assert_eq!(expr.evaluate(10.0).unwrap(), 0.0);
        assert_eq!(expr.evaluate(13.0).unwrap(), 1.0);
        assert_eq!(Expression::Zoom.evaluate(7.5).unwrap(), 7.5);
        assert_eq!(Expression::literal(4).evaluate(0.0).unwrap(), 4.0);
        assert!(matches!(
            Expression::literal("#aaaaaa").evaluate(0.0),
            Err(Error::Expression(_))
        ));
    }
}
