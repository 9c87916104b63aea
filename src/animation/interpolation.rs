//! Piecewise-linear interpolation over zoom.
//!
//! A table of [`ControlPoint`]s maps zoom levels to property values. Queries
//! outside the table clamp to the nearest end; queries inside it are linearly
//! interpolated between the two bracketing stops.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A `(zoom, value)` anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub zoom: f64,
    pub value: f64,
}

impl ControlPoint {
    pub fn new(zoom: f64, value: f64) -> Self {
        Self { zoom, value }
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((zoom, value): (f64, f64)) -> Self {
        Self::new(zoom, value)
    }
}

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * t
    }
}

/// Evaluates a control-point table at `query_zoom`.
///
/// Fails with [`Error::InvalidControlPoints`] when the table is empty, holds a
/// non-finite number, or is not strictly ascending by zoom.
pub fn interpolate(control_points: &[ControlPoint], query_zoom: f64) -> Result<f64> {
    validate(control_points)?;
    Ok(evaluate_unchecked(control_points, query_zoom))
}

fn validate(control_points: &[ControlPoint]) -> Result<()> {
    if control_points.is_empty() {
        return Err(Error::InvalidControlPoints(
            "at least one control point is required".to_string(),
        ));
    }

    if let Some(bad) = control_points
        .iter()
        .find(|p| !p.zoom.is_finite() || !p.value.is_finite())
    {
        return Err(Error::InvalidControlPoints(format!(
            "non-finite control point ({}, {})",
            bad.zoom, bad.value
        )));
    }

    for pair in control_points.windows(2) {
        if pair[1].zoom <= pair[0].zoom {
            return Err(Error::InvalidControlPoints(format!(
                "zoom stops must be strictly ascending, got {} then {}",
                pair[0].zoom, pair[1].zoom
            )));
        }
    }

    Ok(())
}

// Caller guarantees a validated, non-empty table.
fn evaluate_unchecked(stops: &[ControlPoint], query_zoom: f64) -> f64 {
    let first = stops[0];
    let last = stops[stops.len() - 1];

    if query_zoom <= first.zoom {
        return first.value;
    }
    if query_zoom >= last.zoom {
        return last.value;
    }

    // Index of the first stop strictly above the query; always in 1..len here.
    let upper = stops.partition_point(|p| p.zoom <= query_zoom);
    let lower = stops[upper - 1];
    let upper = stops[upper];

    let t = (query_zoom - lower.zoom) / (upper.zoom - lower.zoom);
    Interpolation::linear(lower.value, upper.value, t)
}

/// A validated control-point table.
///
/// Validation happens once in [`ZoomCurve::new`], so evaluation cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomCurve {
    stops: Vec<ControlPoint>,
}

impl ZoomCurve {
    pub fn new<I, P>(stops: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<ControlPoint>,
    {
        let stops: Vec<ControlPoint> = stops.into_iter().map(Into::into).collect();
        validate(&stops)?;
        Ok(Self { stops })
    }

    pub fn evaluate(&self, zoom: f64) -> f64 {
        evaluate_unchecked(&self.stops, zoom)
    }

    pub fn stops(&self) -> &[ControlPoint] {
        &self.stops
    }

    pub fn first(&self) -> ControlPoint {
        self.stops[0]
    }

    pub fn last(&self) -> ControlPoint {
        self.stops[self.stops.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; an empty curve cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl<'de> Deserialize<'de> for ZoomCurve {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stops = Vec::<ControlPoint>::deserialize(deserializer)?;
        ZoomCurve::new(stops).map_err(serde::de::Error::custom)
    }
}
