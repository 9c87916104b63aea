//! Zoom-driven choice between circle and icon markers.
//!
//! Below the switch zoom every feature is drawn as a base circle with a grey
//! shadow circle composited over it; the shadow fades in over the last
//! stretch before the switch so the hand-over to icons is not abrupt. At and
//! above the switch zoom only the icon is drawn.

use serde::Serialize;

use crate::{
    animation::interpolation::ZoomCurve,
    core::{config::TransitionConfig, constants, geo::GeoPoint},
    data::features::FeatureStore,
    Error, Result,
};

/// Zoom level at which markers switch from circles to icons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SwitchThreshold(f64);

impl SwitchThreshold {
    pub fn new(zoom: f64) -> Result<Self> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(Error::InvalidThreshold(zoom));
        }
        Ok(Self(zoom))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for SwitchThreshold {
    fn default() -> Self {
        Self(constants::DEFAULT_SWITCH_ZOOM)
    }
}

/// A visual form a feature can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Variant {
    Circle,
    ShadowCircle,
    Icon,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Circle => write!(f, "circle"),
            Variant::ShadowCircle => write!(f, "shadow-circle"),
            Variant::Icon => write!(f, "icon"),
        }
    }
}

/// What to draw at one zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderDecision {
    /// Base circle and shadow circle, both active
    Circle { radius: f64, shadow_opacity: f64 },
    Icon,
}

impl RenderDecision {
    pub fn active_variants(&self) -> &'static [Variant] {
        match self {
            RenderDecision::Circle { .. } => &[Variant::Circle, Variant::ShadowCircle],
            RenderDecision::Icon => &[Variant::Icon],
        }
    }

    pub fn is_icon(&self) -> bool {
        matches!(self, RenderDecision::Icon)
    }

    pub fn radius(&self) -> Option<f64> {
        match self {
            RenderDecision::Circle { radius, .. } => Some(*radius),
            RenderDecision::Icon => None,
        }
    }

    pub fn shadow_opacity(&self) -> Option<f64> {
        match self {
            RenderDecision::Circle { shadow_opacity, .. } => Some(*shadow_opacity),
            RenderDecision::Icon => None,
        }
    }
}

/// Decision for one stored feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureDecision {
    pub index: usize,
    pub point: GeoPoint,
    pub decision: RenderDecision,
}

/// Selector with its curves validated up front
#[derive(Debug, Clone, PartialEq)]
pub struct RepresentationSelector {
    threshold: SwitchThreshold,
    radius: ZoomCurve,
    shadow_opacity: ZoomCurve,
}

impl RepresentationSelector {
    pub fn new(config: &TransitionConfig) -> Result<Self> {
        Ok(Self {
            threshold: config.threshold()?,
            radius: config.radius_curve()?,
            shadow_opacity: config.shadow_opacity_curve()?,
        })
    }

    pub fn threshold(&self) -> SwitchThreshold {
        self.threshold
    }

    pub fn radius_curve(&self) -> &ZoomCurve {
        &self.radius
    }

    pub fn shadow_opacity_curve(&self) -> &ZoomCurve {
        &self.shadow_opacity
    }

    /// The switch zoom itself already belongs to the icon range.
    ///
    /// Expects a finite zoom; [`select_representation`] and the controller
    /// reject anything else with [`Error::InvalidZoom`] first.
    pub fn select(&self, zoom: f64) -> RenderDecision {
        if zoom < self.threshold.value() {
            RenderDecision::Circle {
                radius: self.radius.evaluate(zoom),
                shadow_opacity: self.shadow_opacity.evaluate(zoom),
            }
        } else {
            RenderDecision::Icon
        }
    }

    /// Applies the zoom decision uniformly to every stored feature
    pub fn decide_all(&self, store: &FeatureStore, zoom: f64) -> Vec<FeatureDecision> {
        let decision = self.select(zoom);
        store
            .iter()
            .enumerate()
            .map(|(index, point)| FeatureDecision {
                index,
                point: *point,
                decision,
            })
            .collect()
    }
}

/// Rejects NaN and infinite zooms, which no layer range can place
pub fn check_zoom(zoom: f64) -> Result<f64> {
    if zoom.is_finite() {
        Ok(zoom)
    } else {
        Err(Error::InvalidZoom(zoom))
    }
}

/// Selects the representation for `zoom` using the reference curves around `threshold`.
///
/// Fails with [`Error::InvalidZoom`] for a non-finite zoom and with
/// [`Error::InvalidControlPoints`] when the threshold is too low for the
/// radius curve to stay ascending (3 or below).
pub fn select_representation(zoom: f64, threshold: SwitchThreshold) -> Result<RenderDecision> {
    check_zoom(zoom)?;
    let config = TransitionConfig::default().with_switch_zoom(threshold.value());
    Ok(RepresentationSelector::new(&config)?.select(zoom))
}
