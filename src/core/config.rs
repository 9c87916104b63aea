//! Configuration for the circle-to-icon transition
//!
//! Every field has a default matching the reference sample, so a JSON config
//! only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    animation::interpolation::{ControlPoint, ZoomCurve},
    core::constants,
    layers::selector::SwitchThreshold,
    style::color::Color,
    Error, Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Style URL the host loads before the transition layers; `null` leaves the choice to the host
    pub base_style: Option<String>,
    /// Zoom at which circles give way to icons
    pub switch_zoom: f64,
    pub radius: RadiusCurveConfig,
    /// Width of the zoom band before the switch in which the shadow fades in
    pub shadow_fade_width: f64,
    pub base_circle_color: Color,
    pub shadow_circle_color: Color,
    pub icon: IconConfig,
    pub ids: StyleIds,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            base_style: Some(constants::DEFAULT_BASE_STYLE.to_string()),
            switch_zoom: constants::DEFAULT_SWITCH_ZOOM,
            radius: RadiusCurveConfig::default(),
            shadow_fade_width: constants::SHADOW_FADE_WIDTH,
            base_circle_color: constants::BASE_CIRCLE_COLOR,
            shadow_circle_color: constants::SHADOW_CIRCLE_COLOR,
            icon: IconConfig::default(),
            ids: StyleIds::default(),
        }
    }
}

impl TransitionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_base_style(mut self, base_style: Option<String>) -> Self {
        self.base_style = base_style;
        self
    }

    pub fn with_switch_zoom(mut self, switch_zoom: f64) -> Self {
        self.switch_zoom = switch_zoom;
        self
    }

    pub fn with_shadow_fade_width(mut self, width: f64) -> Self {
        self.shadow_fade_width = width;
        self
    }

    pub fn threshold(&self) -> Result<SwitchThreshold> {
        SwitchThreshold::new(self.switch_zoom)
    }

    /// Base circle radius stops: `(0, r0), (t + mid_offset, mid), (t, r_switch)`
    pub fn radius_stops(&self) -> Vec<ControlPoint> {
        let t = self.switch_zoom;
        vec![
            ControlPoint::new(0.0, self.radius.at_zoom_zero),
            ControlPoint::new(t + self.radius.mid_offset, self.radius.mid),
            ControlPoint::new(t, self.radius.at_switch),
        ]
    }

    /// Shadow opacity stops: `(t - fade_width, 0), (t, 1)`
    pub fn shadow_opacity_stops(&self) -> Vec<ControlPoint> {
        let t = self.switch_zoom;
        vec![
            ControlPoint::new(t - self.shadow_fade_width, 0.0),
            ControlPoint::new(t, 1.0),
        ]
    }

    pub fn radius_curve(&self) -> Result<ZoomCurve> {
        ZoomCurve::new(self.radius_stops())
    }

    pub fn shadow_opacity_curve(&self) -> Result<ZoomCurve> {
        ZoomCurve::new(self.shadow_opacity_stops())
    }

    /// Checks everything that would otherwise fail later at style setup
    pub fn validate(&self) -> Result<()> {
        if self.base_style.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(Error::Layer("base style url must not be empty".to_string()));
        }
        self.threshold()?;
        self.radius_curve()?;
        self.shadow_opacity_curve()?;
        self.ids.validate()
    }
}

/// Radius curve, with the middle stop expressed relative to the switch zoom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RadiusCurveConfig {
    pub at_zoom_zero: f64,
    pub mid_offset: f64,
    pub mid: f64,
    pub at_switch: f64,
}

impl Default for RadiusCurveConfig {
    fn default() -> Self {
        Self {
            at_zoom_zero: constants::BASE_RADIUS_AT_ZOOM_0,
            mid_offset: constants::BASE_RADIUS_MID_OFFSET,
            mid: constants::BASE_RADIUS_MID,
            at_switch: constants::BASE_RADIUS_AT_SWITCH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    pub allow_overlap: bool,
    pub ignore_placement: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            allow_overlap: true,
            ignore_placement: true,
        }
    }
}

/// Identifiers the host engine uses to address the registered style objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleIds {
    pub source: String,
    pub base_circle_layer: String,
    pub shadow_circle_layer: String,
    pub icon_layer: String,
    pub icon_image: String,
}

impl Default for StyleIds {
    fn default() -> Self {
        Self {
            source: constants::SOURCE_ID.to_string(),
            base_circle_layer: constants::BASE_CIRCLE_LAYER_ID.to_string(),
            shadow_circle_layer: constants::SHADOW_CIRCLE_LAYER_ID.to_string(),
            icon_layer: constants::ICON_LAYER_ID.to_string(),
            icon_image: constants::ICON_IMAGE_ID.to_string(),
        }
    }
}

impl StyleIds {
    fn validate(&self) -> Result<()> {
        let ids = [
            &self.source,
            &self.base_circle_layer,
            &self.shadow_circle_layer,
            &self.icon_layer,
            &self.icon_image,
        ];
        if ids.iter().any(|id| id.is_empty()) {
            return Err(Error::Layer("style ids must not be empty".to_string()));
        }

        let layers = [
            &self.base_circle_layer,
            &self.shadow_circle_layer,
            &self.icon_layer,
        ];
        for (i, a) in layers.iter().enumerate() {
            if layers[i + 1..].contains(a) {
                return Err(Error::Layer(format!("duplicate layer id '{}'", a)));
            }
        }
        Ok(())
    }
}
