use std::collections::BTreeMap;

use serde::Serialize;

use crate::{style::expression::Expression, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Circle,
    Symbol,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Circle => write!(f, "circle"),
            LayerType::Symbol => write!(f, "symbol"),
        }
    }
}

/// One declarative style layer drawing features from a source.
///
/// The layer is active for `min_zoom <= zoom < max_zoom`; a missing bound is open.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub source: String,
    #[serde(rename = "minzoom", skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    #[serde(rename = "maxzoom", skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub paint: BTreeMap<String, Expression>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub layout: BTreeMap<String, Expression>,
}

impl StyleLayer {
    pub fn new(id: impl Into<String>, layer_type: LayerType, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layer_type,
            source: source.into(),
            min_zoom: None,
            max_zoom: None,
            paint: BTreeMap::new(),
            layout: BTreeMap::new(),
        }
    }

    pub fn circle(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(id, LayerType::Circle, source)
    }

    pub fn symbol(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(id, LayerType::Symbol, source)
    }

    pub fn with_paint(mut self, property: &str, value: impl Into<Expression>) -> Self {
        self.paint.insert(property.to_string(), value.into());
        self
    }

    pub fn with_layout(mut self, property: &str, value: impl Into<Expression>) -> Self {
        self.layout.insert(property.to_string(), value.into());
        self
    }

    pub fn with_min_zoom(mut self, zoom: f64) -> Self {
        self.min_zoom = Some(zoom);
        self
    }

    pub fn with_max_zoom(mut self, zoom: f64) -> Self {
        self.max_zoom = Some(zoom);
        self
    }

    pub fn is_active_at(&self, zoom: f64) -> bool {
        self.min_zoom.map_or(true, |min| zoom >= min) && self.max_zoom.map_or(true, |max| zoom < max)
    }

    pub fn paint_property(&self, property: &str) -> Option<&Expression> {
        self.paint.get(property)
    }

    pub fn layout_property(&self, property: &str) -> Option<&Expression> {
        self.layout.get(property)
    }

    /// Evaluates a numeric paint property at `zoom`
    pub fn evaluate_paint(&self, property: &str, zoom: f64) -> Result<f64> {
        self.paint_property(property)
            .ok_or_else(|| {
                Error::Layer(format!(
                    "layer '{}' has no paint property '{}'",
                    self.id, property
                ))
            })?
            .evaluate(zoom)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
