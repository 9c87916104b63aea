//! Translation of the selector into the three style layers a host engine evaluates.
//!
//! The base and shadow circle layers stop at the switch zoom (exclusive) and
//! the icon layer starts there (inclusive), so the activation ranges encode
//! the same branch the selector takes. Radius and opacity curves are emitted
//! as `interpolate` expressions over the selector's control points.

use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    core::config::{StyleIds, TransitionConfig},
    data::{features::FeatureStore, geojson::GeoJson},
    layers::{
        base::StyleLayer,
        selector::{check_zoom, RenderDecision},
    },
    Error, Result,
};

pub const CIRCLE_COLOR: &str = "circle-color";
pub const CIRCLE_RADIUS: &str = "circle-radius";
pub const CIRCLE_OPACITY: &str = "circle-opacity";
pub const ICON_IMAGE: &str = "icon-image";
pub const ICON_ALLOW_OVERLAP: &str = "icon-allow-overlap";
pub const ICON_IGNORE_PLACEMENT: &str = "icon-ignore-placement";

/// Opaque icon bitmap registered with the host under `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub id: String,
    pub bytes: Vec<u8>,
}

impl IconImage {
    pub fn new(id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceType {
    #[serde(rename = "geojson")]
    GeoJson,
}

/// Inline GeoJSON source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonSource {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub data: GeoJson,
}

impl GeoJsonSource {
    pub fn new(id: impl Into<String>, data: GeoJson) -> Self {
        Self {
            id: id.into(),
            source_type: SourceType::GeoJson,
            data,
        }
    }
}

/// Everything registered with the host once its style is ready
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionStyle {
    base_style: Option<String>,
    ids: StyleIds,
    icon: IconImage,
    source: GeoJsonSource,
    layers: Vec<StyleLayer>,
}

impl TransitionStyle {
    pub fn build(
        config: &TransitionConfig,
        store: &FeatureStore,
        icon_bytes: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        config.validate()?;
        let switch_zoom = config.threshold()?.value();
        let ids = config.ids.clone();

        let base_circle = StyleLayer::circle(&ids.base_circle_layer, &ids.source)
            .with_paint(CIRCLE_COLOR, config.base_circle_color)
            .with_paint(CIRCLE_RADIUS, config.radius_curve()?)
            .with_max_zoom(switch_zoom);

        let shadow_circle = StyleLayer::circle(&ids.shadow_circle_layer, &ids.source)
            .with_paint(CIRCLE_COLOR, config.shadow_circle_color)
            .with_paint(CIRCLE_OPACITY, config.shadow_opacity_curve()?)
            .with_max_zoom(switch_zoom);

        let icon_layer = StyleLayer::symbol(&ids.icon_layer, &ids.source)
            .with_layout(ICON_IMAGE, ids.icon_image.as_str())
            .with_layout(ICON_ALLOW_OVERLAP, config.icon.allow_overlap)
            .with_layout(ICON_IGNORE_PLACEMENT, config.icon.ignore_placement)
            .with_min_zoom(switch_zoom);

        Ok(Self {
            base_style: config.base_style.clone(),
            icon: IconImage::new(&ids.icon_image, icon_bytes),
            source: GeoJsonSource::new(&ids.source, store.to_geojson()),
            layers: vec![base_circle, shadow_circle, icon_layer],
            ids,
        })
    }

    /// Style URL the host should load underneath the transition layers
    pub fn base_style(&self) -> Option<&str> {
        self.base_style.as_deref()
    }

    pub fn ids(&self) -> &StyleIds {
        &self.ids
    }

    pub fn icon(&self) -> &IconImage {
        &self.icon
    }

    pub fn source(&self) -> &GeoJsonSource {
        &self.source
    }

    /// Layers in registration (draw) order: base circle, shadow circle, icon
    pub fn layers(&self) -> &[StyleLayer] {
        &self.layers
    }

    pub fn layer(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn active_layers(&self, zoom: f64) -> Vec<&StyleLayer> {
        self.layers.iter().filter(|l| l.is_active_at(zoom)).collect()
    }

    /// What a host evaluating these layers would draw at `zoom`
    pub fn decision_at(&self, zoom: f64) -> Result<RenderDecision> {
        resolve_decision(&self.layers, &self.ids, zoom)
    }

    /// Style fragment with `sources` and `layers`, ready to merge into a base style
    pub fn to_json(&self) -> Result<Value> {
        let mut sources = serde_json::Map::new();
        sources.insert(self.source.id.clone(), serde_json::to_value(&self.source)?);

        Ok(json!({
            "sources": sources,
            "layers": serde_json::to_value(&self.layers)?,
        }))
    }
}

/// Recovers the render decision from the transition layers active at `zoom`
pub fn resolve_decision<'a, I>(layers: I, ids: &StyleIds, zoom: f64) -> Result<RenderDecision>
where
    I: IntoIterator<Item = &'a StyleLayer>,
{
    check_zoom(zoom)?;
    let mut base = None;
    let mut shadow = None;
    let mut icon = false;

    for layer in layers.into_iter().filter(|l| l.is_active_at(zoom)) {
        if layer.id == ids.base_circle_layer {
            base = Some(layer);
        } else if layer.id == ids.shadow_circle_layer {
            shadow = Some(layer);
        } else if layer.id == ids.icon_layer {
            icon = true;
        }
    }

    if icon {
        return Ok(RenderDecision::Icon);
    }

    let base = base.ok_or_else(|| {
        Error::Layer(format!("no marker layer is active at zoom {}", zoom))
    })?;
    let shadow_opacity = match shadow {
        Some(layer) => layer.evaluate_paint(CIRCLE_OPACITY, zoom)?,
        None => 0.0,
    };

    Ok(RenderDecision::Circle {
        radius: base.evaluate_paint(CIRCLE_RADIUS, zoom)?,
        shadow_opacity,
    })
}
