use crate::{
    core::config::StyleIds,
    host::HostEngine,
    layers::{base::StyleLayer, selector::RenderDecision},
    prelude::HashMap,
    style::transition::{resolve_decision, GeoJsonSource, IconImage},
    Error, Result,
};

/// In-memory host style: images, sources and layers, with layers kept in draw order
#[derive(Debug, Default)]
pub struct StyleRegistry {
    images: HashMap<String, Vec<u8>>,
    sources: HashMap<String, GeoJsonSource>,
    /// All layers indexed by ID
    layers: HashMap<String, StyleLayer>,
    /// Layer IDs in registration order, which is also draw order
    render_order: Vec<String>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&StyleLayer> {
        self.layers.get(layer_id)
    }

    pub fn get_source(&self, source_id: &str) -> Option<&GeoJsonSource> {
        self.sources.get(source_id)
    }

    pub fn get_image(&self, image_id: &str) -> Option<&[u8]> {
        self.images.get(image_id).map(Vec::as_slice)
    }

    /// Removes a layer, returning it if it was registered
    pub fn take_layer(&mut self, layer_id: &str) -> Option<StyleLayer> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets all layers in draw order
    pub fn layers(&self) -> Vec<&StyleLayer> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id))
            .collect()
    }

    pub fn active_layers(&self, zoom: f64) -> Vec<&StyleLayer> {
        self.layers()
            .into_iter()
            .filter(|layer| layer.is_active_at(zoom))
            .collect()
    }

    /// What the registered transition layers would draw at `zoom`
    pub fn decision_at(&self, ids: &StyleIds, zoom: f64) -> Result<RenderDecision> {
        resolve_decision(self.layers(), ids, zoom)
    }

    /// Drops everything, as a host does when it swaps in a new base style
    pub fn clear(&mut self) {
        self.images.clear();
        self.sources.clear();
        self.layers.clear();
        self.render_order.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn to_style_json(&self) -> Result<serde_json::Value> {
        let mut sources = serde_json::Map::new();
        let mut source_ids: Vec<&String> = self.sources.keys().collect();
        source_ids.sort();
        for id in source_ids {
            sources.insert(id.clone(), serde_json::to_value(&self.sources[id])?);
        }

        Ok(serde_json::json!({
            "sources": sources,
            "layers": serde_json::to_value(self.layers())?,
        }))
    }
}

impl HostEngine for StyleRegistry {
    fn has_image(&self, image_id: &str) -> bool {
        self.images.contains_key(image_id)
    }

    fn has_source(&self, source_id: &str) -> bool {
        self.sources.contains_key(source_id)
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    fn add_image(&mut self, image: &IconImage) -> Result<()> {
        self.images.insert(image.id.clone(), image.bytes.clone());
        Ok(())
    }

    fn add_source(&mut self, source: &GeoJsonSource) -> Result<()> {
        if self.sources.contains_key(&source.id) {
            return Err(Error::Layer(format!(
                "source '{}' is already registered",
                source.id
            )));
        }
        self.sources.insert(source.id.clone(), source.clone());
        Ok(())
    }

    fn add_layer(&mut self, layer: StyleLayer) -> Result<()> {
        if self.layers.contains_key(&layer.id) {
            return Err(Error::Layer(format!(
                "layer '{}' is already registered",
                layer.id
            )));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(Error::Layer(format!(
                "layer '{}' references unknown source '{}'",
                layer.id, layer.source
            )));
        }

        self.render_order.push(layer.id.clone());
        self.layers.insert(layer.id.clone(), layer);
        Ok(())
    }

    fn remove_image(&mut self, image_id: &str) -> Result<()> {
        self.images
            .remove(image_id)
            .map(|_| ())
            .ok_or_else(|| Error::Layer(format!("image '{}' is not registered", image_id)))
    }

    /// Fails while any layer still draws from the source
    fn remove_source(&mut self, source_id: &str) -> Result<()> {
        if let Some(layer) = self.layers.values().find(|l| l.source == source_id) {
            return Err(Error::Layer(format!(
                "source '{}' is still used by layer '{}'",
                source_id, layer.id
            )));
        }
        self.sources
            .remove(source_id)
            .map(|_| ())
            .ok_or_else(|| Error::Layer(format!("source '{}' is not registered", source_id)))
    }

    fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        self.take_layer(layer_id)
            .map(|_| ())
            .ok_or_else(|| Error::Layer(format!("layer '{}' is not registered", layer_id)))
    }
}
