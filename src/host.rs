//! Boundary with the external rendering engine.
//!
//! The engine owns drawing and evaluates style expressions per frame. This
//! side only registers the transition once the engine's style is ready and
//! mirrors the engine's per-zoom choice through the selector. Callbacks are
//! expected one at a time, as the engine serializes them.

use crate::{
    core::config::TransitionConfig,
    data::features::FeatureStore,
    layers::{
        base::StyleLayer,
        selector::{check_zoom, FeatureDecision, RenderDecision, RepresentationSelector},
    },
    style::transition::{GeoJsonSource, IconImage, TransitionStyle},
    Error, Result,
};

pub use crate::layers::manager::StyleRegistry;

/// What the transition needs from a host engine's style
pub trait HostEngine {
    fn has_image(&self, image_id: &str) -> bool;

    fn has_source(&self, source_id: &str) -> bool;

    fn has_layer(&self, layer_id: &str) -> bool;

    /// Adds or replaces an image
    fn add_image(&mut self, image: &IconImage) -> Result<()>;

    fn add_source(&mut self, source: &GeoJsonSource) -> Result<()>;

    fn add_layer(&mut self, layer: StyleLayer) -> Result<()>;

    fn remove_image(&mut self, image_id: &str) -> Result<()>;

    fn remove_source(&mut self, source_id: &str) -> Result<()>;

    fn remove_layer(&mut self, layer_id: &str) -> Result<()>;
}

/// Objects added so far during one registration, for rollback
#[derive(Default)]
struct Registered {
    image: Option<String>,
    source: Option<String>,
    layers: Vec<String>,
}

impl Registered {
    fn rollback(self, host: &mut dyn HostEngine) {
        let mut results = Vec::new();
        for id in self.layers.iter().rev() {
            results.push(host.remove_layer(id));
        }
        if let Some(id) = &self.source {
            results.push(host.remove_source(id));
        }
        if let Some(id) = &self.image {
            results.push(host.remove_image(id));
        }

        for e in results.into_iter().filter_map(|r| r.err()) {
            log::warn!("rollback after failed registration left an object behind: {}", e);
        }
    }
}

fn check_collisions(host: &dyn HostEngine, style: &TransitionStyle) -> Result<()> {
    if host.has_source(&style.source().id) {
        return Err(Error::Layer(format!(
            "source '{}' is already registered",
            style.source().id
        )));
    }
    if let Some(layer) = style.layers().iter().find(|l| host.has_layer(&l.id)) {
        return Err(Error::Layer(format!(
            "layer '{}' is already registered",
            layer.id
        )));
    }
    Ok(())
}

fn register(
    host: &mut dyn HostEngine,
    style: &TransitionStyle,
    registered: &mut Registered,
) -> Result<()> {
    let icon = style.icon();
    // A pre-existing image is replaced, not owned, so it is never rolled back.
    let image_existed = host.has_image(&icon.id);
    host.add_image(icon)?;
    if !image_existed {
        registered.image = Some(icon.id.clone());
    }

    host.add_source(style.source())?;
    registered.source = Some(style.source().id.clone());

    for layer in style.layers() {
        host.add_layer(layer.clone())?;
        registered.layers.push(layer.id.clone());
    }
    Ok(())
}

/// Lifecycle glue between a host engine and the transition
pub struct TransitionController {
    config: TransitionConfig,
    store: FeatureStore,
    icon_bytes: Vec<u8>,
    selector: RepresentationSelector,
    style_ready: bool,
    last_decision: Option<RenderDecision>,
}

impl TransitionController {
    /// Validates the configuration; nothing is registered until the style is ready
    pub fn new(
        config: TransitionConfig,
        store: FeatureStore,
        icon_bytes: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        config.validate()?;
        let selector = RepresentationSelector::new(&config)?;

        Ok(Self {
            config,
            store,
            icon_bytes: icon_bytes.into(),
            selector,
            style_ready: false,
            last_decision: None,
        })
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn selector(&self) -> &RepresentationSelector {
        &self.selector
    }

    pub fn is_style_ready(&self) -> bool {
        self.style_ready
    }

    /// Registers the icon image, the point source and the three layers.
    ///
    /// Call once per style-ready event; a host that reloads its style drops
    /// earlier registrations and signals readiness again. Colliding ids are
    /// rejected before anything is written, and a host error midway removes
    /// whatever this call had added, so a failed call can be retried.
    pub fn on_style_loaded(&mut self, host: &mut dyn HostEngine) -> Result<TransitionStyle> {
        let style = TransitionStyle::build(&self.config, &self.store, self.icon_bytes.clone())?;
        check_collisions(host, &style)?;

        let mut registered = Registered::default();
        if let Err(e) = register(host, &style, &mut registered) {
            registered.rollback(host);
            return Err(e);
        }

        log::info!(
            "registered {} layers over {} features (switch zoom {})",
            style.layers().len(),
            self.store.len(),
            self.selector.threshold().value()
        );

        self.style_ready = true;
        self.last_decision = None;
        Ok(style)
    }

    /// Decision for the new zoom, shared by every feature
    pub fn on_zoom_changed(&mut self, zoom: f64) -> Result<RenderDecision> {
        if !self.style_ready {
            return Err(Error::StyleNotReady);
        }
        check_zoom(zoom)?;

        let decision = self.selector.select(zoom);
        if let Some(previous) = self.last_decision {
            if previous.is_icon() != decision.is_icon() {
                log::debug!(
                    "zoom {:.2} crossed switch zoom {}: now drawing {:?}",
                    zoom,
                    self.selector.threshold().value(),
                    decision.active_variants()
                );
            }
        }
        self.last_decision = Some(decision);
        Ok(decision)
    }

    /// Per-feature decisions for the new zoom
    pub fn decisions(&mut self, zoom: f64) -> Result<Vec<FeatureDecision>> {
        self.on_zoom_changed(zoom)?;
        Ok(self.selector.decide_all(&self.store, zoom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{ICON_LAYER_ID, SOURCE_ID};
    use crate::data::geojson::{FeatureCollection, GeoJson};

    /// Registry whose `fail_on`-th layer registration is refused
    struct FlakyHost {
        inner: StyleRegistry,
        layers_added: usize,
        fail_on: usize,
    }

    impl HostEngine for FlakyHost {
        fn has_image(&self, image_id: &str) -> bool {
            self.inner.has_image(image_id)
        }

        fn has_source(&self, source_id: &str) -> bool {
            self.inner.has_source(source_id)
        }

        fn has_layer(&self, layer_id: &str) -> bool {
            self.inner.has_layer(layer_id)
        }

        fn add_image(&mut self, image: &IconImage) -> Result<()> {
            self.inner.add_image(image)
        }

        fn add_source(&mut self, source: &GeoJsonSource) -> Result<()> {
            self.inner.add_source(source)
        }

        fn add_layer(&mut self, layer: StyleLayer) -> Result<()> {
            self.layers_added += 1;
            if self.layers_added == self.fail_on {
                return Err(Error::Layer(format!("engine refused layer '{}'", layer.id)));
            }
            self.inner.add_layer(layer)
        }

        fn remove_image(&mut self, image_id: &str) -> Result<()> {
            self.inner.remove_image(image_id)
        }

        fn remove_source(&mut self, source_id: &str) -> Result<()> {
            self.inner.remove_source(source_id)
        }

        fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
            self.inner.remove_layer(layer_id)
        }
    }

    fn controller() -> TransitionController {
        TransitionController::new(TransitionConfig::default(), FeatureStore::load(), vec![7u8; 16])
            .unwrap()
    }

    #[test]
    fn test_zoom_before_style_ready_fails() {
        let mut controller = controller();
        assert!(!controller.is_style_ready());
        assert!(matches!(
            controller.on_zoom_changed(10.0),
            Err(Error::StyleNotReady)
        ));
    }

    #[test]
    fn test_style_loaded_registers_everything() {
        let mut controller = controller();
        let mut host = StyleRegistry::new();
        controller.on_style_loaded(&mut host).unwrap();

        assert!(controller.is_style_ready());
        assert_eq!(host.len(), 3);
        assert_eq!(host.get_image("ICON_ID").map(<[u8]>::len), Some(16));
        assert!(host.get_source("SOURCE_ID").is_some());
        assert_eq!(controller.on_zoom_changed(15.0).unwrap(), RenderDecision::Icon);
    }

    #[test]
    fn test_reload_needs_fresh_host_style() {
        let mut controller = controller();
        let mut host = StyleRegistry::new();
        controller.on_style_loaded(&mut host).unwrap();

        // Registering twice into the same style collides on ids.
        assert!(matches!(
            controller.on_style_loaded(&mut host),
            Err(Error::Layer(_))
        ));

        host.clear();
        controller.on_style_loaded(&mut host).unwrap();
        assert_eq!(host.len(), 3);
    }

    #[test]
    fn test_colliding_layer_leaves_host_untouched() {
        let mut controller = controller();
        let mut host = StyleRegistry::new();
        host.add_source(&GeoJsonSource::new(
            SOURCE_ID,
            GeoJson::FeatureCollection(FeatureCollection::new(Vec::new())),
        ))
        .unwrap();
        host.add_layer(StyleLayer::symbol(ICON_LAYER_ID, SOURCE_ID)).unwrap();

        assert!(matches!(
            controller.on_style_loaded(&mut host),
            Err(Error::Layer(_))
        ));
        assert!(!controller.is_style_ready());
        assert_eq!(host.len(), 1);
        assert!(!host.has_image("ICON_ID"));
        assert!(!host.has_layer("BASE_CIRCLE_LAYER_ID"));

        // Once the engine drops its own objects the retry goes through.
        host.remove_layer(ICON_LAYER_ID).unwrap();
        host.remove_source(SOURCE_ID).unwrap();
        let style = controller.on_style_loaded(&mut host).unwrap();
        assert_eq!(host.len(), 3);
        assert_eq!(host.to_style_json().unwrap(), style.to_json().unwrap());
    }

    #[test]
    fn test_failed_registration_is_rolled_back() {
        let mut controller = controller();
        let mut host = FlakyHost {
            inner: StyleRegistry::new(),
            layers_added: 0,
            fail_on: 2,
        };

        assert!(matches!(
            controller.on_style_loaded(&mut host),
            Err(Error::Layer(_))
        ));
        assert!(host.inner.is_empty());
        assert!(!host.inner.has_source(SOURCE_ID));
        assert!(!host.inner.has_image("ICON_ID"));

        controller.on_style_loaded(&mut host).unwrap();
        assert_eq!(host.inner.len(), 3);
        assert!(controller.is_style_ready());
    }

    #[test]
    fn test_rollback_keeps_preexisting_image() {
        let mut controller = controller();
        let mut host = FlakyHost {
            inner: StyleRegistry::new(),
            layers_added: 0,
            fail_on: 1,
        };
        host.inner.add_image(&IconImage::new("ICON_ID", vec![1, 2])).unwrap();

        assert!(controller.on_style_loaded(&mut host).is_err());
        assert!(host.inner.has_image("ICON_ID"));
        assert!(!host.inner.has_source(SOURCE_ID));
    }

    #[test]
    fn test_non_finite_zoom_keeps_last_decision() {
        let mut controller = controller();
        controller.on_style_loaded(&mut StyleRegistry::new()).unwrap();
        controller.on_zoom_changed(4.0).unwrap();

        assert!(matches!(
            controller.on_zoom_changed(f64::NAN),
            Err(Error::InvalidZoom(_))
        ));
        assert!(matches!(
            controller.decisions(f64::INFINITY),
            Err(Error::InvalidZoom(_))
        ));
        assert_eq!(controller.last_decision, Some(controller.selector().select(4.0)));
    }

    #[test]
    fn test_decisions_cover_every_feature() {
        let mut controller = controller();
        controller.on_style_loaded(&mut StyleRegistry::new()).unwrap();

        let decisions = controller.decisions(4.0).unwrap();
        assert_eq!(decisions.len(), 6);
        assert!(decisions.iter().all(|d| !d.decision.is_icon()));
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = TransitionConfig::default().with_shadow_fade_width(0.0);
        assert!(matches!(
            TransitionController::new(config, FeatureStore::load(), Vec::new()),
            Err(Error::InvalidControlPoints(_))
        ));
    }
}
