use marker_transition::{
    prelude::*,
    style::transition::{CIRCLE_OPACITY, CIRCLE_RADIUS},
};

/// Integration tests that drive the transition the way a host engine would
#[cfg(test)]
mod transition_tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn zoom_sweep() -> impl Iterator<Item = f64> {
        (0..=220).map(|step| step as f64 * 0.1)
    }

    /// The emitted style must draw exactly what the selector decides, at every zoom
    #[test]
    fn test_style_matches_selector_across_zooms() {
        for config in [
            TransitionConfig::default(),
            TransitionConfig::default().with_switch_zoom(15.5),
            TransitionConfig::default()
                .with_switch_zoom(8.0)
                .with_shadow_fade_width(2.5),
        ] {
            let selector = RepresentationSelector::new(&config).unwrap();
            let style = TransitionStyle::build(&config, &FeatureStore::load(), Vec::new()).unwrap();

            for zoom in zoom_sweep() {
                let expected = selector.select(zoom);
                let actual = style.decision_at(zoom).unwrap();
                match (expected, actual) {
                    (RenderDecision::Icon, RenderDecision::Icon) => {}
                    (
                        RenderDecision::Circle {
                            radius: r1,
                            shadow_opacity: o1,
                        },
                        RenderDecision::Circle {
                            radius: r2,
                            shadow_opacity: o2,
                        },
                    ) => {
                        assert!((r1 - r2).abs() < 1e-12, "radius at zoom {zoom}");
                        assert!((o1 - o2).abs() < 1e-12, "opacity at zoom {zoom}");
                    }
                    (expected, actual) => {
                        panic!("zoom {zoom}: selector chose {expected:?}, style draws {actual:?}")
                    }
                }
            }
        }
    }

    #[test]
    fn test_reference_decisions() {
        let threshold = SwitchThreshold::default();

        let at_zero = select_representation(0.0, threshold).unwrap();
        assert_eq!(at_zero.radius(), Some(2.0));
        assert_eq!(at_zero.shadow_opacity(), Some(0.0));

        let at_nine = select_representation(9.0, threshold).unwrap();
        assert_eq!(at_nine.radius(), Some(5.0));
        assert_eq!(at_nine.shadow_opacity(), Some(0.0));

        let in_band = select_representation(11.5, threshold).unwrap();
        let radius = in_band.radius().unwrap();
        let opacity = in_band.shadow_opacity().unwrap();
        assert!(radius > 5.0 && radius < 12.0);
        assert!(opacity > 0.0 && opacity < 1.0);

        assert!(select_representation(12.0, threshold).unwrap().is_icon());
        assert!(select_representation(15.0, threshold).unwrap().is_icon());
    }

    #[test]
    fn test_shadow_fades_in_monotonically() {
        let selector = RepresentationSelector::new(&TransitionConfig::default()).unwrap();
        let mut previous = (0.0, 0.0);
        for zoom in zoom_sweep().take_while(|z| *z < 12.0) {
            let decision = selector.select(zoom);
            let current = (
                decision.radius().unwrap(),
                decision.shadow_opacity().unwrap(),
            );
            assert!(current.0 >= previous.0);
            assert!(current.1 >= previous.1);
            assert!((0.0..=1.0).contains(&current.1));
            previous = current;
        }
    }

    #[test]
    fn test_host_lifecycle() {
        init_logging();

        let mut controller = TransitionController::new(
            TransitionConfig::default(),
            FeatureStore::load(),
            b"\x89PNG".to_vec(),
        )
        .unwrap();
        let mut host = StyleRegistry::new();

        assert!(matches!(
            controller.on_zoom_changed(3.0),
            Err(MapError::StyleNotReady)
        ));

        let style = controller.on_style_loaded(&mut host).unwrap();
        assert_eq!(host.get_image("ICON_ID"), Some(&b"\x89PNG"[..]));
        assert_eq!(host.to_style_json().unwrap(), style.to_json().unwrap());

        let ids = controller.config().ids.clone();
        for zoom in [3.0, 10.95, 11.99, 12.0, 13.0, 11.0] {
            let decision = controller.on_zoom_changed(zoom).unwrap();
            assert_eq!(decision, host.decision_at(&ids, zoom).unwrap());
        }

        let base = host.get_layer("BASE_CIRCLE_LAYER_ID").unwrap();
        assert_eq!(base.evaluate_paint(CIRCLE_RADIUS, 10.5).unwrap(), 8.5);
        let shadow = host.get_layer("SHADOW_CIRCLE_LAYER_ID").unwrap();
        assert_eq!(shadow.evaluate_paint(CIRCLE_OPACITY, 10.0).unwrap(), 0.0);
    }

    #[test]
    fn test_config_file_and_custom_features() {
        init_logging();

        let path = std::env::temp_dir().join(format!(
            "marker-transition-config-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r##"{
                "base_style": "mapbox://styles/mapbox/light-v10",
                "switch_zoom": 14,
                "shadow_fade_width": 2,
                "shadow_circle_color": "#101010",
                "ids": { "source": "atms" }
            }"##,
        )
        .unwrap();
        let config = TransitionConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let store = FeatureStore::from_geojson_str(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "Point", "coordinates": [-0.1278, 51.5074, 35.0]}}
            ]}"#,
        )
        .unwrap();

        let style = TransitionStyle::build(&config, &store, Vec::new()).unwrap();
        assert_eq!(style.base_style(), Some("mapbox://styles/mapbox/light-v10"));
        let json = style.to_json().unwrap();
        assert!(json.get("base_style").is_none());
        assert_eq!(
            json["sources"]["atms"]["data"]["features"][0]["geometry"]["coordinates"],
            serde_json::json!([-0.1278, 51.5074])
        );
        assert_eq!(json["layers"][1]["paint"]["circle-color"], "#101010");
        assert_eq!(json["layers"][2]["minzoom"], 14.0);

        // Shadow band now starts at zoom 12.
        assert_eq!(style.decision_at(12.0).unwrap().shadow_opacity(), Some(0.0));
        assert_eq!(style.decision_at(13.0).unwrap().shadow_opacity(), Some(0.5));
        assert!(style.decision_at(14.0).unwrap().is_icon());
    }

    #[test]
    fn test_store_bounds_checks() {
        let store = FeatureStore::load();
        assert_eq!(store.len(), 6);
        assert!(store.get(5).is_ok());
        assert!(matches!(
            store.get(6),
            Err(MapError::IndexOutOfRange { index: 6, len: 6 })
        ));
    }
}
