use anyhow::Context;
use marker_transition::prelude::*;

/// Stand-in for the atm icon bitmap; the host treats it as opaque bytes.
const PLACEHOLDER_ICON: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Registers the transition into an in-memory host style and walks the zoom range.
///
/// Usage: `marker-transition-app [config.json]`
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => TransitionConfig::from_path(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => TransitionConfig::default(),
    };

    let store = FeatureStore::load();
    let mut controller = TransitionController::new(config, store, PLACEHOLDER_ICON)
        .context("invalid transition config")?;

    // The host signals style readiness once its base style has loaded.
    let mut host = StyleRegistry::new();
    let style = controller
        .on_style_loaded(&mut host)
        .context("failed to register transition layers")?;

    let output = serde_json::json!({
        "base_style": style.base_style(),
        "style": host.to_style_json()?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    let switch_zoom = controller.selector().threshold().value();
    println!("\nZoom sweep (switch at {}):", switch_zoom);

    let mut zoom = 0.0;
    while zoom <= switch_zoom + 3.0 {
        match controller.on_zoom_changed(zoom)? {
            RenderDecision::Circle {
                radius,
                shadow_opacity,
            } => println!(
                "  zoom {:>5.2}  circle  radius {:>6.3}  shadow opacity {:.3}",
                zoom, radius, shadow_opacity
            ),
            RenderDecision::Icon => println!("  zoom {:>5.2}  icon", zoom),
        }
        zoom += 0.5;
    }

    if let Some(bounds) = controller.store().bounds() {
        let center = bounds.center();
        log::info!(
            "{} features centered on ({:.5}, {:.5})",
            controller.store().len(),
            center.lng(),
            center.lat()
        );
    }

    Ok(())
}
