//! # marker-transition
//!
//! Zoom-driven transition between circle markers and icon markers.
//!
//! Below a switch zoom, point features are drawn as circles whose radius grows
//! with zoom, with a grey shadow circle fading in just before the switch. From
//! the switch zoom on, the circles give way to icons. The selection logic is a
//! pair of pure functions ([`interpolate`] and [`select_representation`]) that
//! can be tested on their own, and [`TransitionStyle`] translates it into the
//! declarative layers a map rendering engine evaluates itself.

pub mod animation;
pub mod core;
pub mod data;
pub mod host;
pub mod layers;
pub mod prelude;
pub mod style;
pub use crate::core::constants;

// Re-export public API
pub use animation::interpolation::{interpolate, ControlPoint, ZoomCurve};

pub use crate::core::{config::TransitionConfig, geo::GeoPoint};

pub use data::features::FeatureStore;

pub use layers::{
    base::{LayerType, StyleLayer},
    manager::StyleRegistry,
    selector::{
        select_representation, FeatureDecision, RenderDecision, RepresentationSelector,
        SwitchThreshold, Variant,
    },
};

pub use host::{HostEngine, TransitionController};

pub use style::{color::Color, expression::Expression, transition::TransitionStyle};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid control points: {0}")]
    InvalidControlPoints(String),

    #[error("Index {index} out of range for {len} features")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid switch threshold: {0} (must be a finite zoom above 0)")]
    InvalidThreshold(f64),

    #[error("Invalid zoom: {0} (must be finite)")]
    InvalidZoom(f64),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Expression error: {0}")]
    Expression(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Style is not loaded yet")]
    StyleNotReady,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
