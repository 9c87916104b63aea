//! Prelude module for common marker-transition types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use marker_transition::prelude::*;`

pub use crate::animation::interpolation::{interpolate, ControlPoint, Interpolation, ZoomCurve};

pub use crate::core::{
    config::{IconConfig, RadiusCurveConfig, StyleIds, TransitionConfig},
    geo::{GeoBounds, GeoPoint},
};

pub use crate::data::{
    features::FeatureStore,
    geojson::{FeatureCollection, GeoJson, GeoJsonFeature, GeoJsonGeometry},
};

pub use crate::layers::{
    base::{LayerType, StyleLayer},
    manager::StyleRegistry,
    selector::{
        select_representation, FeatureDecision, RenderDecision, RepresentationSelector,
        SwitchThreshold, Variant,
    },
};

pub use crate::style::{
    color::Color,
    expression::Expression,
    transition::{GeoJsonSource, IconImage, TransitionStyle},
};

pub use crate::host::{HostEngine, TransitionController};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
