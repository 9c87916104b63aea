pub mod base;
pub mod manager;
pub mod selector;

pub use base::{LayerType, StyleLayer};
pub use manager::StyleRegistry;
pub use selector::{
    select_representation, FeatureDecision, RenderDecision, RepresentationSelector,
    SwitchThreshold, Variant,
};
