pub mod features;
pub mod geojson;

pub use features::FeatureStore;
pub use geojson::{FeatureCollection, GeoJson, GeoJsonFeature, GeoJsonGeometry, Position};
