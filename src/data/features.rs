//! Immutable collection of the point features that get styled.

use crate::{
    core::{
        constants::REFERENCE_POINTS,
        geo::{GeoBounds, GeoPoint},
    },
    data::geojson::{FeatureCollection, GeoJson, GeoJsonFeature, GeoJsonGeometry},
    Error, Result,
};

/// Fixed set of geographic points, in insertion order.
///
/// There is no mutation API; a store is built once and then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStore {
    points: Vec<GeoPoint>,
}

impl FeatureStore {
    /// The reference data set of six points
    pub fn load() -> Self {
        Self {
            points: REFERENCE_POINTS.to_vec(),
        }
    }

    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let points: Vec<GeoPoint> = points.into_iter().collect();
        if let Some((index, point)) = points.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(Error::InvalidCoordinates(format!(
                "point {} at ({}, {}) is out of range",
                index,
                point.lng(),
                point.lat()
            )));
        }
        Ok(Self { points })
    }

    /// Builds a store from Point and MultiPoint features; any other geometry is rejected
    pub fn from_geojson(geojson: &GeoJson) -> Result<Self> {
        let mut points = Vec::new();

        for feature in geojson.features() {
            match &feature.geometry {
                Some(GeoJsonGeometry::Point { coordinates }) => {
                    points.push(GeoPoint::from_position(coordinates)?);
                }
                Some(GeoJsonGeometry::MultiPoint { coordinates }) => {
                    for position in coordinates {
                        points.push(GeoPoint::from_position(position)?);
                    }
                }
                Some(other) => {
                    return Err(Error::ParseError(format!(
                        "expected point features, found {}",
                        other.type_name()
                    )));
                }
                None => log::warn!("skipping feature without geometry"),
            }
        }

        Ok(Self { points })
    }

    pub fn from_geojson_str(geojson_str: &str) -> Result<Self> {
        let geojson: GeoJson = serde_json::from_str(geojson_str)
            .map_err(|e| Error::ParseError(format!("Invalid GeoJSON: {}", e)))?;
        Self::from_geojson(&geojson)
    }

    pub fn get(&self, index: usize) -> Result<GeoPoint> {
        self.points
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gets the bounding box of all points
    pub fn bounds(&self) -> Option<GeoBounds> {
        let (first, rest) = self.points.split_first()?;
        let mut bounds = GeoBounds::from_point(*first);
        for point in rest {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// One Point feature per stored point, in order
    pub fn to_geojson(&self) -> GeoJson {
        GeoJson::FeatureCollection(FeatureCollection::new(
            self.points
                .iter()
                .map(|p| {
                    GeoJsonFeature::from_geometry(GeoJsonGeometry::Point {
                        coordinates: p.to_position().to_vec(),
                    })
                })
                .collect(),
        ))
    }
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::load()
    }
}

impl<'a> IntoIterator for &'a FeatureStore {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
