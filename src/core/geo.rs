use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A geographic point in degrees, stored longitude first like GeoJSON
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    lng: f64,
    lat: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting coordinates outside the WGS84 ranges
    pub fn new(lng: f64, lat: f64) -> Result<Self> {
        let point = Self { lng, lat };
        if !point.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "({}, {}) is outside lng [-180, 180] / lat [-90, 90]",
                lng, lat
            )));
        }
        Ok(point)
    }

    /// Creates a point from a compile-time literal that is known to be in range
    pub(crate) const fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Reads a GeoJSON position; values past `[lng, lat]`, such as altitude, are ignored
    pub fn from_position(position: &[f64]) -> Result<Self> {
        match position {
            [lng, lat, ..] => Self::new(*lng, *lat),
            _ => Err(Error::ParseError(format!(
                "position {:?} needs at least 2 coordinates",
                position
            ))),
        }
    }

    /// GeoJSON position order: `[lng, lat]`
    pub fn to_position(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = Error;

    fn try_from([lng, lat]: [f64; 2]) -> Result<Self> {
        GeoPoint::new(lng, lat)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        point.to_position()
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo_types::Point::new(point.lng, point.lat)
    }
}

impl TryFrom<geo_types::Point<f64>> for GeoPoint {
    type Error = Error;

    fn try_from(point: geo_types::Point<f64>) -> Result<Self> {
        GeoPoint::new(point.x(), point.y())
    }
}

/// Axis-aligned bounding box of geographic points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &GeoPoint) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::from_lng_lat(
            (self.south_west.lng + self.north_east.lng) / 2.0,
            (self.south_west.lat + self.north_east.lat) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_creation() {
        let point = GeoPoint::new(135.51, 34.68).unwrap();
        assert_eq!(point.lng(), 135.51);
        assert_eq!(point.lat(), 34.68);
        assert_eq!(point.to_position(), [135.51, 34.68]);
    }

    #[test]
    fn test_from_position_ignores_altitude() {
        let point = GeoPoint::from_position(&[135.51, 34.68, 12.5]).unwrap();
        assert_eq!(point.to_position(), [135.51, 34.68]);

        assert!(matches!(
            GeoPoint::from_position(&[135.51]),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            GeoPoint::from_position(&[]),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            GeoPoint::from_position(&[200.0, 0.0, 0.0]),
            Err(Error::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_geo_point_rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::new(181.0, 0.0),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -90.5),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-180.0, 90.0).is_ok());
    }

    #[test]
    fn test_geo_types_conversion() {
        let point = GeoPoint::new(-74.006, 40.7128).unwrap();
        let geo: geo_types::Point<f64> = point.into();
        assert_eq!(geo.x(), -74.006);
        assert_eq!(geo.y(), 40.7128);

        let back = GeoPoint::try_from(geo).unwrap();
        assert_eq!(back, point);
        assert!(GeoPoint::try_from(geo_types::Point::new(200.0, 0.0)).is_err());
    }

    #[test]
    fn test_serde_as_position() {
        let point = GeoPoint::new(135.5, 34.6).unwrap();
        assert_eq!(serde_json::to_string(&point).unwrap(), "[135.5,34.6]");
        assert_eq!(serde_json::from_str::<GeoPoint>("[135.5,34.6]").unwrap(), point);
        assert!(serde_json::from_str::<GeoPoint>("[35.0,135.0]").is_err());
    }

    #[test]
    fn test_bounds_extend_and_contains() {
        let mut bounds = GeoBounds::from_point(GeoPoint::new(10.0, 10.0).unwrap());
        bounds.extend(&GeoPoint::new(12.0, 8.0).unwrap());

        assert!(bounds.contains(&GeoPoint::new(11.0, 9.0).unwrap()));
        assert!(!bounds.contains(&GeoPoint::new(13.0, 9.0).unwrap()));
        assert_eq!(bounds.center(), GeoPoint::new(11.0, 9.0).unwrap());
    }
}
