//! Reference defaults for the circle-to-icon transition.
//! Keeping them in a single place makes it easier to tweak the tuning constants.

use crate::{core::geo::GeoPoint, style::color::Color};

/// Zoom at which markers switch from circles to icons.
pub const DEFAULT_SWITCH_ZOOM: f64 = 12.0;

/// Base circle radius curve as `(offset from the switch zoom, radius)`.
/// The first stop is anchored at absolute zoom 0 rather than at an offset.
pub const BASE_RADIUS_AT_ZOOM_0: f64 = 2.0;
pub const BASE_RADIUS_MID_OFFSET: f64 = -3.0;
pub const BASE_RADIUS_MID: f64 = 5.0;
pub const BASE_RADIUS_AT_SWITCH: f64 = 12.0;

/// Width, in zoom units, of the band before the switch in which the shadow fades in.
pub const SHADOW_FADE_WIDTH: f64 = 1.1;

/// `#3BC802`
pub const BASE_CIRCLE_COLOR: Color = Color::from_rgb(0x3b, 0xc8, 0x02);
/// `#AAAAAA`
pub const SHADOW_CIRCLE_COLOR: Color = Color::from_rgb(0xaa, 0xaa, 0xaa);

/// Dark base map the markers are drawn over
pub const DEFAULT_BASE_STYLE: &str = "mapbox://styles/mapbox/dark-v10";

pub const SOURCE_ID: &str = "SOURCE_ID";
pub const ICON_LAYER_ID: &str = "ICON_LAYER_ID";
pub const BASE_CIRCLE_LAYER_ID: &str = "BASE_CIRCLE_LAYER_ID";
pub const SHADOW_CIRCLE_LAYER_ID: &str = "SHADOW_CIRCLE_LAYER_ID";
pub const ICON_IMAGE_ID: &str = "ICON_ID";

/// Reference point set (Osaka ATMs), in insertion order.
pub const REFERENCE_POINTS: [GeoPoint; 6] = [
    GeoPoint::from_lng_lat(135.5101776123047, 34.67839374011646),
    GeoPoint::from_lng_lat(135.5486297607422, 34.71170250154446),
    GeoPoint::from_lng_lat(135.56854248046875, 34.67839374011646),
    GeoPoint::from_lng_lat(135.51223754882812, 34.621342549943115),
    GeoPoint::from_lng_lat(135.54588317871094, 34.65410941913741),
    GeoPoint::from_lng_lat(135.59051513671875, 34.63490282449189),
];
