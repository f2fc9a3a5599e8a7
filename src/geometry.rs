//! Geographic primitives: points, distances, and containment.
//!
//! Distances are haversine great-circle metres, the same unit the match and
//! close radii are configured in.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for haversine distances, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[allow(dead_code)]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other`, in metres.
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        distance(*self, *other)
    }
}

/// Haversine distance between two points, in metres.
pub fn distance(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// How a closed work zone decides whether a point is inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Containment {
    /// Axis-aligned bounding box of the zone's vertices.
    ///
    /// Accepts points in the box's corners that lie outside the drawn shape.
    #[default]
    Bounds,

    /// Exact even-odd polygon test.
    Polygon,
}

/// An inclusive lat/lng bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// The smallest box holding every point, or `None` for an empty slice.
    pub fn of(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self {
            south_west: *first,
            north_east: *first,
        };
        for p in rest {
            bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
        }
        Some(bounds)
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// Even-odd ray casting against a ring of vertices (implicitly closed).
pub fn polygon_contains(ring: &[LatLng], point: LatLng) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if point.lng < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Tests `point` against `ring` using the given containment rule.
pub fn contained_by(ring: &[LatLng], point: LatLng, rule: Containment) -> bool {
    match rule {
        Containment::Bounds => Bounds::of(ring).is_some_and(|b| b.contains(point)),
        Containment::Polygon => polygon_contains(ring, point),
    }
}
