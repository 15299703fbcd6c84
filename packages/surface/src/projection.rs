//! Spherical Web Mercator (EPSG:3857) <-> geographic (EPSG:4326)

use geomark_collection::Coordinate;
use std::f64::consts::PI;

pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the width of the projected world, in meters
pub const HALF_SIZE: f64 = PI * EARTH_RADIUS;

/// Latitude at which the projected world becomes square
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Position in projected meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
}

impl Projected {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn from_lon_lat(c: Coordinate) -> Projected {
    let lat = c.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    Projected {
        x: EARTH_RADIUS * c.lon.to_radians(),
        y: EARTH_RADIUS * (PI / 4.0 + lat / 2.0).tan().ln(),
    }
}

pub fn to_lon_lat(p: Projected) -> Coordinate {
    Coordinate {
        lon: (p.x / EARTH_RADIUS).to_degrees(),
        lat: (2.0 * (p.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_origin() {
        let p = from_lon_lat(Coordinate::new(0.0, 0.0));
        assert!(close(p.x, 0.0));
        assert!(close(p.y, 0.0));
    }

    #[test]
    fn test_world_edges() {
        let p = from_lon_lat(Coordinate::new(180.0, MAX_LATITUDE));
        assert!(close(p.x, HALF_SIZE));
        assert!((p.y - HALF_SIZE).abs() < 1e-3);
    }

    #[test]
    fn test_round_trip() {
        let c = Coordinate::new(12.4924, 41.8902);
        let back = to_lon_lat(from_lon_lat(c));
        assert!(close(back.lon, c.lon));
        assert!(close(back.lat, c.lat));
    }

    #[test]
    fn test_poles_are_clamped() {
        let p = from_lon_lat(Coordinate::new(0.0, 90.0));
        assert!(p.y.is_finite());
        assert!(close(to_lon_lat(p).lat, MAX_LATITUDE));
    }
}
