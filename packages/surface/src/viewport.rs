//! # Viewport
//!
//! Maps between screen pixels and geographic coordinates for a view
//! centered on a projected point at a given resolution (meters per pixel).

use geomark_collection::Coordinate;
use geomark_editor::Pixel;

use crate::extent::Extent;
use crate::projection::{from_lon_lat, to_lon_lat, Projected, HALF_SIZE};

pub const TILE_SIZE: f64 = 256.0;

/// Meters per pixel at `zoom` for 256px tiles
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    2.0 * HALF_SIZE / TILE_SIZE / 2f64.powf(zoom)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Projected,
    pub resolution: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn from_zoom(center: Coordinate, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center: from_lon_lat(center),
            resolution: resolution_for_zoom(zoom),
            width,
            height,
        }
    }

    pub fn zoom(&self) -> f64 {
        (resolution_for_zoom(0.0) / self.resolution).log2()
    }

    pub fn center_coordinate(&self) -> Coordinate {
        to_lon_lat(self.center)
    }

    pub fn coordinate_to_pixel(&self, c: Coordinate) -> Pixel {
        let p = from_lon_lat(c);
        Pixel {
            x: (p.x - self.center.x) / self.resolution + self.width / 2.0,
            y: (self.center.y - p.y) / self.resolution + self.height / 2.0,
        }
    }

    pub fn pixel_to_coordinate(&self, pixel: Pixel) -> Coordinate {
        to_lon_lat(Projected {
            x: self.center.x + (pixel.x - self.width / 2.0) * self.resolution,
            y: self.center.y - (pixel.y - self.height / 2.0) * self.resolution,
        })
    }

    /// Center on `extent` and pick the resolution that shows all of it inside
    /// `padding` pixels on every side. A single-point extent keeps the
    /// current resolution.
    pub fn fit(&mut self, extent: &Extent, padding: f64) {
        self.center = extent.center();
        if extent.is_point() {
            return;
        }

        let usable_width = usable(self.width, padding);
        let usable_height = usable(self.height, padding);
        self.resolution = (extent.width() / usable_width).max(extent.height() / usable_height);
    }
}

fn usable(size: f64, padding: f64) -> f64 {
    let inner = size - 2.0 * padding;
    if inner > 0.0 {
        inner
    } else {
        size.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_zoom_resolution() {
        assert!(close(resolution_for_zoom(0.0), 156_543.033_928_041));
        let viewport = Viewport::from_zoom(Coordinate::new(0.0, 0.0), 2.0, 1000.0, 510.0);
        assert!(close(viewport.zoom(), 2.0));
    }

    #[test]
    fn test_center_is_middle_pixel() {
        let viewport = Viewport::from_zoom(Coordinate::new(12.0, 41.0), 10.0, 800.0, 600.0);
        let pixel = viewport.coordinate_to_pixel(Coordinate::new(12.0, 41.0));
        assert!(close(pixel.x, 400.0));
        assert!(close(pixel.y, 300.0));
    }

    #[test]
    fn test_pixel_round_trip() {
        let viewport = Viewport::from_zoom(Coordinate::new(0.0, 0.0), 3.0, 1000.0, 510.0);
        let c = viewport.pixel_to_coordinate(Pixel::new(730.0, 120.0));
        let back = viewport.coordinate_to_pixel(c);
        assert!(close(back.x, 730.0));
        assert!(close(back.y, 120.0));
    }

    #[test]
    fn test_north_is_up() {
        let viewport = Viewport::from_zoom(Coordinate::new(0.0, 0.0), 2.0, 1000.0, 510.0);
        let north = viewport.coordinate_to_pixel(Coordinate::new(0.0, 10.0));
        let east = viewport.coordinate_to_pixel(Coordinate::new(10.0, 0.0));
        assert!(north.y < 255.0);
        assert!(east.x > 500.0);
    }

    #[test]
    fn test_fit_keeps_extent_inside_padding() {
        let mut viewport = Viewport::from_zoom(Coordinate::new(0.0, 0.0), 2.0, 1000.0, 510.0);
        let mut extent = Extent::from_point(from_lon_lat(Coordinate::new(10.0, 40.0)));
        extent.extend(from_lon_lat(Coordinate::new(14.0, 43.0)));

        viewport.fit(&extent, 20.0);

        for c in [Coordinate::new(10.0, 40.0), Coordinate::new(14.0, 43.0)] {
            let p = viewport.coordinate_to_pixel(c);
            assert!(p.x >= 20.0 - 1e-6 && p.x <= 980.0 + 1e-6);
            assert!(p.y >= 20.0 - 1e-6 && p.y <= 490.0 + 1e-6);
        }
    }

    #[test]
    fn test_fit_single_point_keeps_resolution() {
        let mut viewport = Viewport::from_zoom(Coordinate::new(0.0, 0.0), 5.0, 1000.0, 510.0);
        let target = Coordinate::new(2.35, 48.85);
        viewport.fit(&Extent::from_point(from_lon_lat(target)), 20.0);

        assert!(close(viewport.zoom(), 5.0));
        let pixel = viewport.coordinate_to_pixel(target);
        assert!(close(pixel.x, 500.0));
        assert!(close(pixel.y, 255.0));
    }
}
