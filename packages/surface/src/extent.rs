use geomark_collection::{Feature, FeatureCollection};

use crate::projection::{from_lon_lat, Projected};

/// Bounding box in projected meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn from_point(p: Projected) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    pub fn extend(&mut self, p: Projected) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Extent of every position in the collection; `None` when it has none
    pub fn of_collection(collection: &FeatureCollection) -> Option<Self> {
        Self::of_features(collection.iter())
    }

    pub fn of_features<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Option<Self> {
        let mut extent: Option<Extent> = None;
        let positions = features
            .into_iter()
            .filter_map(|f| f.geometry.as_ref())
            .flat_map(|g| g.positions());

        for c in positions {
            let p = from_lon_lat(c);
            match &mut extent {
                Some(e) => e.extend(p),
                None => extent = Some(Extent::from_point(p)),
            }
        }
        extent
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Projected {
        Projected::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Zero width and height
    pub fn is_point(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }
}
