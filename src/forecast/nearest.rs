//! Nearest-region resolution.
//!
//! The web client has always compared raw degree coordinates with a planar
//! distance, and region defaults were tuned against that behavior, so the
//! computation is kept bit-compatible: squared Euclidean distance in
//! degree-space, no cosine-latitude correction, no geodesic formula.

use geo::Point;

use crate::forecast::types::Region;

/// Returns the region closest to `(latitude, longitude)`.
///
/// The first region with the strictly smallest distance wins; a later
/// region at exactly the same distance never replaces it. Returns `None`
/// for an empty list.
pub fn nearest_region(regions: &[Region], latitude: f64, longitude: f64) -> Option<&Region> {
    let query = Point::new(longitude, latitude);
    let mut nearest: Option<(&Region, f64)> = None;

    for region in regions {
        let candidate = Point::new(region.longitude, region.latitude);
        let distance = squared_planar_distance(candidate, query);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((region, distance)),
        }
    }

    nearest.map(|(region, _)| region)
}

fn squared_planar_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    let delta = a - b;
    delta.x() * delta.x() + delta.y() * delta.y()
}
