use serde::Deserialize;

use crate::domain::ProjectedPoint;
use crate::error::RejectReason;

fn default_min_latitude() -> f64 {
    -25.0
}
fn default_max_latitude() -> f64 {
    -12.0
}
fn default_east_of() -> f64 {
    175.0
}
fn default_west_of() -> f64 {
    -175.0
}

/// Geographic window a projected point must fall inside
///
/// Latitude bounds are exclusive. The longitude test is a disjunction
/// (`lon > east_of || lon < west_of`) so the window can straddle the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlausibilityWindow {
    #[serde(default = "default_min_latitude")]
    pub min_latitude: f64,
    #[serde(default = "default_max_latitude")]
    pub max_latitude: f64,
    #[serde(default = "default_east_of")]
    pub east_of: f64,
    #[serde(default = "default_west_of")]
    pub west_of: f64,
}

impl Default for PlausibilityWindow {
    fn default() -> Self {
        Self {
            min_latitude: default_min_latitude(),
            max_latitude: default_max_latitude(),
            east_of: default_east_of(),
            west_of: default_west_of(),
        }
    }
}

impl PlausibilityWindow {
    pub fn contains(&self, point: &ProjectedPoint) -> bool {
        let lat_ok = point.latitude > self.min_latitude && point.latitude < self.max_latitude;
        let lon_ok = point.longitude > self.east_of || point.longitude < self.west_of;
        lat_ok && lon_ok
    }

    /// Pass the point through or turn it into `ImplausibleResult`
    pub fn check(&self, point: ProjectedPoint) -> Result<ProjectedPoint, RejectReason> {
        if self.contains(&point) {
            Ok(point)
        } else {
            Err(RejectReason::ImplausibleResult {
                longitude: point.longitude,
                latitude: point.latitude,
            })
        }
    }
}
