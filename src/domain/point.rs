/// Easting/northing selected from one line, in survey grid meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePair {
    pub easting: f64,
    pub northing: f64,
}

impl CandidatePair {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}

/// A WGS84 position produced by the grid projector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl ProjectedPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// GeoJSON position order: [lon, lat]
    pub fn position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}
