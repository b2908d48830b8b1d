use serde::Deserialize;

/// Reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Ellipsoid {
    /// Semi-major axis in meters
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub const WGS72: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_135.0,
        inverse_flattening: 298.26,
    };

    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_223_563,
    };

    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// First eccentricity squared
    pub fn e2(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }
}

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Seven-parameter (Helmert) datum shift, position-vector convention
///
/// Translations in meters, rotations in arc-seconds, scale in ppm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct HelmertShift {
    #[serde(default)]
    pub tx: f64,
    #[serde(default)]
    pub ty: f64,
    #[serde(default)]
    pub tz: f64,
    #[serde(default)]
    pub rx: f64,
    #[serde(default)]
    pub ry: f64,
    #[serde(default)]
    pub rz: f64,
    #[serde(default)]
    pub scale_ppm: f64,
}

impl HelmertShift {
    /// Apply the shift to a geocentric (ECEF) position
    pub fn apply(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let rx = self.rx * ARCSEC_TO_RAD;
        let ry = self.ry * ARCSEC_TO_RAD;
        let rz = self.rz * ARCSEC_TO_RAD;
        let m = 1.0 + self.scale_ppm * 1e-6;

        [
            self.tx + m * (x - rz * y + ry * z),
            self.ty + m * (rz * x + y - rx * z),
            self.tz + m * (-ry * x + rx * y + z),
        ]
    }

    /// Shift a geodetic position (radians, ellipsoidal height in meters)
    /// from `source` to `target`. Returns (lat, lon) in radians.
    pub fn transform(
        &self,
        lat: f64,
        lon: f64,
        source: &Ellipsoid,
        target: &Ellipsoid,
    ) -> (f64, f64) {
        let ecef = geodetic_to_geocentric(lat, lon, 0.0, source);
        let shifted = self.apply(ecef);
        geocentric_to_geodetic(shifted, target)
    }
}

/// Geodetic (radians, meters) to earth-centred earth-fixed XYZ
pub fn geodetic_to_geocentric(lat: f64, lon: f64, height: f64, ellipsoid: &Ellipsoid) -> [f64; 3] {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.e2();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    [
        (n + height) * cos_lat * lon.cos(),
        (n + height) * cos_lat * lon.sin(),
        (n * (1.0 - e2) + height) * sin_lat,
    ]
}

/// ECEF XYZ to geodetic (lat, lon) in radians
///
/// Fixed-point iteration on latitude; converges to well under a millimetre
/// within a handful of rounds for points near the surface.
pub fn geocentric_to_geodetic([x, y, z]: [f64; 3], ellipsoid: &Ellipsoid) -> (f64, f64) {
    const MAX_ITERATIONS: usize = 10;
    const TOLERANCE: f64 = 1e-12;

    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.e2();
    let p = x.hypot(y);
    let lon = y.atan2(x);

    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..MAX_ITERATIONS {
        let sin_lat = lat.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * n * sin_lat).atan2(p);
        let converged = (next - lat).abs() < TOLERANCE;
        lat = next;
        if converged {
            break;
        }
    }

    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocentric_round_trip() {
        let lat = (-17.0f64).to_radians();
        let lon = 178.75f64.to_radians();
        let ecef = geodetic_to_geocentric(lat, lon, 0.0, &Ellipsoid::WGS84);
        let (lat2, lon2) = geocentric_to_geodetic(ecef, &Ellipsoid::WGS84);
        assert!((lat - lat2).abs() < 1e-11);
        assert!((lon - lon2).abs() < 1e-11);
    }

    #[test]
    fn test_identity_shift() {
        let shift = HelmertShift::default();
        let point = [1000.0, -2000.0, 3000.0];
        assert_eq!(shift.apply(point), point);
    }

    #[test]
    fn test_translation_only() {
        let shift = HelmertShift {
            tz: 4.5,
            ..Default::default()
        };
        let [x, y, z] = shift.apply([1.0, 2.0, 3.0]);
        assert_eq!((x, y), (1.0, 2.0));
        assert!((z - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_wgs72_to_wgs84_is_small() {
        // The WGS72 -> WGS84 shift moves points by a few tens of meters at most
        let shift = HelmertShift {
            tz: 4.5,
            rz: 0.554,
            scale_ppm: 0.2263,
            ..Default::default()
        };
        let lat = (-17.0f64).to_radians();
        let lon = 178.75f64.to_radians();
        let (lat2, lon2) = shift.transform(lat, lon, &Ellipsoid::WGS72, &Ellipsoid::WGS84);
        assert!((lat2 - lat).to_degrees().abs() < 1e-4);
        // rz alone turns longitude by 0.554" (about 1.5e-4 degrees)
        let dlon = (lon2 - lon).to_degrees();
        assert!(dlon > 1e-4 && dlon < 2e-4);
    }
}
