use serde::Deserialize;

use super::datum::{Ellipsoid, HelmertShift};
use crate::domain::{CandidatePair, ProjectedPoint};
use crate::error::RejectReason;

/// Transverse Mercator grid definition plus the datum shift to WGS84
///
/// Angles in degrees, offsets in meters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProjectionParameters {
    pub ellipsoid: Ellipsoid,
    pub latitude_of_origin: f64,
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    #[serde(default)]
    pub to_wgs84: HelmertShift,
}

impl ProjectionParameters {
    /// Fiji Map Grid 1986 (EPSG:3460) on WGS72, shifted to WGS84
    pub const FIJI_MAP_GRID_1986: ProjectionParameters = ProjectionParameters {
        ellipsoid: Ellipsoid::WGS72,
        latitude_of_origin: -17.0,
        central_meridian: 178.75,
        scale_factor: 0.99985,
        false_easting: 2_000_000.0,
        false_northing: 4_000_000.0,
        to_wgs84: HelmertShift {
            tx: 0.0,
            ty: 0.0,
            tz: 4.5,
            rx: 0.0,
            ry: 0.0,
            rz: 0.554,
            scale_ppm: 0.2263,
        },
    };
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self::FIJI_MAP_GRID_1986
    }
}

/// Inverse transverse Mercator from grid (E, N) to WGS84 (lon, lat)
///
/// Series expansion after Snyder (USGS PP 1395), accurate to well below a
/// millimetre within a few degrees of the central meridian, which covers
/// any single national grid.
#[derive(Debug, Clone)]
pub struct GridProjector {
    params: ProjectionParameters,
    e2: f64,
    ep2: f64,
    e1: f64,
    m0: f64,
    mu_denominator: f64,
}

impl GridProjector {
    pub fn new(params: ProjectionParameters) -> Self {
        let e2 = params.ellipsoid.e2();
        let ep2 = e2 / (1.0 - e2);
        let sqrt_one_minus_e2 = (1.0 - e2).sqrt();
        let e1 = (1.0 - sqrt_one_minus_e2) / (1.0 + sqrt_one_minus_e2);
        let a = params.ellipsoid.semi_major_axis;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        Self {
            m0: meridian_arc(params.latitude_of_origin.to_radians(), a, e2),
            mu_denominator: a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0),
            params,
            e2,
            ep2,
            e1,
        }
    }

    /// Project one grid pair to WGS84
    ///
    /// Non-finite input, a footpoint latitude beyond the poles, or a
    /// non-finite result all yield `ProjectionFailure`.
    pub fn project(&self, pair: CandidatePair) -> Result<ProjectedPoint, RejectReason> {
        let failure = || RejectReason::ProjectionFailure {
            easting: pair.easting,
            northing: pair.northing,
        };

        if !pair.easting.is_finite() || !pair.northing.is_finite() {
            return Err(failure());
        }

        let (lat, lon) = self.grid_to_geodetic(pair.easting, pair.northing).ok_or_else(failure)?;

        let (lat, lon) = self.params.to_wgs84.transform(
            lat,
            lon,
            &self.params.ellipsoid,
            &Ellipsoid::WGS84,
        );

        let latitude = lat.to_degrees();
        let longitude = normalize_longitude(lon.to_degrees());

        if !latitude.is_finite() || !longitude.is_finite() || latitude.abs() > 90.0 {
            return Err(failure());
        }

        Ok(ProjectedPoint::new(longitude, latitude))
    }

    /// Inverse series on the source ellipsoid, (lat, lon) in radians
    fn grid_to_geodetic(&self, easting: f64, northing: f64) -> Option<(f64, f64)> {
        let p = &self.params;
        let a = p.ellipsoid.semi_major_axis;
        let k0 = p.scale_factor;
        let (e2, ep2, e1) = (self.e2, self.ep2, self.e1);

        let m1 = self.m0 + (northing - p.false_northing) / k0;
        let mu1 = m1 / self.mu_denominator;
        if !mu1.is_finite() || mu1.abs() >= std::f64::consts::FRAC_PI_2 {
            return None;
        }

        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_3 * e1;
        let phi1 = mu1
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu1).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu1).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu1).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu1).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        if cos_phi1.abs() < f64::EPSILON {
            return None;
        }
        let tan_phi1 = sin_phi1 / cos_phi1;

        let c1 = ep2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let w = 1.0 - e2 * sin_phi1 * sin_phi1;
        let n1 = a / w.sqrt();
        let r1 = a * (1.0 - e2) / w.powf(1.5);
        let d = (easting - p.false_easting) / (n1 * k0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let lon = p.central_meridian.to_radians()
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d5
                    / 120.0)
                / cos_phi1;

        if lat.is_finite() && lon.is_finite() {
            Some((lat, lon))
        } else {
            None
        }
    }
}

impl Default for GridProjector {
    fn default() -> Self {
        Self::new(ProjectionParameters::default())
    }
}

/// Distance along the meridian from the equator to `phi` (radians)
fn meridian_arc(phi: f64, a: f64, e2: f64) -> f64 {
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
        - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Wrap a longitude into [-180, 180)
fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
