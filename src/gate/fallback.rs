use serde_json::Value;

use super::acceptance::{accept, accept_value};
use crate::domain::{Geometry, PolygonGeometry, SurveyGeometry};

/// Placeholder parcel: a small closed rectangle in central Suva, Fiji
pub const FALLBACK_RING: [[f64; 2]; 5] = [
    [178.4415, -18.1416],
    [178.4425, -18.1416],
    [178.4425, -18.1426],
    [178.4415, -18.1426],
    [178.4415, -18.1416],
];

/// The placeholder geometry, tagged so it cannot pass for survey data
pub fn fallback_geometry() -> Geometry {
    Geometry::Missing(PolygonGeometry::from_ring(FALLBACK_RING.to_vec()))
}

/// Gate a typed candidate, substituting the placeholder on rejection or absence
pub fn resolve(candidate: Option<SurveyGeometry>) -> Geometry {
    let Some(candidate) = candidate else {
        tracing::warn!("No geometry available, using placeholder");
        return fallback_geometry();
    };

    match accept(&candidate) {
        Ok(()) => Geometry::Surveyed(candidate),
        Err(reason) => {
            tracing::warn!(
                kind = candidate.type_name(),
                "Geometry rejected ({reason}), using placeholder"
            );
            fallback_geometry()
        }
    }
}

/// Gate an untyped GeoJSON candidate, substituting the placeholder on
/// rejection or absence
pub fn resolve_value(candidate: Option<&Value>) -> Geometry {
    match candidate.map(accept_value) {
        Some(Ok(geometry)) => Geometry::Surveyed(geometry),
        Some(Err(reason)) => {
            tracing::warn!("Geometry rejected ({reason}), using placeholder");
            fallback_geometry()
        }
        None => {
            tracing::warn!("No geometry available, using placeholder");
            fallback_geometry()
        }
    }
}

/// First candidate, in preference order, that passes the gate
///
/// Used when several sources compete for one record, e.g. the parsed
/// coordinate file first and a geometry extracted from the contract text
/// second. Falls back to the placeholder when none is acceptable.
pub fn resolve_first<I>(candidates: I) -> Geometry
where
    I: IntoIterator<Item = Option<SurveyGeometry>>,
{
    for (index, candidate) in candidates.into_iter().enumerate() {
        let Some(candidate) = candidate else {
            continue;
        };
        match accept(&candidate) {
            Ok(()) => return Geometry::Surveyed(candidate),
            Err(reason) => tracing::debug!(index, "Candidate rejected: {reason}"),
        }
    }

    tracing::warn!("No acceptable geometry among candidates, using placeholder");
    fallback_geometry()
}
