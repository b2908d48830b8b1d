use serde_json::Value;
use thiserror::Error;

use crate::domain::{PointGeometry, PolygonGeometry, SurveyGeometry};

/// Why a candidate geometry was refused
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateRejection {
    #[error("candidate has no geometry type")]
    MissingType,

    #[error("unsupported geometry type {0:?}")]
    UnsupportedType(String),

    #[error("candidate has no coordinates array")]
    MissingCoordinates,

    #[error("polygon has no rings")]
    EmptyPolygon,

    #[error("polygon outer ring is empty")]
    EmptyOuterRing,

    #[error("point needs exactly 2 numeric coordinates")]
    InvalidPoint,
}

/// Check a typed geometry
///
/// Polygons need at least one ring and a non-empty outer ring. Points are
/// always two numbers by construction. No geographic check is done here.
pub fn accept(candidate: &SurveyGeometry) -> Result<(), GateRejection> {
    match candidate {
        SurveyGeometry::Polygon(polygon) => match polygon.coordinates.first() {
            None => Err(GateRejection::EmptyPolygon),
            Some(outer) if outer.is_empty() => Err(GateRejection::EmptyOuterRing),
            Some(_) => Ok(()),
        },
        SurveyGeometry::RawPolygon(value) => {
            let coordinates = value
                .get("coordinates")
                .and_then(Value::as_array)
                .ok_or(GateRejection::MissingCoordinates)?;
            check_polygon_rings(coordinates)
        }
        SurveyGeometry::Point(_) => Ok(()),
    }
}

/// Check an untyped GeoJSON geometry (AI extraction, manual entry) and
/// convert it to the typed model
///
/// A polygon passes when it has a ring and its outer ring is non-empty;
/// the shape of individual positions is never a reason to reject. When
/// every outer position is numeric the polygon is typed (outer ring only,
/// altitude dropped), otherwise it is kept as received.
pub fn accept_value(candidate: &Value) -> Result<SurveyGeometry, GateRejection> {
    let kind = candidate
        .get("type")
        .and_then(Value::as_str)
        .ok_or(GateRejection::MissingType)?;

    let coordinates = candidate
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or(GateRejection::MissingCoordinates)?;

    match kind {
        "Polygon" => {
            check_polygon_rings(coordinates)?;

            if coordinates.len() > 1 {
                tracing::debug!(
                    holes = coordinates.len() - 1,
                    "Dropping interior rings from candidate polygon"
                );
            }

            let typed = coordinates[0]
                .as_array()
                .and_then(|outer| outer.iter().map(position).collect::<Option<Vec<[f64; 2]>>>());

            match typed {
                Some(ring) => Ok(PolygonGeometry::from_ring(ring).into()),
                None => {
                    tracing::debug!("Keeping polygon with non-numeric positions as received");
                    Ok(SurveyGeometry::RawPolygon(candidate.clone()))
                }
            }
        }
        "Point" => match coordinates[..] {
            [ref lon, ref lat] => match (lon.as_f64(), lat.as_f64()) {
                (Some(lon), Some(lat)) => Ok(PointGeometry::new(lon, lat).into()),
                _ => Err(GateRejection::InvalidPoint),
            },
            _ => Err(GateRejection::InvalidPoint),
        },
        other => Err(GateRejection::UnsupportedType(other.to_string())),
    }
}

/// `coordinates` non-empty and `coordinates[0]` a non-empty array
fn check_polygon_rings(coordinates: &[Value]) -> Result<(), GateRejection> {
    let outer = coordinates.first().ok_or(GateRejection::EmptyPolygon)?;
    match outer.as_array() {
        Some(ring) if !ring.is_empty() => Ok(()),
        _ => Err(GateRejection::EmptyOuterRing),
    }
}

fn position(value: &Value) -> Option<[f64; 2]> {
    match value.as_array()?.as_slice() {
        [lon, lat, ..] => Some([lon.as_f64()?, lat.as_f64()?]),
        _ => None,
    }
}
