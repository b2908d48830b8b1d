use geo::{BoundingRect, LineString, Polygon, Rect};
use serde::Serialize;
use serde_json::Value;

/// GeoJSON polygon with a single outer ring of [lon, lat] positions
///
/// Holes and multi-polygons are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Polygon")]
pub struct PolygonGeometry {
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl PolygonGeometry {
    /// Wrap an already closed ring as the outer ring of a polygon
    pub fn from_ring(ring: Vec<[f64; 2]>) -> Self {
        Self {
            coordinates: vec![ring],
        }
    }

    pub fn outer_ring(&self) -> Option<&[[f64; 2]]> {
        self.coordinates.first().map(Vec::as_slice)
    }

    /// True when the outer ring has at least one position and first == last
    pub fn is_closed(&self) -> bool {
        match self.outer_ring() {
            Some(ring) => ring.first() == ring.last() && !ring.is_empty(),
            None => false,
        }
    }

    /// Convert to a `geo` polygon (x = lon, y = lat)
    pub fn to_geo(&self) -> Polygon<f64> {
        let exterior: LineString<f64> = self
            .outer_ring()
            .unwrap_or_default()
            .iter()
            .map(|&[lon, lat]| geo::coord! { x: lon, y: lat })
            .collect();
        Polygon::new(exterior, Vec::new())
    }

    /// Lon/lat extent of the outer ring, `None` when it is empty
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        self.to_geo().bounding_rect()
    }
}

/// GeoJSON point, only ever produced upstream of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            coordinates: [longitude, latitude],
        }
    }
}

/// Any geometry that may reach storage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SurveyGeometry {
    Polygon(PolygonGeometry),
    Point(PointGeometry),
    /// Accepted polygon whose positions do not fit `[lon, lat]`, kept as received
    RawPolygon(Value),
}

impl SurveyGeometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            SurveyGeometry::Polygon(_) | SurveyGeometry::RawPolygon(_) => "Polygon",
            SurveyGeometry::Point(_) => "Point",
        }
    }
}

impl From<PolygonGeometry> for SurveyGeometry {
    fn from(polygon: PolygonGeometry) -> Self {
        SurveyGeometry::Polygon(polygon)
    }
}

impl From<PointGeometry> for SurveyGeometry {
    fn from(point: PointGeometry) -> Self {
        SurveyGeometry::Point(point)
    }
}

/// Geometry handed to persistence, tagged with its provenance
///
/// `Missing` carries the placeholder polygon so consumers can still draw
/// something while knowing it is not survey data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "geometry", rename_all = "snake_case")]
pub enum Geometry {
    Surveyed(SurveyGeometry),
    Missing(PolygonGeometry),
}

impl Geometry {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Geometry::Missing(_))
    }

    /// The payload to persist, regardless of provenance
    pub fn geometry(&self) -> SurveyGeometry {
        match self {
            Geometry::Surveyed(geometry) => geometry.clone(),
            Geometry::Missing(placeholder) => SurveyGeometry::Polygon(placeholder.clone()),
        }
    }
}
