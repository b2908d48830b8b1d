//! parcelgrid - Turn free-form survey grid coordinate files into GeoJSON parcel polygons

pub mod config;
pub mod domain;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod parse;
pub mod pipeline;

pub use config::{FileConfig, PipelineConfig};
pub use domain::{Geometry, PointGeometry, PolygonGeometry, SurveyGeometry};
pub use error::RejectReason;
pub use gate::{fallback_geometry, resolve, resolve_first, resolve_value};
pub use pipeline::{CoordinateParser, ParseReport, parse_coordinates, parse_coordinates_with};
