pub mod geometry;
pub mod point;

pub use geometry::{Geometry, PointGeometry, PolygonGeometry, SurveyGeometry};
pub use point::{CandidatePair, ProjectedPoint};
