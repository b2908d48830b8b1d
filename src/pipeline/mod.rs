//! Coordinate text -> WGS84 polygon
//!
//! Each line goes through tokenization, field extraction, column layout
//! classification, projection and the plausibility window. Points that
//! survive are collected in input order and closed into a single ring.
//! Nothing in here fails for bad content: every dropped token or line is
//! recorded as a [`Diagnostic`] and the result is simply `None` when no
//! point survives.

pub mod ring;

pub use ring::RingAssembler;

use geo::{Area, LineString, Polygon};

use crate::config::PipelineConfig;
use crate::domain::{CandidatePair, PolygonGeometry, ProjectedPoint};
use crate::error::RejectReason;
use crate::geometry::GridProjector;
use crate::parse::{ColumnLayout, classify, extract_fields, tokenize};

/// A dropped token or point, with the 1-based source line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub reason: RejectReason,
}

/// Full outcome of one parse
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// `None` when no point survived
    pub polygon: Option<PolygonGeometry>,
    /// Grid pairs behind the accepted points, in ring order
    pub grid_pairs: Vec<CandidatePair>,
    pub diagnostics: Vec<Diagnostic>,
    /// Non-empty lines seen
    pub lines: usize,
}

impl ParseReport {
    pub fn accepted(&self) -> usize {
        self.grid_pairs.len()
    }

    /// Lines that produced no point
    pub fn rejected(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.reason.drops_point())
            .count()
    }

    /// Planar area in square grid meters enclosed by the accepted pairs
    ///
    /// `None` with fewer than three accepted points.
    pub fn grid_area(&self) -> Option<f64> {
        if self.grid_pairs.len() < 3 {
            return None;
        }
        let exterior: LineString<f64> = self
            .grid_pairs
            .iter()
            .map(|p| geo::coord! { x: p.easting, y: p.northing })
            .collect();
        // Polygon::new closes the exterior if needed
        Some(Polygon::new(exterior, Vec::new()).unsigned_area())
    }
}

/// Projects coordinate text with a fixed [`PipelineConfig`]
#[derive(Debug, Clone)]
pub struct CoordinateParser {
    config: PipelineConfig,
    projector: GridProjector,
}

impl CoordinateParser {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            projector: GridProjector::new(config.projection),
            config,
        }
    }

    /// Turn one line's numeric fields into a point, or say why not
    pub fn resolve_point(
        &self,
        fields: &[f64],
    ) -> Result<(CandidatePair, ProjectedPoint), RejectReason> {
        let layout = classify(fields, self.config.grid_threshold);
        let pair = layout.pair().ok_or_else(|| RejectReason::UnresolvableLayout {
            fields: fields.to_vec(),
        })?;

        tracing::trace!(layout = layout.name(), "Classified columns");
        if let ColumnLayout::LeadingId { id, .. } = layout {
            tracing::trace!(id, "Skipping leading point ID column");
        }

        let point = self.projector.project(pair)?;
        let point = self.config.window.check(point)?;
        Ok((pair, point))
    }

    pub fn parse(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();
        let mut ring = RingAssembler::new();

        for line in tokenize(text) {
            report.lines += 1;
            let fields = extract_fields(&line.text);

            for token in fields.rejected {
                report.diagnostics.push(Diagnostic {
                    line: line.number,
                    reason: RejectReason::UnparseableToken { token },
                });
            }

            match self.resolve_point(&fields.values) {
                Ok((pair, point)) => {
                    report.grid_pairs.push(pair);
                    ring.push(point);
                }
                Err(reason) => {
                    tracing::debug!(line = line.number, kind = reason.kind(), "{reason}");
                    report.diagnostics.push(Diagnostic {
                        line: line.number,
                        reason,
                    });
                }
            }
        }

        report.polygon = ring.finish();

        tracing::debug!(
            lines = report.lines,
            accepted = report.accepted(),
            rejected = report.rejected(),
            "Parsed coordinate text"
        );

        report
    }
}

impl Default for CoordinateParser {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Parse survey coordinate text with the default grid and window
///
/// Returns `None` when no line yields a plausible point.
pub fn parse_coordinates(text: &str) -> Option<PolygonGeometry> {
    CoordinateParser::default().parse(text).polygon
}

/// Parse with an explicit configuration, keeping all diagnostics
pub fn parse_coordinates_with(text: &str, config: &PipelineConfig) -> ParseReport {
    CoordinateParser::new(*config).parse(text)
}
