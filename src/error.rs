use thiserror::Error;

/// Why a token or a line did not contribute a point to the ring.
///
/// None of these are fatal: the pipeline records them and moves on to the
/// next token or line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("token {token:?} is not a number")]
    UnparseableToken { token: String },

    #[error("no easting/northing pair in {fields:?}")]
    UnresolvableLayout { fields: Vec<f64> },

    #[error("projection failed for easting {easting}, northing {northing}")]
    ProjectionFailure { easting: f64, northing: f64 },

    #[error("projected point ({longitude:.6}, {latitude:.6}) is outside the plausibility window")]
    ImplausibleResult { longitude: f64, latitude: f64 },
}

impl RejectReason {
    /// Short machine-friendly label, used in reports and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RejectReason::UnparseableToken { .. } => "unparseable_token",
            RejectReason::UnresolvableLayout { .. } => "unresolvable_layout",
            RejectReason::ProjectionFailure { .. } => "projection_failure",
            RejectReason::ImplausibleResult { .. } => "implausible_result",
        }
    }

    /// Whether this reason cost the line its point (as opposed to a single token)
    pub fn drops_point(&self) -> bool {
        !matches!(self, RejectReason::UnparseableToken { .. })
    }
}
