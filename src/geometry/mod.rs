pub mod datum;
pub mod plausibility;
pub mod projection;

pub use datum::{Ellipsoid, HelmertShift};
pub use plausibility::PlausibilityWindow;
pub use projection::{GridProjector, ProjectionParameters};
