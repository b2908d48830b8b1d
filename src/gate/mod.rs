//! Structural checks applied to any geometry before it is persisted, and the
//! placeholder used when nothing passes

pub mod acceptance;
pub mod fallback;

pub use acceptance::{GateRejection, accept, accept_value};
pub use fallback::{FALLBACK_RING, fallback_geometry, resolve, resolve_first, resolve_value};
