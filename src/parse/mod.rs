//! Text side of the pipeline: lines, numeric fields and column layout

pub mod fields;
pub mod layout;
pub mod tokenizer;

pub use fields::{ExtractedFields, extract_fields};
pub use layout::{ColumnLayout, GRID_SCALE_THRESHOLD, classify};
pub use tokenizer::{NormalizedLine, normalize_line, tokenize};
