use crate::domain::CandidatePair;

/// Values with magnitude above this are treated as grid coordinates
///
/// Eastings in the survey grid sit around 1.8-2.2 million and northings
/// around 3.6-4.1 million, while point IDs and row counters stay small.
pub const GRID_SCALE_THRESHOLD: f64 = 100_000.0;

/// How the numeric columns of one line were interpreted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnLayout {
    /// Exactly two grid-scale values, taken in their original order
    GridScaleSubset { easting: f64, northing: f64 },
    /// Exactly two numeric fields on the line
    TwoColumn { easting: f64, northing: f64 },
    /// Small leading value followed by a grid-scale one: `id easting northing ...`
    LeadingId { id: f64, easting: f64, northing: f64 },
    /// Three or more fields with no recognisable ID column: first two win
    FirstTwo { easting: f64, northing: f64 },
    /// Fewer than two numeric fields
    Unresolvable,
}

impl ColumnLayout {
    /// The selected easting/northing, if any
    pub fn pair(&self) -> Option<CandidatePair> {
        match *self {
            ColumnLayout::GridScaleSubset { easting, northing }
            | ColumnLayout::TwoColumn { easting, northing }
            | ColumnLayout::LeadingId {
                easting, northing, ..
            }
            | ColumnLayout::FirstTwo { easting, northing } => {
                Some(CandidatePair::new(easting, northing))
            }
            ColumnLayout::Unresolvable => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnLayout::GridScaleSubset { .. } => "grid_scale_subset",
            ColumnLayout::TwoColumn { .. } => "two_column",
            ColumnLayout::LeadingId { .. } => "leading_id",
            ColumnLayout::FirstTwo { .. } => "first_two",
            ColumnLayout::Unresolvable => "unresolvable",
        }
    }
}

/// Decide which two fields of a line are easting and northing
///
/// # Algorithm
/// 1. Collect fields with `|v| > threshold` (grid-scale candidates)
/// 2. Exactly two candidates: use them in order, whatever else is on the line
/// 3. Exactly two fields in total: use them as-is
/// 4. Three or more fields: `fields[0] < threshold && fields[1] > threshold`
///    marks a leading point ID, so take fields 1 and 2; otherwise fields 0 and 1
/// 5. Anything else has no pair
pub fn classify(fields: &[f64], threshold: f64) -> ColumnLayout {
    let grid_scale: Vec<f64> = fields
        .iter()
        .copied()
        .filter(|v| v.abs() > threshold)
        .collect();

    if let [easting, northing] = grid_scale[..] {
        return ColumnLayout::GridScaleSubset { easting, northing };
    }

    match *fields {
        [easting, northing] => ColumnLayout::TwoColumn { easting, northing },
        [first, second, third, ..] => {
            if first < threshold && second > threshold {
                ColumnLayout::LeadingId {
                    id: first,
                    easting: second,
                    northing: third,
                }
            } else {
                ColumnLayout::FirstTwo {
                    easting: first,
                    northing: second,
                }
            }
        }
        _ => ColumnLayout::Unresolvable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(fields: &[f64]) -> ColumnLayout {
        classify(fields, GRID_SCALE_THRESHOLD)
    }

    #[test]
    fn test_grid_scale_subset_ignores_extra_columns() {
        assert_eq!(
            layout(&[7.0, 2000000.0, 12.5, 4000000.0, 1.0]),
            ColumnLayout::GridScaleSubset {
                easting: 2000000.0,
                northing: 4000000.0
            }
        );
    }

    #[test]
    fn test_grid_scale_subset_keeps_order() {
        let pair = layout(&[4000000.0, 2000000.0]).pair().unwrap();
        assert_eq!(pair, CandidatePair::new(4000000.0, 2000000.0));
    }

    #[test]
    fn test_grid_scale_uses_absolute_value() {
        assert!(matches!(
            layout(&[1.0, -2000000.0, 5.0, -4000000.0]),
            ColumnLayout::GridScaleSubset { .. }
        ));
    }

    #[test]
    fn test_two_column_small_values() {
        assert_eq!(
            layout(&[1500.0, 2500.0]),
            ColumnLayout::TwoColumn {
                easting: 1500.0,
                northing: 2500.0
            }
        );
    }

    #[test]
    fn test_leading_id() {
        // Three grid-scale values so the subset tier does not apply
        let result = layout(&[3.0, 2000000.0, 4000000.0, 3999999.0]);
        assert_eq!(
            result,
            ColumnLayout::LeadingId {
                id: 3.0,
                easting: 2000000.0,
                northing: 4000000.0
            }
        );
    }

    #[test]
    fn test_id_line_resolves_to_grid_pair() {
        let pair = layout(&[3.0, 2000000.0, 4000000.0]).pair().unwrap();
        assert_eq!(pair, CandidatePair::new(2000000.0, 4000000.0));
    }

    #[test]
    fn test_first_two_fallback() {
        assert_eq!(
            layout(&[10.0, 20.0, 30.0]),
            ColumnLayout::FirstTwo {
                easting: 10.0,
                northing: 20.0
            }
        );
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(layout(&[2000000.0, 4000000.0]).name(), "grid_scale_subset");
        assert_eq!(layout(&[1.0, 2.0]).name(), "two_column");
        assert_eq!(layout(&[1.0, 2000000.0, 2.0]).name(), "leading_id");
        assert_eq!(layout(&[1.0, 2.0, 3.0]).name(), "first_two");
        assert_eq!(layout(&[1.0]).name(), "unresolvable");
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(layout(&[]), ColumnLayout::Unresolvable);
        assert_eq!(layout(&[2000000.0]), ColumnLayout::Unresolvable);
        assert!(layout(&[42.0]).pair().is_none());
    }
}
