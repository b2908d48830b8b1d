/// Numeric values of one line, in column order, plus the tokens that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub values: Vec<f64>,
    pub rejected: Vec<String>,
}

/// Parse every token of a normalized line as `f64`
///
/// Tokens that fail to parse are dropped rather than replaced, so `values`
/// may be shorter than the token count. `NaN` literals are treated as
/// unparseable; infinities are kept and left for the projector to refuse.
pub fn extract_fields(line: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    for token in line.split(' ').filter(|t| !t.is_empty()) {
        match token.parse::<f64>() {
            Ok(value) if !value.is_nan() => fields.values.push(value),
            _ => fields.rejected.push(token.to_string()),
        }
    }

    fields
}
