/// A non-empty line after delimiter normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLine {
    /// 1-based line number in the source text
    pub number: usize,
    pub text: String,
}

/// Replace commas, semicolons and tabs with spaces, collapse whitespace runs
/// to a single space and trim.
pub fn normalize_line(line: &str) -> String {
    line.replace([',', ';', '\t'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split raw text on `\n` / `\r\n` and normalize each line
///
/// Lines that are empty after normalization are skipped, but line numbers
/// still count them so diagnostics point at the right place.
pub fn tokenize(text: &str) -> Vec<NormalizedLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = normalize_line(raw);
            if text.is_empty() {
                None
            } else {
                Some(NormalizedLine { number: i + 1, text })
            }
        })
        .collect()
}
