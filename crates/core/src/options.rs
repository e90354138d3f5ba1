/// Splits raw option text into trimmed, non-empty lines, keeping input order.
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
