/// Build an identifier from a sequence value: `prefix` followed by `value`
/// left-padded with zeros to at least `padding_width` digits.
///
/// The width is a minimum; values with more digits are never truncated.
pub fn format_identifier(prefix: &str, value: i64, padding_width: u32) -> String {
    let width = padding_width as usize;
    format!("{prefix}{value:0width$}")
}
