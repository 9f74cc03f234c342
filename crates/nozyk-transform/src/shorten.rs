//! Display keys for long identifiers.

/// Start of the display slice (0-based character offset).
const SHORT_START: usize = 5;
/// End of the display slice for identifiers of at least this many characters.
const SHORT_END: usize = 8;

/// Derives the display key of an identifier.
///
/// Characters 6–8 (1-indexed) when the identifier has at least 8
/// characters; characters from position 6 onwards when it has 5–7; the
/// identifier itself otherwise. Counts characters, not bytes.
///
/// # Examples
///
/// ```
/// use nozyk_transform::shorten_identifier;
///
/// assert_eq!(shorten_identifier("WRO01ABC99"), "ABC");
/// assert_eq!(shorten_identifier("WRO01AB"), "AB");
/// assert_eq!(shorten_identifier("ABC"), "ABC");
/// ```
pub fn shorten_identifier(identifier: &str) -> String {
    let length = identifier.chars().count();
    if length >= SHORT_END {
        identifier
            .chars()
            .skip(SHORT_START)
            .take(SHORT_END - SHORT_START)
            .collect()
    } else if length >= SHORT_START {
        identifier.chars().skip(SHORT_START).collect()
    } else {
        identifier.to_string()
    }
}
