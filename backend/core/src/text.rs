//! Helpers shared by every console reply parser.

use once_cell::sync::Lazy;
use regex::Regex;

/// Field separator used by every key/value shaped console line.
pub const FIELD_SEPARATOR: &str = ": ";

/// `§` followed by one style character (colour, bold, reset, ...).
static FORMATTING_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"§.").unwrap());

/// Remove in-band formatting codes from console text.
pub fn strip_formatting(text: &str) -> String {
    if !text.contains('§') {
        return text.to_string();
    }
    FORMATTING_CODE.replace_all(text, "").into_owned()
}

/// Lines of a reply after the header line, with formatting removed.
pub fn body_lines(reply: &str) -> impl Iterator<Item = String> + '_ {
    reply.lines().skip(1).map(strip_formatting)
}

/// First line of a reply, with formatting removed.
pub fn header_line(reply: &str) -> Option<String> {
    reply.lines().next().map(strip_formatting)
}

/// Split a `key: value` line on the first separator.
pub fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(FIELD_SEPARATOR)
}
