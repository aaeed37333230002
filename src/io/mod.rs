mod parse;
mod write;

use std::collections::BTreeMap;

pub use parse::{parse_config, parse_config_into, parse_config_str};
pub(crate) use write::Rendered;
pub use write::{write_config, write_config_string};

/// Parsed configuration entries in sorted key order.
pub type Contents = BTreeMap<String, String>;

const WHITESPACE: &[char] = &[' ', '\n', '\t', '\u{0B}', '\r', '\u{0C}'];

/// Trim ASCII whitespace (space, `\n`, `\t`, `\v`, `\r`, `\f`) from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(WHITESPACE)
}
