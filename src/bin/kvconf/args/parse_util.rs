use super::types::{ParseArgError, ValueType};

pub(super) fn split_option(opt: &str) -> Option<(&str, &str)> {
    let colon = opt.find(':');
    let equals = opt.find('=');
    let pos = match (colon, equals) {
        (Some(c), Some(e)) => c.min(e),
        (Some(p), None) | (None, Some(p)) => p,
        (None, None) => return None,
    };
    Some((&opt[..pos], &opt[pos + 1..]))
}

pub(super) fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}

pub(super) fn parse_value_type(s: &str) -> Result<ValueType, ParseArgError> {
    match strip_quotes(s).to_ascii_lowercase().as_str() {
        "str" | "string" => Ok(ValueType::Str),
        "int" | "i64" => Ok(ValueType::Int),
        "uint" | "u64" => Ok(ValueType::UInt),
        "float" | "f64" => Ok(ValueType::Float),
        "bool" => Ok(ValueType::Bool),
        other => Err(ParseArgError::InvalidValueType(other.to_string())),
    }
}

/// Split `key=value` on the first `=`. The key may not be empty.
pub(super) fn parse_entry(s: &str) -> Result<(String, String), ParseArgError> {
    let s = strip_quotes(s);
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ParseArgError::InvalidEntry(s.to_string())),
    }
}
