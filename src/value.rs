use crate::io::trim;

/// Conversion from a stored configuration string into a typed value.
///
/// Numbers are parsed from the trimmed string and must consume all of it.
/// `String` takes the stored value unchanged. `bool` accepts the usual
/// spellings case-insensitively: `true t yes y on 1` and `false f no n off 0 none`.
pub trait ConfigValue: Sized {
    fn from_value(value: &str) -> Option<Self>;
}

macro_rules! from_str_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConfigValue for $ty {
                fn from_value(value: &str) -> Option<Self> {
                    trim(value).parse().ok()
                }
            }
        )*
    };
}

from_str_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl ConfigValue for String {
    fn from_value(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}

impl ConfigValue for char {
    fn from_value(value: &str) -> Option<Self> {
        let mut chars = trim(value).chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl ConfigValue for bool {
    fn from_value(value: &str) -> Option<Self> {
        match trim(value).to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" | "none" => Some(false),
            _ => None,
        }
    }
}
