use std::fmt;
use std::io::Write;

use super::Contents;
use crate::Error;

/// Renders entries as `<key> <delimiter> <value>` lines in key order.
pub(crate) struct Rendered<'a> {
    pub(crate) contents: &'a Contents,
    pub(crate) delimiter: &'a str,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.contents {
            writeln!(f, "{key} {} {value}", self.delimiter)?;
        }
        Ok(())
    }
}

/// Write every entry as `<key> <delimiter> <value>` followed by a newline, in key order.
pub fn write_config<W: Write>(contents: &Contents, delimiter: &str, mut writer: W) -> Result<(), Error> {
    write!(writer, "{}", Rendered { contents, delimiter })?;
    Ok(())
}

/// Render entries the same way as [`write_config`] into a string.
pub fn write_config_string(contents: &Contents, delimiter: &str) -> String {
    Rendered { contents, delimiter }.to_string()
}
