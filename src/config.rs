use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::io::{Contents, Rendered, parse_config, trim};
use crate::{ConfigValue, Error};

/// Tokens that shape the configuration syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOptions {
    delimiter: String,
    comment: String,
    sentry: String,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            delimiter: "=".to_string(),
            comment: "#".to_string(),
            sentry: String::new(),
        }
    }
}

impl ConfigOptions {
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// An empty sentry disables end-of-data detection.
    pub fn with_sentry(mut self, sentry: impl Into<String>) -> Self {
        self.sentry = sentry.into();
        self
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn sentry(&self) -> &str {
        &self.sentry
    }

    pub(crate) fn matches_sentry(&self, line: &str) -> bool {
        !self.sentry.is_empty() && line.contains(self.sentry.as_str())
    }
}

/// Key-value configuration read from `key = value` text.
///
/// Entries are kept sorted by key so that rendering through [`fmt::Display`]
/// or [`crate::write_config`] is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigParser {
    contents: Contents,
    options: ConfigOptions,
}

impl ConfigParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigOptions) -> Self {
        Self {
            contents: Contents::new(),
            options,
        }
    }

    /// Load a configuration file with the default tokens.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_file(path, ConfigOptions::default())
    }

    /// Load a configuration file. Fails with [`Error::FileNotFound`] if it cannot be opened.
    pub fn from_file(path: impl AsRef<Path>, options: ConfigOptions) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let parser = Self::from_reader(BufReader::new(file), options)?;
        debug!(path = %path.display(), entries = parser.len(), "configuration loaded");
        Ok(parser)
    }

    pub fn from_reader<R: BufRead>(reader: R, options: ConfigOptions) -> Result<Self, Error> {
        let mut parser = Self::with_options(options);
        parser.read_from(reader)?;
        Ok(parser)
    }

    /// Parse more input into this configuration, overwriting repeated keys.
    /// On a read error nothing from `reader` is applied.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<(), Error> {
        let parsed = parse_config(reader, &self.options)?;
        self.contents.extend(parsed);
        Ok(())
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.contents.contains_key(key)
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Result<String, Error> {
        self.contents
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.contents.get(key).map(String::as_str)
    }

    pub fn get<T: ConfigValue>(&self, key: &str) -> Result<T, Error> {
        let value = self
            .contents
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        convert(key, value)
    }

    /// Like [`get`](Self::get), but an absent key yields `default`.
    /// A present value that does not convert is still an error.
    pub fn get_or<T: ConfigValue>(&self, key: &str, default: T) -> Result<T, Error> {
        match self.contents.get(key) {
            Some(value) => convert(key, value),
            None => Ok(default),
        }
    }

    /// Store the converted value of `key` into `var`. Returns `false` and
    /// leaves `var` alone when the key is absent.
    pub fn read_into<T: ConfigValue>(&self, var: &mut T, key: &str) -> Result<bool, Error> {
        match self.contents.get(key) {
            Some(value) => {
                *var = convert(key, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Store the converted value of `key` into `var`, or `default` when absent.
    pub fn read_into_or<T: ConfigValue>(
        &self,
        var: &mut T,
        key: &str,
        default: T,
    ) -> Result<bool, Error> {
        match self.contents.get(key) {
            Some(value) => {
                *var = convert(key, value)?;
                Ok(true)
            }
            None => {
                *var = default;
                Ok(false)
            }
        }
    }

    /// Insert or replace an entry. Key and rendered value are trimmed.
    pub fn add(&mut self, key: &str, value: impl fmt::Display) {
        let value = value.to_string();
        self.contents
            .insert(trim(key).to_string(), trim(&value).to_string());
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.contents.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    pub fn delimiter(&self) -> &str {
        self.options.delimiter()
    }

    pub fn comment(&self) -> &str {
        self.options.comment()
    }

    pub fn sentry(&self) -> &str {
        self.options.sentry()
    }

    /// Replace the delimiter, returning the previous one.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> String {
        std::mem::replace(&mut self.options.delimiter, delimiter.into())
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) -> String {
        std::mem::replace(&mut self.options.comment, comment.into())
    }

    pub fn set_sentry(&mut self, sentry: impl Into<String>) -> String {
        std::mem::replace(&mut self.options.sentry, sentry.into())
    }
}

fn convert<T: ConfigValue>(key: &str, value: &str) -> Result<T, Error> {
    T::from_value(value).ok_or_else(|| Error::Conversion {
        key: key.to_string(),
        value: value.to_string(),
        target: std::any::type_name::<T>(),
    })
}

impl fmt::Display for ConfigParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = Rendered {
            contents: &self.contents,
            delimiter: self.delimiter(),
        };
        write!(f, "{rendered}")
    }
}

impl<'a> IntoIterator for &'a ConfigParser {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}
