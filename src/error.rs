use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("cannot convert value {value:?} of key {key:?} to {target}")]
    Conversion {
        key: String,
        value: String,
        target: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
