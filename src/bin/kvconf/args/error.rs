use thiserror::Error;

use super::types::ParseArgError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Arg(#[from] ParseArgError),
    #[error(transparent)]
    Config(#[from] kvconf::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("logger error: {0}")]
    Logger(String),
}

/// What a successful run prints on stdout.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecuteOutput {
    pub stdout: String,
}
