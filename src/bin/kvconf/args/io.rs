use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use kvconf::{ConfigOptions, ConfigParser};

use super::error::CliError;
use super::types::Args;

pub(super) fn options_for_args(args: &Args) -> ConfigOptions {
    let mut options = ConfigOptions::default();
    if let Some(ref delimiter) = args.delimiter {
        options = options.with_delimiter(delimiter.as_str());
    }
    if let Some(ref comment) = args.comment {
        options = options.with_comment(comment.as_str());
    }
    if let Some(ref sentry) = args.sentry {
        options = options.with_sentry(sentry.as_str());
    }
    options
}

pub(super) fn load_input(path: &Path, options: ConfigOptions) -> Result<ConfigParser, CliError> {
    Ok(ConfigParser::from_file(path, options)?)
}

pub(super) fn write_output(config: &ConfigParser, path: &Path) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    kvconf::write_config(config.contents(), config.delimiter(), &mut writer)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), entries = config.len(), "configuration written");
    Ok(())
}
