use std::path::PathBuf;

use super::parse::parse_option;

#[derive(Debug, Default)]
pub struct Args {
    // Input
    pub input_file: Option<PathBuf>,

    // Output (special: uses space separator)
    pub output_file: Option<PathBuf>,

    // Tokens: /D:delim, /C:comment, /EOF:sentry
    pub delimiter: Option<String>,
    pub comment: Option<String>,
    pub sentry: Option<String>,

    // Edits: /R:key, /A:key=value
    pub remove_keys: Vec<String>,
    pub add_entries: Vec<(String, String)>,

    // Queries: /K:key, /G:key with /T:type
    pub check_key: Option<String>,
    pub get_key: Option<String>,
    pub value_type: ValueType,

    // Silent mode: /S
    pub silent: bool,
    // Debug logging: /V
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueType {
    #[default]
    Str,
    Int,
    UInt,
    Float,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseArgError {
    MissingInputFile,
    InvalidOption(String),
    InvalidValueType(String),
    InvalidEntry(String),
    MissingValue(String),
}

impl std::fmt::Display for ParseArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInputFile => write!(f, "missing input file"),
            Self::InvalidOption(s) => write!(f, "invalid option: {s}"),
            Self::InvalidValueType(s) => write!(f, "invalid value type: {s}"),
            Self::InvalidEntry(s) => write!(f, "invalid entry (expected key=value): {s}"),
            Self::MissingValue(s) => write!(f, "missing value for {s}"),
        }
    }
}

impl std::error::Error for ParseArgError {}

impl Args {
    pub fn parse() -> Result<Self, ParseArgError> {
        Self::parse_from(std::env::args().skip(1).collect())
    }

    pub fn parse_from(args: Vec<String>) -> Result<Self, ParseArgError> {
        let mut result = Args::default();
        let mut args_iter = args.iter();
        let mut force_positional = false;

        while let Some(arg) = args_iter.next() {
            if arg == "--" {
                force_positional = true;
                continue;
            }

            if !force_positional && arg.eq_ignore_ascii_case("-o") {
                let next = args_iter
                    .next()
                    .ok_or(ParseArgError::MissingValue("-o".into()))?;
                result.output_file = Some(PathBuf::from(next));
                continue;
            }

            let option = if force_positional {
                None
            } else {
                arg.strip_prefix('/').or_else(|| arg.strip_prefix('-'))
            };

            match option {
                Some(opt) => match parse_option(&mut result, opt) {
                    Ok(()) => {}
                    // Absolute Unix paths look like options; a further `/` marks a path.
                    Err(ParseArgError::InvalidOption(_))
                        if result.input_file.is_none()
                            && arg.starts_with('/')
                            && opt.contains('/') =>
                    {
                        result.input_file = Some(PathBuf::from(arg));
                    }
                    Err(ParseArgError::InvalidOption(_)) => {
                        return Err(ParseArgError::InvalidOption(arg.clone()));
                    }
                    Err(e) => return Err(e),
                },
                None if result.input_file.is_none() => {
                    result.input_file = Some(PathBuf::from(arg));
                }
                None => return Err(ParseArgError::InvalidOption(arg.clone())),
            }
        }

        Ok(result)
    }
}
