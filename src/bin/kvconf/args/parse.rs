use super::parse_util::{parse_entry, parse_value_type, split_option, strip_quotes};
use super::types::{Args, ParseArgError};

type ValueParser = fn(&mut Args, &str, &str) -> Result<bool, ParseArgError>;

fn parse_simple_flag(args: &mut Args, opt_upper: &str) -> bool {
    match opt_upper {
        "S" => {
            args.silent = true;
            true
        }
        "V" => {
            args.verbose = true;
            true
        }
        _ => false,
    }
}

fn parse_token_option(args: &mut Args, key_upper: &str, value: &str) -> Result<bool, ParseArgError> {
    let target = match key_upper {
        "D" => &mut args.delimiter,
        "C" => &mut args.comment,
        "EOF" => &mut args.sentry,
        _ => return Ok(false),
    };
    *target = Some(strip_quotes(value).to_string());
    Ok(true)
}

fn parse_edit_option(args: &mut Args, key_upper: &str, value: &str) -> Result<bool, ParseArgError> {
    match key_upper {
        "R" => {
            args.remove_keys.push(required(key_upper, value)?);
            Ok(true)
        }
        "A" => {
            args.add_entries.push(parse_entry(value)?);
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn parse_query_option(
    args: &mut Args,
    key_upper: &str,
    value: &str,
) -> Result<bool, ParseArgError> {
    match key_upper {
        "K" => {
            args.check_key = Some(required(key_upper, value)?);
            Ok(true)
        }
        "G" => {
            args.get_key = Some(required(key_upper, value)?);
            Ok(true)
        }
        "T" => {
            args.value_type = parse_value_type(value)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn required(key_upper: &str, value: &str) -> Result<String, ParseArgError> {
    let value = strip_quotes(value);
    if value.is_empty() {
        return Err(ParseArgError::MissingValue(format!("/{key_upper}")));
    }
    Ok(value.to_string())
}

pub(super) fn parse_option(args: &mut Args, opt: &str) -> Result<(), ParseArgError> {
    let opt_upper = opt.to_ascii_uppercase();

    if parse_simple_flag(args, &opt_upper) {
        return Ok(());
    }

    let Some((key, value)) = split_option(opt) else {
        return Err(ParseArgError::InvalidOption(opt.to_string()));
    };
    let key_upper = key.to_ascii_uppercase();

    let parsers: &[ValueParser] = &[parse_token_option, parse_edit_option, parse_query_option];
    for parser in parsers {
        if parser(args, &key_upper, value)? {
            return Ok(());
        }
    }
    Err(ParseArgError::InvalidOption(opt.to_string()))
}
