use kvconf::ConfigParser;

use super::error::{CliError, ExecuteOutput};
use super::io::{load_input, options_for_args, write_output};
use super::types::{Args, ParseArgError, ValueType};

impl Args {
    pub fn execute(&self) -> Result<ExecuteOutput, CliError> {
        let input = self
            .input_file
            .as_ref()
            .ok_or(ParseArgError::MissingInputFile)?;
        let mut config = load_input(input, options_for_args(self))?;
        self.apply_edits(&mut config)?;

        let mut output = ExecuteOutput::default();

        if let Some(ref key) = self.check_key
            && !config.key_exists(key)
        {
            return Err(kvconf::Error::KeyNotFound(key.clone()).into());
        }

        if let Some(ref key) = self.get_key {
            output.stdout.push_str(&render_value(&config, key, self.value_type)?);
            output.stdout.push('\n');
        }

        if let Some(ref path) = self.output_file {
            write_output(&config, path)?;
        } else if self.get_key.is_none() && self.check_key.is_none() {
            output.stdout.push_str(&config.to_string());
        }

        Ok(output)
    }

    fn apply_edits(&self, config: &mut ConfigParser) -> Result<(), CliError> {
        for key in &self.remove_keys {
            config.remove(key)?;
        }
        for (key, value) in &self.add_entries {
            config.add(key, value);
        }
        Ok(())
    }
}

fn render_value(config: &ConfigParser, key: &str, value_type: ValueType) -> Result<String, CliError> {
    let rendered = match value_type {
        ValueType::Str => config.get::<String>(key)?,
        ValueType::Int => config.get::<i64>(key)?.to_string(),
        ValueType::UInt => config.get::<u64>(key)?.to_string(),
        ValueType::Float => config.get::<f64>(key)?.to_string(),
        ValueType::Bool => config.get::<bool>(key)?.to_string(),
    };
    Ok(rendered)
}
