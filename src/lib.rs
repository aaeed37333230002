//! Reader for `key = value` configuration files.
//!
//! Supports trailing comments, values continued over several lines, and an
//! optional sentry token that marks the logical end of the data:
//!
//! ```text
//! # server settings
//! host = example.org
//! motd = Welcome,
//!        please behave.
//!
//! port = 8080   # continuation ended by the blank line above
//! ```
//!
//! ```
//! use kvconf::{ConfigOptions, ConfigParser};
//!
//! let text = "host = example.org\nport = 8080 # default\n";
//! let cfg = ConfigParser::from_reader(text.as_bytes(), ConfigOptions::default()).unwrap();
//! assert_eq!(cfg.get::<u16>("port").unwrap(), 8080);
//! assert_eq!(cfg.to_string(), "host = example.org\nport = 8080\n");
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod value;

pub use config::{ConfigOptions, ConfigParser};
pub use error::Error;
pub use io::{
    Contents, parse_config, parse_config_into, parse_config_str, trim, write_config,
    write_config_string,
};
pub use value::ConfigValue;
