//! Configuration from environment variables (a `.env` file is loaded by the binary).
//!
//! - `CHATMARK_ESCAPE_LINKS`: escape link labels and URLs; default off
//! - `CHATMARK_SHOW_SYSTEM`: keep system messages in rendered transcripts; default off

use std::env;

use crate::core::markdown::RenderOptions;

pub const ESCAPE_LINKS_VAR: &str = "CHATMARK_ESCAPE_LINKS";
pub const SHOW_SYSTEM_VAR: &str = "CHATMARK_SHOW_SYSTEM";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub render: RenderOptions,
    pub show_system: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a boolean (1/0, true/false, yes/no, on/off), got {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

/// Load configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    load_from(|var| env::var(var).ok())
}

/// Load configuration through `lookup`, which returns a variable's value if set.
pub fn load_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let escape_links = bool_var(&lookup, ESCAPE_LINKS_VAR)?.unwrap_or(false);
    let show_system = bool_var(&lookup, SHOW_SYSTEM_VAR)?.unwrap_or(false);
    Ok(Config {
        render: RenderOptions { escape_links },
        show_system,
    })
}

fn bool_var<F>(lookup: &F, var: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}
