//! Environment variable substitution for secrets in configuration
//!
//! Passwords and tokens are usually kept out of the YAML file and referenced
//! as `${VAR_NAME}`. Only the fields that carry secrets are substituted.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::env;

use crate::config::ConfigError;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env pattern is valid"));

/// Replace every `${VAR}` in `input` with the variable's value.
///
/// All missing variables are reported at once, in order of first use.
///
/// ```ignore
/// use manila_conformance::env::substitute_env_vars;
///
/// std::env::set_var("OS_PASSWORD", "secret");
/// assert_eq!(substitute_env_vars("${OS_PASSWORD}").unwrap(), "secret");
/// ```
pub fn substitute_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut missing: Vec<String> = Vec::new();

    let output = ENV_VAR_PATTERN.replace_all(input, |caps: &Captures| {
        let name = &caps[1];
        match env::var(name) {
            Ok(value) => value,
            Err(_) => {
                if !missing.iter().any(|m| m == name) {
                    missing.push(name.to_string());
                }
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(output.into_owned())
    } else {
        Err(ConfigError::MissingEnvironment(missing))
    }
}

/// Whether `input` references the environment at all
pub fn references_env(input: &str) -> bool {
    ENV_VAR_PATTERN.is_match(input)
}
