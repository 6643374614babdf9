//! Engine configuration.

use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the generation timeout in whole seconds.
pub const GENERATION_TIMEOUT_ENV: &str = "STORYPLAN_GENERATION_TIMEOUT_SECS";

/// Environment variable holding the number of exercises requested per batch.
pub const EXERCISE_BATCH_SIZE_ENV: &str = "STORYPLAN_EXERCISE_BATCH_SIZE";

const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_EXERCISE_BATCH_SIZE: usize = 5;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidValue {
        /// The offending variable name.
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// Tunables shared by every engine handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on a single content-generator call.
    pub generation_timeout: Duration,
    /// How many exercises to request when generating a topic's exercise set.
    pub exercise_batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            exercise_batch_size: DEFAULT_EXERCISE_BATCH_SIZE,
        }
    }
}

impl EngineConfig {
    /// Reads configuration from the process environment, falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set to something
    /// other than a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a present value is not a
    /// positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_positive(&lookup, GENERATION_TIMEOUT_ENV)? {
            config.generation_timeout = Duration::from_secs(secs);
        }
        if let Some(size) = parse_positive(&lookup, EXERCISE_BATCH_SIZE_ENV)? {
            config.exercise_batch_size = usize::try_from(size).map_err(|_| {
                ConfigError::InvalidValue {
                    key: EXERCISE_BATCH_SIZE_ENV,
                    value: size.to_string(),
                }
            })?;
        }

        Ok(config)
    }
}

fn parse_positive<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(config.exercise_batch_size, 5);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (GENERATION_TIMEOUT_ENV, "12"),
            (EXERCISE_BATCH_SIZE_ENV, " 3 "),
        ]))
        .unwrap();

        assert_eq!(config.generation_timeout, Duration::from_secs(12));
        assert_eq!(config.exercise_batch_size, 3);
    }

    #[test]
    fn test_zero_is_rejected() {
        let result = EngineConfig::from_lookup(lookup_from(&[(EXERCISE_BATCH_SIZE_ENV, "0")]));

        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, EXERCISE_BATCH_SIZE_ENV);
                assert_eq!(value, "0");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result =
            EngineConfig::from_lookup(lookup_from(&[(GENERATION_TIMEOUT_ENV, "soon")]));

        assert!(result.is_err());
    }
}
