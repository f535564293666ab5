use std::path::PathBuf;

use lot_graph::GraphConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unexpected argument: {value} (usage: lotline [scenario.json])")]
    UnexpectedArgument { value: String },
}

/// Where the operation sequence comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenarioSource {
    Builtin,
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub scenario: ScenarioSource,
    pub graph: GraphConfig,
}

impl AppConfig {
    /// Parses the argument list after the binary name.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        let scenario = match args.next() {
            Some(path) => ScenarioSource::File(PathBuf::from(path)),
            None => ScenarioSource::Builtin,
        };
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument { value: extra });
        }
        Ok(Self {
            scenario,
            graph: GraphConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_selects_builtin() {
        let config = AppConfig::from_args(std::iter::empty()).unwrap();
        assert_eq!(config.scenario, ScenarioSource::Builtin);
    }

    #[test]
    fn one_arg_selects_file() {
        let config = AppConfig::from_args(["ops.json".to_string()].into_iter()).unwrap();
        assert_eq!(
            config.scenario,
            ScenarioSource::File(PathBuf::from("ops.json"))
        );
    }

    #[test]
    fn extra_args_are_rejected() {
        let err =
            AppConfig::from_args(["a".to_string(), "b".to_string()].into_iter()).unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedArgument { .. }));
    }
}
