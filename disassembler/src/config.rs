use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use tcod_nls::Encoding;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub level_filter: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { level_filter: LevelFilter::Info }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisasmConfig {
    pub logger_config: LoggerConfig,
    /// Text encoding of FTBL names and STRG.
    pub encoding: Encoding,
    pub output_extension: String,
    /// Also write a `<stem>.yaml` summary per input.
    pub emit_yaml: bool,
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self {
            logger_config: LoggerConfig::default(),
            encoding: Encoding::default(),
            output_extension: "txt".to_string(),
            emit_yaml: false,
        }
    }
}

impl DisasmConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = DisasmConfig::from_toml(
            r#"
            encoding = "utf8"
            emit_yaml = true

            [logger_config]
            level_filter = "Debug"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            DisasmConfig {
                logger_config: LoggerConfig { level_filter: LevelFilter::Debug },
                encoding: Encoding::Utf8,
                output_extension: "txt".to_string(),
                emit_yaml: true,
            }
        );
    }

    #[test]
    fn empty_config() {
        assert_eq!(DisasmConfig::from_toml("").unwrap(), DisasmConfig::default());
    }
}
