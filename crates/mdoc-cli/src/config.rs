//! Configuration file support for the mdoc CLI
//!
//! Loads settings from a `_mdoc.toml` file next to the input.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_mdoc.toml";

/// Schema path written into generated configuration files
pub const SCHEMA_PATH: &str = "crates/mdoc-cli/schema/mdoc.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Output configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Markdown parsing configuration
    #[serde(skip_serializing_if = "ParseConfig::is_empty")]
    pub parse: ParseConfig,
}

/// Output configuration
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Keep YAML front matter in both directions (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_matter: Option<bool>,
    /// Pretty-print document JSON (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.front_matter.is_none() && self.pretty.is_none()
    }
}

/// Markdown parsing configuration
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ParseConfig {
    /// Run text fixups such as unescaping `\[ ]` task markers (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixups: Option<bool>,
}

impl ParseConfig {
    fn is_empty(&self) -> bool {
        self.fixups.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_mdoc.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_PATH, toml_content))
    }

    /// Sample configuration spelling out every default, for `--init`
    pub fn sample() -> Self {
        Config {
            output: OutputConfig {
                front_matter: Some(true),
                pretty: Some(false),
            },
            parse: ParseConfig { fixups: Some(true) },
        }
    }
}
