use pxshot_json::{ParseOptions, Serializer, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "pxjson.config.json";

/// pxjson configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Indent used by `fmt`; an empty string prints compact output
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Reject content after the first value
    #[serde(default)]
    pub strict: bool,

    /// Deepest array/object nesting accepted
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse options with command-line flags layered over the file values
    pub fn parse_options(&self, strict: bool, max_depth: Option<usize>) -> ParseOptions {
        ParseOptions::default()
            .require_end(self.strict || strict)
            .max_depth(max_depth.unwrap_or(self.max_depth))
    }

    pub fn serializer(&self, compact: bool, indent: Option<&str>) -> Serializer {
        match indent.unwrap_or(&self.indent) {
            _ if compact => Serializer::compact(),
            "" => Serializer::compact(),
            indent => Serializer::with_indent(indent),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            strict: false,
            max_depth: default_max_depth(),
        }
    }
}
