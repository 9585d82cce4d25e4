//! TOML front-end for the configuration node tree.
//!
//! The plugin itself only ever sees [`ConfigNode`] trees built by its host.
//! This module lets standalone tooling describe the same tree in TOML:
//!
//! ```toml
//! [pcm.hooked]
//! type = "volumiohook"
//! debug = 1
//! hw_params_command = "/usr/local/bin/rate-changed %r %f"
//!
//! [pcm.hooked.slave]
//! pcm = "hw:0,0"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::node::{ConfigNode, ConfigValue};

/// Converts a TOML value into a node named `id`.
///
/// Tables become compounds, arrays become compounds with numeric ids, and
/// values the host has no type for (booleans, datetimes) become strings.
pub fn node_from_toml(id: &str, value: &toml::Value) -> ConfigNode {
    let value = match value {
        toml::Value::Integer(v) => ConfigValue::Integer(*v),
        toml::Value::Float(v) => ConfigValue::Real(*v),
        toml::Value::String(s) => ConfigValue::String(s.clone()),
        toml::Value::Boolean(b) => ConfigValue::String(b.to_string()),
        toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
        toml::Value::Array(items) => ConfigValue::Compound(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| node_from_toml(&idx.to_string(), item))
                .collect(),
        ),
        toml::Value::Table(table) => ConfigValue::Compound(
            table
                .iter()
                .map(|(key, item)| node_from_toml(key, item))
                .collect(),
        ),
    };
    ConfigNode::new(id, value)
}

/// Reads `path` and returns the node for `[pcm.<pcm_name>]`.
pub fn load_pcm_definition(path: &Path, pcm_name: &str) -> Result<ConfigNode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let root: toml::Table = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let definition = root
        .get("pcm")
        .and_then(|pcm| pcm.get(pcm_name))
        .with_context(|| format!("no [pcm.{pcm_name}] in {}", path.display()))?;

    tracing::debug!(pcm = pcm_name, path = %path.display(), "Loaded PCM definition");
    Ok(node_from_toml(pcm_name, definition))
}

/// Default definitions file: `<config dir>/pcmhook/pcm.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pcmhook").map(|dirs| dirs.config_dir().join("pcm.toml"))
}
