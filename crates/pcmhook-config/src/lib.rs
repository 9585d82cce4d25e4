//! Plugin configuration: the host's node tree, its validation, and a TOML adapter.

pub mod load;
pub mod node;
pub mod validate;

pub use load::{default_config_path, load_pcm_definition, node_from_toml};
pub use node::{ConfigNode, ConfigValue};
pub use validate::{HookTemplates, PluginConfig};
