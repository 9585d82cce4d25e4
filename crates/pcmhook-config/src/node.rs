//! Already-parsed configuration tree handed over by the host.

use serde::Serialize;

/// A named configuration entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigNode {
    pub id: String,
    pub value: ConfigValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Integer(i64),
    Real(f64),
    String(String),
    Compound(Vec<ConfigNode>),
}

impl ConfigNode {
    pub fn new(id: impl Into<String>, value: ConfigValue) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    pub fn integer(id: impl Into<String>, value: i64) -> Self {
        Self::new(id, ConfigValue::Integer(value))
    }

    pub fn string(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(id, ConfigValue::String(value.into()))
    }

    pub fn compound(id: impl Into<String>, children: Vec<ConfigNode>) -> Self {
        Self::new(id, ConfigValue::Compound(children))
    }

    /// Integer value; strings are never coerced.
    pub fn as_integer(&self) -> Option<i64> {
        match self.value {
            ConfigValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Children of a compound node, `None` for scalars.
    pub fn children(&self) -> Option<&[ConfigNode]> {
        match &self.value {
            ConfigValue::Compound(children) => Some(children),
            _ => None,
        }
    }

    /// Direct child lookup by id (last match wins, like the host's merge rules).
    pub fn child(&self, id: &str) -> Option<&ConfigNode> {
        self.children()?.iter().rev().find(|node| node.id == id)
    }
}
