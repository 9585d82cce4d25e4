//! Construction-time validation of a plugin's configuration node.

use pcmhook_core::{DebugLevel, HookError, HookEvent};
use serde::Serialize;

use crate::node::ConfigNode;

/// Keys the host always passes along that carry no meaning for the plugin.
const IGNORED_KEYS: [&str; 2] = ["comment", "type"];

/// Owned command templates, one optional slot per hook event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HookTemplates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepare: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw_free: Option<String>,
}

impl HookTemplates {
    pub fn get(&self, event: HookEvent) -> Option<&str> {
        self.slot(event).as_deref()
    }

    pub fn set(&mut self, event: HookEvent, template: Option<String>) {
        *self.slot_mut(event) = template;
    }

    /// Releases every template. Safe to call any number of times.
    pub fn clear(&mut self) {
        for event in HookEvent::ALL {
            self.slot_mut(event).take();
        }
    }

    pub fn is_empty(&self) -> bool {
        HookEvent::ALL.iter().all(|event| self.slot(*event).is_none())
    }

    fn slot(&self, event: HookEvent) -> &Option<String> {
        match event {
            HookEvent::HwParams => &self.hw_params,
            HookEvent::Prepare => &self.prepare,
            HookEvent::HwFree => &self.hw_free,
        }
    }

    fn slot_mut(&mut self, event: HookEvent) -> &mut Option<String> {
        match event {
            HookEvent::HwParams => &mut self.hw_params,
            HookEvent::Prepare => &mut self.prepare,
            HookEvent::HwFree => &mut self.hw_free,
        }
    }
}

/// A fully validated plugin definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginConfig {
    pub pcm_name: String,
    /// Downstream target, passed untouched to the host when the stream is created.
    pub slave: ConfigNode,
    pub debug: DebugLevel,
    pub templates: HookTemplates,
}

impl PluginConfig {
    /// Validates the host's configuration node for the PCM named `pcm_name`.
    ///
    /// The first unknown key or mistyped value aborts validation. Errors are
    /// reported on the diagnostic channel as well as returned.
    pub fn from_node(pcm_name: &str, conf: &ConfigNode) -> Result<Self, HookError> {
        let entries = conf
            .children()
            .ok_or_else(|| report(HookError::NotCompound(pcm_name.to_string())))?;

        let mut slave = None;
        let mut debug = 0;
        let mut commands: [Option<&str>; 3] = [None; 3];

        for entry in entries {
            let id = entry.id.as_str();
            if IGNORED_KEYS.contains(&id) {
                continue;
            }
            if id == "slave" {
                slave = Some(entry);
                continue;
            }
            if id == "debug" {
                debug = entry
                    .as_integer()
                    .ok_or_else(|| report(HookError::InvalidType(id.to_string())))?;
                continue;
            }
            if let Some(event) = HookEvent::from_config_key(id) {
                let template = entry
                    .as_str()
                    .ok_or_else(|| report(HookError::InvalidType(id.to_string())))?;
                commands[event_index(event)] = Some(template);
                continue;
            }
            return Err(report(HookError::UnknownField(id.to_string())));
        }

        let slave = slave.ok_or_else(|| report(HookError::MissingSlave(pcm_name.to_string())))?;

        // Each slot is filled from its own key; partially copied templates are
        // dropped with `templates` if a later copy fails.
        let mut templates = HookTemplates::default();
        for event in HookEvent::ALL {
            if let Some(template) = commands[event_index(event)] {
                templates.set(event, Some(copy_template(event, template)?));
            }
        }

        Ok(Self {
            pcm_name: pcm_name.to_string(),
            slave: slave.clone(),
            debug: DebugLevel::clamped(debug),
            templates,
        })
    }
}

fn event_index(event: HookEvent) -> usize {
    match event {
        HookEvent::HwParams => 0,
        HookEvent::Prepare => 1,
        HookEvent::HwFree => 2,
    }
}

fn copy_template(event: HookEvent, template: &str) -> Result<String, HookError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(template.len())
        .map_err(|_| report(HookError::OutOfMemory(event.as_config_key().to_string())))?;
    owned.push_str(template);
    Ok(owned)
}

fn report(err: HookError) -> HookError {
    tracing::error!("{err}");
    err
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
