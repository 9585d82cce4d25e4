//! Lifecycle transitions that carry a hook command.

use std::fmt;

/// Stream transitions at which a configured command template is rendered and run.
///
/// Close is deliberately absent: it only releases the instance and never runs
/// a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Channels, rate and format have just been negotiated.
    HwParams,
    /// The stream is about to start transferring data.
    Prepare,
    /// Hardware parameters are being released (reconfiguration or shutdown).
    HwFree,
}

impl HookEvent {
    pub const ALL: [HookEvent; 3] = [HookEvent::HwParams, HookEvent::Prepare, HookEvent::HwFree];

    /// Returns the configuration key holding this event's template.
    ///
    /// ```text
    /// pcm.hooked {
    ///     type volumiohook
    ///     slave.pcm "hw:0"
    ///     hw_params_command "echo %r > /tmp/rate"
    /// }
    /// ```
    pub fn as_config_key(&self) -> &'static str {
        match self {
            HookEvent::HwParams => "hw_params_command",
            HookEvent::Prepare => "prepare_command",
            HookEvent::HwFree => "hw_free_command",
        }
    }

    /// Looks up the event owning a configuration key.
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.as_config_key() == key)
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookEvent::HwParams => "hw_params",
            HookEvent::Prepare => "prepare",
            HookEvent::HwFree => "hw_free",
        };
        f.write_str(name)
    }
}
