//! The boundary with the host's stream framework.

use pcmhook_config::ConfigNode;
use pcmhook_core::{HookError, StreamAttributes};

use crate::areas::{Areas, AreasMut};

/// Identifies this plugin to the host when it is attached to a slave stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: &'static str,
    /// Extension-plugin protocol version, `major << 16 | minor << 8 | tiny`.
    pub version: u32,
}

pub const PLUGIN: PluginDescriptor = PluginDescriptor {
    name: "PCM Hook Plugin",
    version: (1 << 16) | 2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamDirection {
    Playback,
    Capture,
}

/// Arguments the host passes to the plugin's open entry point.
#[derive(Debug, Clone, Copy)]
pub struct OpenRequest<'a> {
    pub pcm_name: &'a str,
    pub conf: &'a ConfigNode,
    pub stream: StreamDirection,
    /// Host open-mode flags, passed through untouched.
    pub mode: i32,
}

/// The host's stream-creation mechanism.
pub trait PcmHost {
    type Handle;

    /// Opens the slave described by `slave` and attaches the plugin on top of it.
    fn create_ext_plug(
        &mut self,
        plugin: &PluginDescriptor,
        pcm_name: &str,
        slave: &ConfigNode,
        stream: StreamDirection,
        mode: i32,
    ) -> Result<Self::Handle, HookError>;
}

/// Callbacks the host drives, one at a time, over a stream's life.
pub trait ExtPlugCallbacks {
    /// Channels, rate and format have been negotiated.
    fn hw_params(&mut self, attributes: StreamAttributes) -> Result<(), HookError>;

    /// The stream is being prepared.
    fn init(&mut self) -> Result<(), HookError>;

    fn hw_free(&mut self) -> Result<(), HookError>;

    /// Moves `frames` frames from `src` to `dst`; returns the frames moved.
    fn transfer(
        &mut self,
        dst: &mut AreasMut<'_>,
        dst_offset: usize,
        src: &Areas<'_>,
        src_offset: usize,
        frames: usize,
    ) -> Result<usize, HookError>;

    /// Final transition; releases everything the plugin owns.
    fn close(self) -> Result<(), HookError>
    where
        Self: Sized;
}
