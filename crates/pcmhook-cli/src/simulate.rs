//! In-process host that opens a hook and walks it through a stream's life.

use std::io;

use anyhow::{Context, Result};
use pcmhook_config::ConfigNode;
use pcmhook_core::{HookError, StreamAttributes};
use pcmhook_hooks::{
    Areas, AreasMut, ChannelArea, ExtPlugCallbacks, OpenRequest, PcmHost, PluginDescriptor,
    StreamDirection, open,
};
use pcmhook_process::{ShellExit, ShellRunner};

/// Accepts any slave and names it after its `pcm` entry.
#[derive(Debug, Default)]
pub struct SimulatedHost;

impl PcmHost for SimulatedHost {
    type Handle = String;

    fn create_ext_plug(
        &mut self,
        plugin: &PluginDescriptor,
        pcm_name: &str,
        slave: &ConfigNode,
        _stream: StreamDirection,
        _mode: i32,
    ) -> Result<Self::Handle, HookError> {
        let target = slave
            .as_str()
            .or_else(|| slave.child("pcm").and_then(ConfigNode::as_str))
            .unwrap_or("default");
        tracing::info!(plugin = plugin.name, "Attached {pcm_name} to slave {target}");
        Ok(target.to_string())
    }
}

/// A command the hook handed to the shell, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub command: String,
    pub exit: Result<ShellExit, String>,
}

/// Wraps a shell and remembers everything it was asked to run.
struct Recorder<R> {
    inner: R,
    executed: Vec<ExecutedCommand>,
}

impl<R: ShellRunner> ShellRunner for Recorder<R> {
    fn run(&mut self, command: &str) -> io::Result<ShellExit> {
        let result = self.inner.run(command);
        self.executed.push(ExecutedCommand {
            command: command.to_string(),
            exit: result.as_ref().copied().map_err(ToString::to_string),
        });
        result
    }
}

/// What a simulated lifecycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub slave: String,
    /// Commands in the order they ran.
    pub executed: Vec<ExecutedCommand>,
    pub frames_transferred: usize,
}

/// Opens `conf` as `pcm_name` and runs hw_params, prepare, one transfer of
/// silence, hw_free and close.
pub fn run_simulation<R: ShellRunner>(
    pcm_name: &str,
    conf: &ConfigNode,
    attributes: StreamAttributes,
    frames: usize,
    shell: R,
) -> Result<SimulationReport> {
    let request = OpenRequest {
        pcm_name,
        conf,
        stream: StreamDirection::Playback,
        mode: 0,
    };
    let mut recorder = Recorder {
        inner: shell,
        executed: Vec::new(),
    };
    let pcm = open(&mut SimulatedHost, &request, &mut recorder)
        .with_context(|| format!("failed to open PCM {pcm_name}"))?;
    let (slave, mut instance) = pcm.into_parts();

    instance.hw_params(attributes)?;
    instance.init()?;

    let layout = ChannelArea::interleaved(attributes.channels, attributes.format);
    let frame_bytes = attributes.format.physical_width() as usize * attributes.channels as usize / 8;
    let silence = vec![0u8; frame_bytes * frames];
    let mut sink = vec![0u8; silence.len()];
    let frames_transferred = instance
        .transfer(
            &mut AreasMut {
                buf: &mut sink,
                channels: &layout,
            },
            0,
            &Areas {
                buf: &silence,
                channels: &layout,
            },
            0,
            frames,
        )
        .context("transfer failed")?;

    instance.hw_free()?;
    instance.close()?;

    Ok(SimulationReport {
        slave,
        executed: recorder.executed,
        frames_transferred,
    })
}
