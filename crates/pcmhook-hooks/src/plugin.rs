//! Plugin construction entry point.

use pcmhook_config::PluginConfig;
use pcmhook_core::HookError;
use pcmhook_process::ShellRunner;

use crate::controller::HookInstance;
use crate::host::{OpenRequest, PLUGIN, PcmHost};

/// A hook instance registered with the host on top of its slave stream.
#[derive(Debug)]
pub struct HookedPcm<H, R: ShellRunner> {
    handle: H,
    instance: HookInstance<R>,
}

impl<H, R: ShellRunner> HookedPcm<H, R> {
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn instance(&self) -> &HookInstance<R> {
        &self.instance
    }

    pub fn instance_mut(&mut self) -> &mut HookInstance<R> {
        &mut self.instance
    }

    pub fn into_parts(self) -> (H, HookInstance<R>) {
        (self.handle, self.instance)
    }
}

/// Validates `request.conf`, builds the hook instance and registers it with
/// the host against the configured slave.
///
/// Nothing is exposed on failure: a half-built instance is torn down before
/// the error is returned.
pub fn open<H, R>(
    host: &mut H,
    request: &OpenRequest<'_>,
    shell: R,
) -> Result<HookedPcm<H::Handle, R>, HookError>
where
    H: PcmHost,
    R: ShellRunner,
{
    let PluginConfig {
        pcm_name,
        slave,
        debug,
        templates,
    } = PluginConfig::from_node(request.pcm_name, request.conf)?;

    let instance = HookInstance::new(pcm_name, debug, templates, shell);

    let handle = match host.create_ext_plug(
        &PLUGIN,
        request.pcm_name,
        &slave,
        request.stream,
        request.mode,
    ) {
        Ok(handle) => handle,
        Err(err) => {
            tracing::error!("PCM {} could not attach to its slave: {}", request.pcm_name, err);
            // Dropping the instance runs the same teardown as close.
            drop(instance);
            return Err(err);
        }
    };

    tracing::debug!(pcm = request.pcm_name, plugin = PLUGIN.name, "Hook attached");
    Ok(HookedPcm { handle, instance })
}

/// [`open`] for hosts that speak negative errno.
pub fn open_raw<H, R>(
    host: &mut H,
    request: &OpenRequest<'_>,
    shell: R,
) -> Result<HookedPcm<H::Handle, R>, i32>
where
    H: PcmHost,
    R: ShellRunner,
{
    open(host, request, shell).map_err(|err| err.errno())
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
