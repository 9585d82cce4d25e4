//! Per-stream hook state and the lifecycle callbacks that drive it.

use pcmhook_config::HookTemplates;
use pcmhook_core::{DebugLevel, HookError, HookEvent, StreamAttributes};
use pcmhook_process::ShellRunner;

use crate::areas::{Areas, AreasMut, copy_areas};
use crate::host::ExtPlugCallbacks;
use crate::runner::{self, CommandOutcome};
use crate::template::{self, RenderContext};

/// One hook attachment.
///
/// Templates are fixed at construction. Stream attributes are known from
/// `hw_params` until `close`. Dropping the instance releases the same
/// resources as `close`.
#[derive(Debug)]
pub struct HookInstance<R: ShellRunner> {
    pcm_name: String,
    debug: DebugLevel,
    templates: HookTemplates,
    attributes: Option<StreamAttributes>,
    shell: R,
}

impl<R: ShellRunner> HookInstance<R> {
    pub fn new(pcm_name: impl Into<String>, debug: DebugLevel, templates: HookTemplates, shell: R) -> Self {
        Self {
            pcm_name: pcm_name.into(),
            debug,
            templates,
            attributes: None,
            shell,
        }
    }

    pub fn pcm_name(&self) -> &str {
        &self.pcm_name
    }

    pub fn debug(&self) -> DebugLevel {
        self.debug
    }

    pub fn templates(&self) -> &HookTemplates {
        &self.templates
    }

    pub fn attributes(&self) -> Option<StreamAttributes> {
        self.attributes
    }

    pub fn shell(&self) -> &R {
        &self.shell
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            pcm_name: &self.pcm_name,
            attributes: self.attributes,
            debug: self.debug,
        }
    }

    /// Renders `event`'s template against the current attributes.
    pub fn render(&self, event: HookEvent) -> Option<String> {
        template::render(self.templates.get(event), &self.render_context())
    }

    /// Renders and runs `event`'s command, blocking until it exits.
    pub fn run_event(&mut self, event: HookEvent) -> CommandOutcome {
        let ctx = RenderContext {
            pcm_name: &self.pcm_name,
            attributes: self.attributes,
            debug: self.debug,
        };
        let command = template::render(self.templates.get(event), &ctx);
        let outcome = runner::execute(&ctx, command, &mut self.shell);
        tracing::debug!(pcm = %self.pcm_name, %event, ?outcome, "Hook finished");
        outcome
    }

    /// Releases templates and attributes. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.templates.clear();
        self.attributes = None;
    }
}

impl<R: ShellRunner> ExtPlugCallbacks for HookInstance<R> {
    fn hw_params(&mut self, attributes: StreamAttributes) -> Result<(), HookError> {
        self.attributes = Some(attributes);
        self.run_event(HookEvent::HwParams);
        Ok(())
    }

    fn init(&mut self) -> Result<(), HookError> {
        self.run_event(HookEvent::Prepare);
        Ok(())
    }

    fn hw_free(&mut self) -> Result<(), HookError> {
        self.run_event(HookEvent::HwFree);
        Ok(())
    }

    fn transfer(
        &mut self,
        dst: &mut AreasMut<'_>,
        dst_offset: usize,
        src: &Areas<'_>,
        src_offset: usize,
        frames: usize,
    ) -> Result<usize, HookError> {
        let attributes = self.attributes.ok_or_else(|| {
            HookError::AreaCopy(format!("PCM {} has no negotiated parameters", self.pcm_name))
        })?;
        copy_areas(
            dst,
            dst_offset,
            src,
            src_offset,
            attributes.channels,
            frames,
            attributes.format,
        )?;
        Ok(frames)
    }

    fn close(mut self) -> Result<(), HookError> {
        if self.debug.is_verbose() {
            tracing::info!("PCM close called for {}", self.pcm_name);
        }
        self.teardown();
        Ok(())
    }
}

impl<R: ShellRunner> Drop for HookInstance<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
