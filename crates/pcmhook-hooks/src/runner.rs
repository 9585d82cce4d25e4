//! Runs rendered commands and absorbs their failures.

use pcmhook_process::{ShellExit, ShellRunner};

use crate::template::RenderContext;

/// What happened to a rendered command. Informational only: every outcome is
/// a success from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// No command was configured or rendering produced none.
    Skipped,
    Succeeded,
    NonZero(ShellExit),
    /// The shell could not be started.
    SpawnFailed,
}

/// Runs `command` to completion, consuming it.
///
/// Spawn failures are always reported; non-zero exits only at debug > 0.
pub fn execute<R>(ctx: &RenderContext<'_>, command: Option<String>, shell: &mut R) -> CommandOutcome
where
    R: ShellRunner + ?Sized,
{
    let Some(command) = command else {
        return CommandOutcome::Skipped;
    };

    match shell.run(&command) {
        Ok(exit) if exit.success() => CommandOutcome::Succeeded,
        Ok(exit) => {
            if ctx.debug.is_verbose() {
                tracing::warn!(
                    "The PCM {} got a non zero return {} from command {}",
                    ctx.pcm_name,
                    exit,
                    command
                );
            }
            CommandOutcome::NonZero(exit)
        }
        Err(e) => {
            tracing::error!(
                "The PCM {} failed to run command {}: {}",
                ctx.pcm_name,
                command,
                e
            );
            CommandOutcome::SpawnFailed
        }
    }
}
