//! Tests for the hook lifecycle.

use super::*;
use crate::areas::ChannelArea;
use crate::test_log::capture_logs;
use pcmhook_core::SampleFormat;
use pcmhook_process::{DryRunShell, ShellExit, SystemShell};
use std::collections::VecDeque;
use std::io;

/// Records every command and answers with scripted exits (default: success).
#[derive(Debug, Default)]
struct ScriptedShell {
    commands: Vec<String>,
    replies: VecDeque<io::Result<ShellExit>>,
}

impl ScriptedShell {
    fn replying(replies: Vec<io::Result<ShellExit>>) -> Self {
        Self {
            commands: Vec::new(),
            replies: replies.into(),
        }
    }
}

impl ShellRunner for ScriptedShell {
    fn run(&mut self, command: &str) -> io::Result<ShellExit> {
        self.commands.push(command.to_string());
        self.replies.pop_front().unwrap_or(Ok(ShellExit::Code(0)))
    }
}

fn all_templates() -> HookTemplates {
    HookTemplates {
        hw_params: Some("params %c %r %f %d".to_string()),
        prepare: Some("prepare %r".to_string()),
        hw_free: Some("free %c".to_string()),
    }
}

fn stereo_cd() -> StreamAttributes {
    StreamAttributes {
        channels: 2,
        rate: 44100,
        format: SampleFormat::S16Le,
    }
}

fn instance<R: ShellRunner>(templates: HookTemplates, debug: i64, shell: R) -> HookInstance<R> {
    HookInstance::new("hooked", DebugLevel::clamped(debug), templates, shell)
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

#[test]
fn test_full_lifecycle_runs_each_template_once() {
    let mut hook = instance(all_templates(), 0, ScriptedShell::default());

    hook.hw_params(stereo_cd()).unwrap();
    hook.init().unwrap();
    hook.hw_free().unwrap();

    assert_eq!(
        hook.shell().commands,
        vec![
            "params 2 44100 S16_LE 16".to_string(),
            "prepare 44100".to_string(),
            "free 2".to_string(),
        ]
    );
    assert_eq!(hook.attributes(), Some(stereo_cd()));
    hook.close().unwrap();
}

#[test]
fn test_unconfigured_events_run_nothing() {
    let templates = HookTemplates {
        prepare: Some("only prepare".to_string()),
        ..HookTemplates::default()
    };
    let mut hook = instance(templates, 0, ScriptedShell::default());

    hook.hw_params(stereo_cd()).unwrap();
    hook.init().unwrap();
    hook.hw_free().unwrap();

    assert_eq!(hook.shell().commands, vec!["only prepare".to_string()]);
}

#[test]
fn test_renegotiation_uses_new_attributes() {
    let mut hook = instance(all_templates(), 0, ScriptedShell::default());

    hook.hw_params(stereo_cd()).unwrap();
    hook.hw_free().unwrap();
    hook.hw_params(StreamAttributes {
        channels: 8,
        rate: 192000,
        format: SampleFormat::S32Le,
    })
    .unwrap();

    assert_eq!(
        hook.shell().commands.last().map(String::as_str),
        Some("params 8 192000 S32_LE 32")
    );
}

#[test]
fn test_prepare_without_negotiation_still_runs() {
    let mut hook = instance(all_templates(), 0, ScriptedShell::default());
    let (result, logs) = capture_logs(|| hook.init());

    assert!(result.is_ok());
    assert_eq!(hook.shell().commands, vec!["prepare ".to_string()]);
    assert!(logs.contains("Unable to populate template prepare %r"), "got: {logs}");
}

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

#[test]
fn test_nonzero_exit_at_debug_zero_is_silent_success() {
    let shell = ScriptedShell::replying(vec![Ok(ShellExit::Code(1))]);
    let mut hook = instance(all_templates(), 0, shell);

    let (result, logs) = capture_logs(|| hook.hw_params(stereo_cd()));

    assert!(result.is_ok());
    assert!(logs.is_empty(), "unexpected logs: {logs}");
}

#[test]
fn test_spawn_failure_is_reported_but_not_propagated() {
    let shell = ScriptedShell::replying(vec![Err(io::Error::other("fork failed"))]);
    let mut hook = instance(all_templates(), 0, shell);

    let (result, logs) = capture_logs(|| hook.hw_params(stereo_cd()));

    assert!(result.is_ok());
    assert!(logs.contains("failed to run command params 2 44100 S16_LE 16"), "got: {logs}");
}

#[test]
fn test_failed_command_does_not_block_later_transitions() {
    let shell = ScriptedShell::replying(vec![
        Err(io::Error::other("fork failed")),
        Ok(ShellExit::Signal(9)),
    ]);
    let mut hook = instance(all_templates(), 1, shell);

    assert!(hook.hw_params(stereo_cd()).is_ok());
    assert!(hook.init().is_ok());
    assert!(hook.hw_free().is_ok());
    assert_eq!(hook.shell().commands.len(), 3);
}

#[test]
fn test_run_event_reports_outcomes() {
    let shell = ScriptedShell::replying(vec![Ok(ShellExit::Code(4))]);
    let mut hook = instance(all_templates(), 0, shell);
    hook.hw_params(stereo_cd()).unwrap();

    assert_eq!(hook.run_event(HookEvent::Prepare), CommandOutcome::Succeeded);

    let mut bare = instance(HookTemplates::default(), 0, ScriptedShell::default());
    assert_eq!(bare.run_event(HookEvent::Prepare), CommandOutcome::Skipped);
}

#[test]
fn test_overflowing_template_runs_nothing() {
    let templates = HookTemplates {
        hw_params: Some("x".repeat(crate::MAX_COMMAND_LEN)),
        ..HookTemplates::default()
    };
    let mut hook = instance(templates, 0, ScriptedShell::default());

    assert!(hook.hw_params(stereo_cd()).is_ok());
    assert!(hook.shell().commands.is_empty());
}

#[test]
fn test_render_does_not_execute() {
    let mut hook = instance(all_templates(), 0, ScriptedShell::default());
    hook.hw_params(stereo_cd()).unwrap();

    assert_eq!(hook.render(HookEvent::HwFree).as_deref(), Some("free 2"));
    assert_eq!(hook.render(HookEvent::HwFree), hook.render(HookEvent::HwFree));
    assert_eq!(hook.shell().commands.len(), 1);
}

// ---------------------------------------------------------------------------
// Close and teardown
// ---------------------------------------------------------------------------

#[test]
fn test_close_logged_only_when_verbose() {
    let quiet = instance(all_templates(), 0, DryRunShell::new());
    let (result, logs) = capture_logs(|| quiet.close());
    assert!(result.is_ok());
    assert!(logs.is_empty(), "unexpected logs: {logs}");

    let loud = instance(all_templates(), 1, DryRunShell::new());
    let (result, logs) = capture_logs(|| loud.close());
    assert!(result.is_ok());
    assert!(logs.contains("PCM close called for hooked"), "got: {logs}");
}

#[test]
fn test_teardown_is_idempotent() {
    let mut hook = instance(all_templates(), 0, DryRunShell::new());
    hook.hw_params(stereo_cd()).unwrap();

    hook.teardown();
    assert!(hook.templates().is_empty());
    assert!(hook.attributes().is_none());

    hook.teardown();
    assert!(hook.templates().is_empty());

    // Nothing left to run after teardown.
    hook.init().unwrap();
    assert_eq!(hook.shell().commands().len(), 1);
}

// ---------------------------------------------------------------------------
// Data transfer
// ---------------------------------------------------------------------------

#[test]
fn test_transfer_copies_unchanged_and_returns_frames() {
    let mut hook = instance(HookTemplates::default(), 0, DryRunShell::new());
    hook.hw_params(stereo_cd()).unwrap();

    let layout = ChannelArea::interleaved(2, SampleFormat::S16Le);
    let src_buf: Vec<u8> = (0..32).collect();
    let mut dst_buf = vec![0u8; 32];

    let frames = hook
        .transfer(
            &mut AreasMut {
                buf: &mut dst_buf,
                channels: &layout,
            },
            0,
            &Areas {
                buf: &src_buf,
                channels: &layout,
            },
            0,
            8,
        )
        .unwrap();

    assert_eq!(frames, 8);
    assert_eq!(dst_buf, src_buf);
}

#[test]
fn test_transfer_propagates_copy_errors() {
    let mut hook = instance(HookTemplates::default(), 0, DryRunShell::new());
    hook.hw_params(stereo_cd()).unwrap();

    let layout = ChannelArea::interleaved(2, SampleFormat::S16Le);
    let src_buf = vec![0u8; 4];
    let mut dst_buf = vec![0u8; 4];

    let err = hook
        .transfer(
            &mut AreasMut {
                buf: &mut dst_buf,
                channels: &layout,
            },
            0,
            &Areas {
                buf: &src_buf,
                channels: &layout,
            },
            0,
            2,
        )
        .unwrap_err();
    assert!(matches!(err, HookError::AreaCopy(_)));
}

#[test]
fn test_transfer_before_negotiation_is_error() {
    let mut hook = instance(HookTemplates::default(), 0, DryRunShell::new());
    let layout = ChannelArea::interleaved(1, SampleFormat::U8);
    let mut dst_buf = vec![0u8; 1];

    let err = hook
        .transfer(
            &mut AreasMut {
                buf: &mut dst_buf,
                channels: &layout,
            },
            0,
            &Areas {
                buf: &[1],
                channels: &layout,
            },
            0,
            1,
        )
        .unwrap_err();
    assert!(err.to_string().contains("no negotiated parameters"), "got: {err}");
}

// ---------------------------------------------------------------------------
// Real shell
// ---------------------------------------------------------------------------

#[test]
fn test_hw_params_command_runs_through_system_shell() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("params");
    let templates = HookTemplates {
        hw_params: Some(format!("echo %c %r %f > '{}'", out.display())),
        ..HookTemplates::default()
    };
    let mut hook = instance(templates, 0, SystemShell::new());

    hook.hw_params(stereo_cd()).unwrap();

    // The callback blocks until the command exits, so the file is complete.
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.trim(), "2 44100 S16_LE");
}
