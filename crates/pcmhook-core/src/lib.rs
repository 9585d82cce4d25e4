//! Shared types for the pcmhook workspace.

pub mod error;
pub mod event;
pub mod types;

pub use error::HookError;
pub use event::HookEvent;
pub use types::{DebugLevel, ParseFormatError, SampleFormat, StreamAttributes};
