//! Stream lifecycle hooks.
//!
//! A hook instance sits between the host and a downstream ("slave") stream.
//! At three lifecycle transitions it renders a configured command template
//! with the negotiated stream attributes and runs the result through the
//! shell:
//! - `hw_params`: after channels, rate and format are negotiated
//! - `prepare`: before the stream starts moving data
//! - `hw_free`: when hardware parameters are released
//!
//! Audio passes through untouched. Command failures are logged and never
//! abort the stream; only construction can fail.
//!
//! ## Template Placeholders
//!
//! - `%c`: channel count
//! - `%r`: sample rate in Hz
//! - `%f`: format name, e.g. `S16_LE`
//! - `%d`: physical sample width in bits
//!
//! Any other `%X` is reported and expands to nothing. Rendered commands must
//! stay below [`MAX_COMMAND_LEN`] bytes or nothing is run.

pub mod areas;
pub mod controller;
pub mod host;
pub mod plugin;
pub mod runner;
pub mod template;

#[cfg(test)]
mod test_log;

pub use areas::{Areas, AreasMut, ChannelArea, copy_areas};
pub use controller::HookInstance;
pub use host::{ExtPlugCallbacks, OpenRequest, PLUGIN, PcmHost, PluginDescriptor, StreamDirection};
pub use plugin::{HookedPcm, open, open_raw};
pub use runner::{CommandOutcome, execute};
pub use template::{CommandBuffer, MAX_COMMAND_LEN, Placeholder, RenderContext, render};
