use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pcmhook_core::{SampleFormat, StreamAttributes};

#[derive(Parser)]
#[command(name = "pcmhook", version)]
#[command(about = "Render and exercise stream lifecycle hook commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Stream attributes as negotiated by a host.
#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// Channel count (%c)
    #[arg(long, default_value_t = 2)]
    pub channels: u32,

    /// Sample rate in Hz (%r)
    #[arg(long, default_value_t = 44100)]
    pub rate: u32,

    /// Sample format name, e.g. S16_LE (%f, %d)
    #[arg(long = "sample-format", default_value = "S16_LE")]
    pub sample_format: SampleFormat,
}

impl StreamArgs {
    pub fn attributes(&self) -> StreamAttributes {
        StreamAttributes {
            channels: self.channels,
            rate: self.rate,
            format: self.sample_format,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a command template without running it
    Render {
        /// Template, e.g. "echo %c channels at %r Hz"
        template: String,

        #[command(flatten)]
        stream: StreamArgs,

        /// Debug level used while rendering (0-127)
        #[arg(long, default_value_t = 0)]
        debug: i64,
    },

    /// Validate a PCM definition
    Check {
        /// Definitions file (defaults to the user config dir)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// PCM name, i.e. the `<name>` of `[pcm.<name>]`
        #[arg(long)]
        pcm: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Open a PCM definition and drive it through a full stream lifecycle
    Simulate {
        /// Definitions file (defaults to the user config dir)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// PCM name, i.e. the `<name>` of `[pcm.<name>]`
        #[arg(long)]
        pcm: String,

        #[command(flatten)]
        stream: StreamArgs,

        /// Frames pushed through the transfer callback
        #[arg(long, default_value_t = 1024)]
        frames: usize,

        /// Print commands instead of running them
        #[arg(long)]
        dry_run: bool,
    },
}
