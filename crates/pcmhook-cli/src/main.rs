use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pcmhook_config::{PluginConfig, default_config_path, load_pcm_definition};
use pcmhook_core::{DebugLevel, HookEvent};
use pcmhook_hooks::{RenderContext, render};
use pcmhook_process::{DryRunShell, ShellRunner, SystemShell};

mod cli;
mod simulate;

use cli::{Cli, Commands, OutputFormat};

fn main() -> Result<ExitCode> {
    // Diagnostics go to stderr; RUST_LOG overrides the default level.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            template,
            stream,
            debug,
        } => {
            let ctx = RenderContext {
                pcm_name: "pcmhook",
                attributes: Some(stream.attributes()),
                debug: DebugLevel::clamped(debug),
            };
            match render(Some(&template), &ctx) {
                Some(command) => {
                    println!("{command}");
                    Ok(ExitCode::SUCCESS)
                }
                None => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Check {
            config,
            pcm,
            format,
        } => {
            let path = resolve_config_path(config)?;
            let node = load_pcm_definition(&path, &pcm)?;
            let plugin = PluginConfig::from_node(&pcm, &node)
                .with_context(|| format!("invalid definition for {pcm} in {}", path.display()))?;
            print_plugin_config(&plugin, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Simulate {
            config,
            pcm,
            stream,
            frames,
            dry_run,
        } => {
            let path = resolve_config_path(config)?;
            let node = load_pcm_definition(&path, &pcm)?;
            let shell: Box<dyn ShellRunner> = if dry_run {
                Box::new(DryRunShell::new())
            } else {
                Box::new(SystemShell::new())
            };
            let report =
                simulate::run_simulation(&pcm, &node, stream.attributes(), frames, shell)?;

            println!("{pcm} -> {}", report.slave);
            for executed in &report.executed {
                match &executed.exit {
                    Ok(exit) => println!("  [{exit}] {}", executed.command),
                    Err(e) => println!("  [failed: {e}] {}", executed.command),
                }
            }
            println!("  transferred {} frames", report.frames_transferred);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(default_config_path)
        .context("no --config given and no user config directory available")
}

fn print_plugin_config(plugin: &PluginConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plugin)?);
        }
        OutputFormat::Text => {
            println!("pcm: {}", plugin.pcm_name);
            match plugin.slave.as_str() {
                Some(target) => println!("slave: {target}"),
                None => println!("slave: {}", serde_json::to_string(&plugin.slave.value)?),
            }
            println!("debug: {}", plugin.debug.get());
            for event in HookEvent::ALL {
                let template = plugin.templates.get(event).unwrap_or("(not configured)");
                println!("{}: {template}", event.as_config_key());
            }
        }
    }
    Ok(())
}
