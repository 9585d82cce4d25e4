//! Command template rendering with `%X` placeholder substitution.

use std::fmt::Display;

use pcmhook_core::{DebugLevel, StreamAttributes};

/// Rendered commands must be strictly shorter than this many bytes.
pub const MAX_COMMAND_LEN: usize = 999;

/// Values a template can pull from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `%c`
    Channels,
    /// `%r`
    Rate,
    /// `%f`
    FormatName,
    /// `%d`
    PhysicalWidth,
}

impl Placeholder {
    pub fn from_selector(selector: char) -> Option<Self> {
        match selector {
            'c' => Some(Placeholder::Channels),
            'r' => Some(Placeholder::Rate),
            'f' => Some(Placeholder::FormatName),
            'd' => Some(Placeholder::PhysicalWidth),
            _ => None,
        }
    }

    pub fn selector(&self) -> char {
        match self {
            Placeholder::Channels => 'c',
            Placeholder::Rate => 'r',
            Placeholder::FormatName => 'f',
            Placeholder::PhysicalWidth => 'd',
        }
    }

    fn expand(self, attributes: &StreamAttributes, buf: &mut CommandBuffer) -> Result<(), Overflow> {
        match self {
            Placeholder::Channels => buf.push_display(attributes.channels),
            Placeholder::Rate => buf.push_display(attributes.rate),
            Placeholder::FormatName => buf.push_str(attributes.format.name()),
            Placeholder::PhysicalWidth => buf.push_display(attributes.format.physical_width()),
        }
    }
}

/// The rendered text would reach [`MAX_COMMAND_LEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// Growable text buffer bounded by [`MAX_COMMAND_LEN`].
///
/// A push that would make the buffer reach the bound is refused as a whole,
/// leaving the buffer unchanged.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    buf: String,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ch: char) -> Result<(), Overflow> {
        self.push_str(ch.encode_utf8(&mut [0; 4]))
    }

    pub fn push_str(&mut self, s: &str) -> Result<(), Overflow> {
        if self.buf.len() + s.len() >= MAX_COMMAND_LEN {
            return Err(Overflow);
        }
        self.buf.push_str(s);
        Ok(())
    }

    pub fn push_display(&mut self, value: impl Display) -> Result<(), Overflow> {
        self.push_str(&value.to_string())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Per-render inputs: who is rendering, with which attributes, how loudly.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub pcm_name: &'a str,
    /// `None` until the stream parameters have been negotiated.
    pub attributes: Option<StreamAttributes>,
    pub debug: DebugLevel,
}

/// Renders `template` into a command line.
///
/// Returns `None` when no template is configured or when the output would
/// reach [`MAX_COMMAND_LEN`]; an overflowing command is never truncated.
/// Unpopulatable placeholders are reported and expand to nothing.
pub fn render(template: Option<&str>, ctx: &RenderContext<'_>) -> Option<String> {
    let template = template?;

    match compile(template, ctx) {
        Ok(command) => {
            if ctx.debug.is_trace() {
                tracing::info!(
                    "PCM {} has created command {} from template {}",
                    ctx.pcm_name,
                    command,
                    template
                );
            }
            Some(command)
        }
        Err(Overflow) => {
            tracing::error!(
                "PCM {} has failed to create a command from template {}",
                ctx.pcm_name,
                template
            );
            None
        }
    }
}

fn compile(template: &str, ctx: &RenderContext<'_>) -> Result<String, Overflow> {
    let mut buf = CommandBuffer::new();
    let mut chars = template.char_indices();

    while let Some((_, ch)) = chars.next() {
        if ch != '%' {
            buf.push(ch)?;
            continue;
        }

        // A lone trailing '%' is reported at the end-of-template index.
        let (index, selector) = match chars.next() {
            Some((index, selector)) => (index, Some(selector)),
            None => (template.len(), None),
        };

        match (selector.and_then(Placeholder::from_selector), &ctx.attributes) {
            (Some(placeholder), Some(attributes)) => placeholder.expand(attributes, &mut buf)?,
            _ => report_unpopulated(ctx, template, index),
        }
    }

    Ok(buf.into_string())
}

fn report_unpopulated(ctx: &RenderContext<'_>, template: &str, index: usize) {
    tracing::error!(
        "PCM {} Unable to populate template {}. Error at index {}",
        ctx.pcm_name,
        template,
        index
    );
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
