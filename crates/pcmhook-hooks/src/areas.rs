//! Pass-through copy between host channel areas.

use pcmhook_core::{HookError, SampleFormat};

/// Where one channel's samples live inside a shared buffer, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelArea {
    /// Offset of the first sample.
    pub first: usize,
    /// Distance between consecutive samples.
    pub step: usize,
}

impl ChannelArea {
    /// Areas for `channels` interleaved channels of `format`.
    pub fn interleaved(channels: u32, format: SampleFormat) -> Vec<ChannelArea> {
        let width = format.physical_width() as usize;
        let step = width * channels as usize;
        (0..channels as usize)
            .map(|channel| ChannelArea {
                first: channel * width,
                step,
            })
            .collect()
    }

    /// Byte offset of sample `index`; fails when it is not byte aligned.
    fn byte_offset(&self, index: usize) -> Result<usize, HookError> {
        let bit = index
            .checked_mul(self.step)
            .and_then(|bits| bits.checked_add(self.first))
            .ok_or_else(|| HookError::AreaCopy(format!("sample {index} is out of range")))?;
        if bit % 8 != 0 {
            return Err(HookError::AreaCopy(format!(
                "sample {index} starts at bit {bit}, not on a byte boundary"
            )));
        }
        Ok(bit / 8)
    }
}

/// Source side of a copy.
#[derive(Debug, Clone, Copy)]
pub struct Areas<'a> {
    pub buf: &'a [u8],
    pub channels: &'a [ChannelArea],
}

/// Destination side of a copy.
#[derive(Debug)]
pub struct AreasMut<'a> {
    pub buf: &'a mut [u8],
    pub channels: &'a [ChannelArea],
}

/// Copies `frames` samples of every channel from `src` to `dst`, unchanged.
pub fn copy_areas(
    dst: &mut AreasMut<'_>,
    dst_offset: usize,
    src: &Areas<'_>,
    src_offset: usize,
    channels: u32,
    frames: usize,
    format: SampleFormat,
) -> Result<(), HookError> {
    let bytes = format.physical_bytes().ok_or_else(|| {
        HookError::AreaCopy(format!("sub-byte format {format} cannot be copied"))
    })?;
    let width = format.physical_width() as usize;

    for channel in 0..channels as usize {
        let src_area = src.channels.get(channel).ok_or_else(|| missing_area("source", channel))?;
        let dst_area = dst
            .channels
            .get(channel)
            .ok_or_else(|| missing_area("destination", channel))?;

        // Non-interleaved channels can move as one block.
        if src_area.step == width && dst_area.step == width {
            let len = frames * bytes;
            let from = src_area.byte_offset(src_offset)?;
            let to = dst_area.byte_offset(dst_offset)?;
            let block = src.buf.get(from..from + len).ok_or_else(|| out_of_bounds("source"))?;
            dst.buf
                .get_mut(to..to + len)
                .ok_or_else(|| out_of_bounds("destination"))?
                .copy_from_slice(block);
            continue;
        }

        for frame in 0..frames {
            let from = src_area.byte_offset(src_offset + frame)?;
            let to = dst_area.byte_offset(dst_offset + frame)?;
            let sample = src.buf.get(from..from + bytes).ok_or_else(|| out_of_bounds("source"))?;
            dst.buf
                .get_mut(to..to + bytes)
                .ok_or_else(|| out_of_bounds("destination"))?
                .copy_from_slice(sample);
        }
    }

    Ok(())
}

fn missing_area(side: &str, channel: usize) -> HookError {
    HookError::AreaCopy(format!("{side} has no area for channel {channel}"))
}

fn out_of_bounds(side: &str) -> HookError {
    HookError::AreaCopy(format!("{side} buffer too small"))
}
