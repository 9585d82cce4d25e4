use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! sample_formats {
    ($($variant:ident => $name:literal, $width:literal;)+) => {
        /// Sample formats a host stream can negotiate.
        ///
        /// Names match the host's canonical spelling so that `%f` expands to the
        /// same text the host tools print.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum SampleFormat {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl SampleFormat {
            pub const ALL: &'static [SampleFormat] = &[$(SampleFormat::$variant),+];

            /// Canonical format name, e.g. `S16_LE`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(SampleFormat::$variant => $name,)+
                }
            }

            /// Bits one sample occupies in memory, including padding.
            pub fn physical_width(&self) -> u32 {
                match self {
                    $(SampleFormat::$variant => $width,)+
                }
            }
        }
    };
}

sample_formats! {
    S8 => "S8", 8;
    U8 => "U8", 8;
    S16Le => "S16_LE", 16;
    S16Be => "S16_BE", 16;
    U16Le => "U16_LE", 16;
    U16Be => "U16_BE", 16;
    S24Le => "S24_LE", 32;
    S24Be => "S24_BE", 32;
    U24Le => "U24_LE", 32;
    U24Be => "U24_BE", 32;
    S32Le => "S32_LE", 32;
    S32Be => "S32_BE", 32;
    U32Le => "U32_LE", 32;
    U32Be => "U32_BE", 32;
    FloatLe => "FLOAT_LE", 32;
    FloatBe => "FLOAT_BE", 32;
    Float64Le => "FLOAT64_LE", 64;
    Float64Be => "FLOAT64_BE", 64;
    Iec958SubframeLe => "IEC958_SUBFRAME_LE", 32;
    Iec958SubframeBe => "IEC958_SUBFRAME_BE", 32;
    MuLaw => "MU_LAW", 8;
    ALaw => "A_LAW", 8;
    ImaAdpcm => "IMA_ADPCM", 4;
    S20Le => "S20_LE", 32;
    S20Be => "S20_BE", 32;
    U20Le => "U20_LE", 32;
    U20Be => "U20_BE", 32;
    S24_3Le => "S24_3LE", 24;
    S24_3Be => "S24_3BE", 24;
    U24_3Le => "U24_3LE", 24;
    U24_3Be => "U24_3BE", 24;
    S20_3Le => "S20_3LE", 24;
    S20_3Be => "S20_3BE", 24;
    U20_3Le => "U20_3LE", 24;
    U20_3Be => "U20_3BE", 24;
    S18_3Le => "S18_3LE", 24;
    S18_3Be => "S18_3BE", 24;
    U18_3Le => "U18_3LE", 24;
    U18_3Be => "U18_3BE", 24;
    DsdU8 => "DSD_U8", 8;
    DsdU16Le => "DSD_U16_LE", 16;
    DsdU32Le => "DSD_U32_LE", 32;
    DsdU16Be => "DSD_U16_BE", 16;
    DsdU32Be => "DSD_U32_BE", 32;
}

impl SampleFormat {
    /// Bytes per sample, or `None` for sub-byte formats such as IMA ADPCM.
    pub fn physical_bytes(&self) -> Option<usize> {
        let width = self.physical_width();
        (width % 8 == 0).then_some((width / 8) as usize)
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sample format '{0}'")]
pub struct ParseFormatError(pub String);

impl FromStr for SampleFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleFormat::ALL
            .iter()
            .copied()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}

/// Stream attributes negotiated by the host during hw_params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamAttributes {
    pub channels: u32,
    pub rate: u32,
    pub format: SampleFormat,
}

/// Diagnostic verbosity, clamped to [0, 127].
///
/// Never affects behaviour, only how much is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DebugLevel(u8);

impl DebugLevel {
    pub const MAX: DebugLevel = DebugLevel(127);

    pub fn clamped(value: i64) -> Self {
        DebugLevel(value.clamp(0, 127) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Level 1 and up: command failures and close notices.
    pub fn is_verbose(self) -> bool {
        self.0 > 0
    }

    /// Level 2 and up: every rendered command.
    pub fn is_trace(self) -> bool {
        self.0 > 1
    }
}
