use std::{error, fmt};

// -------------------------------------------------------------------------------------------------

/// Configuration values which can be rejected with [`Error::InvalidConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ConfigParameter {
    #[strum(to_string = "channel count")]
    Channels,
    #[strum(to_string = "frame rate")]
    FrameRate,
    #[strum(to_string = "sample count")]
    SampleCount,
    #[strum(to_string = "downsampling factor")]
    DownsampleFactor,
}

// -------------------------------------------------------------------------------------------------

/// The kind of index or count which exceeded its bound in [`Error::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum BoundsKind {
    #[strum(to_string = "sample")]
    Sample,
    #[strum(to_string = "frame")]
    Frame,
    #[strum(to_string = "channel")]
    Channel,
    #[strum(to_string = "discarded frame count")]
    DiscardFrames,
    #[strum(to_string = "sliced sample count")]
    SliceSamples,
    #[strum(to_string = "added sample count")]
    AddedSamples,
    #[strum(to_string = "added frame count")]
    AddedFrames,
}

// -------------------------------------------------------------------------------------------------

/// Provides an enumeration of all possible errors reported by audiodata.
///
/// Errors carry the raw operands only. Messages get formatted in the `Display` impl.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidConfiguration {
        parameter: ConfigParameter,
        value: usize,
    },
    IncompatibleMerge {
        channels: usize,
        frame_rate: u32,
        other_channels: usize,
        other_frame_rate: u32,
    },
    IncompatibleChannelLayout {
        channels: usize,
    },
    OutOfBounds {
        kind: BoundsKind,
        requested: usize,
        bound: usize,
    },
    NonFiniteValue {
        index: usize,
        value: f32,
    },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { parameter, value } => {
                write!(f, "Invalid {parameter}: {value}")
            }
            Self::IncompatibleMerge {
                channels,
                frame_rate,
                other_channels,
                other_frame_rate,
            } => {
                write!(
                    f,
                    "Cannot merge audio data with {other_channels} channels at {other_frame_rate} Hz \
                    into audio data with {channels} channels at {frame_rate} Hz"
                )
            }
            Self::IncompatibleChannelLayout { channels } => {
                write!(f, "Expected monophonic audio data, got {channels} channels")
            }
            Self::OutOfBounds {
                kind,
                requested,
                bound,
            } => write!(f, "Out-of-bounds {kind} ({requested}/{bound})"),
            Self::NonFiniteValue { index, value } => {
                write!(f, "Cannot set sample {index} to non-finite value {value}")
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = Error::OutOfBounds {
            kind: BoundsKind::Frame,
            requested: 4,
            bound: 4,
        };
        assert_eq!(err.to_string(), "Out-of-bounds frame (4/4)");

        let err = Error::InvalidConfiguration {
            parameter: ConfigParameter::Channels,
            value: 0,
        };
        assert_eq!(err.to_string(), "Invalid channel count: 0");

        let err = Error::IncompatibleMerge {
            channels: 2,
            frame_rate: 44100,
            other_channels: 1,
            other_frame_rate: 44100,
        };
        assert!(err.to_string().contains("1 channels at 44100 Hz"));
    }
}
