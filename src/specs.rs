use std::fmt;

use crate::error::{ConfigParameter, Error};

// -------------------------------------------------------------------------------------------------

/// Channel layout and frame rate of an audio buffer.
///
/// Specs are validated on construction: both the channel count and the frame rate are > 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferSpecs {
    channels: usize,
    frame_rate: u32,
}

impl BufferSpecs {
    pub fn new(channels: usize, frame_rate: u32) -> Result<Self, Error> {
        if channels < 1 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::Channels,
                value: channels,
            });
        }
        if frame_rate < 1 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::FrameRate,
                value: frame_rate as usize,
            });
        }
        Ok(Self {
            channels,
            frame_rate,
        })
    }

    /// Mono specs with the given frame rate.
    pub fn mono(frame_rate: u32) -> Result<Self, Error> {
        Self::new(1, frame_rate)
    }

    /// Stereo specs with the given frame rate.
    pub fn stereo(frame_rate: u32) -> Result<Self, Error> {
        Self::new(2, frame_rate)
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }
}

impl fmt::Display for BufferSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} channel(s) at {} Hz", self.channels, self.frame_rate)
    }
}

// -------------------------------------------------------------------------------------------------
