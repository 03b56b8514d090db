//! Interleaved PCM sample buffer shared by all stages of an analysis pipeline.

use std::time::Duration;

use crate::{
    error::{BoundsKind, ConfigParameter, Error},
    specs::BufferSpecs,
};

pub(crate) mod cursor;
pub(crate) mod transform;

// -------------------------------------------------------------------------------------------------

/// A growable buffer of interleaved, frame-major `f32` samples.
///
/// The sample of frame `f` and channel `c` lives at index `f * channels + c`. A channel count and
/// frame rate of 0 mark the buffer as unconfigured: such a buffer adopts the configuration of the
/// first buffer that gets merged into it.
///
/// All validated operations either succeed or leave the buffer untouched. Stored samples are
/// always finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    channels: usize,
    frame_rate: u32,
    samples: Vec<f32>,
}

impl AudioBuffer {
    /// Largest sample count a `Vec<f32>` can address.
    const MAX_SAMPLE_COUNT: usize = isize::MAX as usize / std::mem::size_of::<f32>();

    /// Create a new, empty and unconfigured buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty buffer with the given channel layout and frame rate.
    pub fn with_specs(specs: BufferSpecs) -> Self {
        Self {
            channels: specs.channels(),
            frame_rate: specs.frame_rate(),
            samples: Vec::new(),
        }
    }

    /// Create a buffer from the given interleaved samples.
    ///
    /// Fails when the samples don't form whole frames or contain non-finite values.
    pub fn from_interleaved(specs: BufferSpecs, samples: Vec<f32>) -> Result<Self, Error> {
        if samples.len() % specs.channels() != 0 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::SampleCount,
                value: samples.len(),
            });
        }
        Self::check_finite(&samples, 0)?;
        Ok(Self {
            channels: specs.channels(),
            frame_rate: specs.frame_rate(),
            samples,
        })
    }

    /// Create a buffer from planar (one vector per channel) samples.
    ///
    /// The number of planes must match the given channel count and all planes must have the
    /// same length.
    pub fn from_planar(specs: BufferSpecs, planar: &[Vec<f32>]) -> Result<Self, Error> {
        if planar.len() != specs.channels() {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::Channels,
                value: planar.len(),
            });
        }
        let frame_count = planar[0].len();
        if let Some(plane) = planar.iter().find(|p| p.len() != frame_count) {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::SampleCount,
                value: plane.len(),
            });
        }
        for (channel, plane) in planar.iter().enumerate() {
            if let Some(frame) = plane.iter().position(|v| !v.is_finite()) {
                return Err(Error::NonFiniteValue {
                    index: frame * specs.channels() + channel,
                    value: plane[frame],
                });
            }
        }
        let mut samples = vec![0.0; frame_count * specs.channels()];
        for (channel, plane) in planar.iter().enumerate() {
            for (frame, value) in samples.chunks_exact_mut(specs.channels()).zip(plane) {
                frame[channel] = *value;
            }
        }
        Ok(Self {
            channels: specs.channels(),
            frame_rate: specs.frame_rate(),
            samples,
        })
    }

    /// Copy the buffer's content into planar (one vector per channel) form.
    pub fn to_planar(&self) -> Result<Vec<Vec<f32>>, Error> {
        self.require_channels()?;
        let frames = self.samples.chunks_exact(self.channels);
        Ok((0..self.channels)
            .map(|channel| frames.clone().map(|frame| frame[channel]).collect())
            .collect())
    }

    // Configuration

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Set a new channel count. Does not resize the sample storage.
    pub fn set_channels(&mut self, channels: usize) -> Result<(), Error> {
        if channels < 1 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::Channels,
                value: channels,
            });
        }
        self.channels = channels;
        Ok(())
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) -> Result<(), Error> {
        if frame_rate < 1 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::FrameRate,
                value: frame_rate as usize,
            });
        }
        self.frame_rate = frame_rate;
        Ok(())
    }

    /// The buffer's channel layout and frame rate, if both are configured.
    pub fn specs(&self) -> Option<BufferSpecs> {
        BufferSpecs::new(self.channels, self.frame_rate).ok()
    }

    /// True when neither a channel count nor a frame rate has been set yet.
    pub fn is_unconfigured(&self) -> bool {
        self.channels == 0 && self.frame_rate == 0
    }

    // Merging

    /// Append a deep copy of `other`'s samples to the end of this buffer.
    pub fn append(&mut self, other: &AudioBuffer) -> Result<(), Error> {
        self.adopt_or_check_compatible(other)?;
        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }

    /// Insert a deep copy of `other`'s samples in front of this buffer's samples.
    pub fn prepend(&mut self, other: &AudioBuffer) -> Result<(), Error> {
        self.adopt_or_check_compatible(other)?;
        self.samples.splice(0..0, other.samples.iter().copied());
        Ok(())
    }

    fn adopt_or_check_compatible(&mut self, other: &AudioBuffer) -> Result<(), Error> {
        if self.is_unconfigured() {
            log::debug!(
                "Adopting {} channel(s) at {} Hz from merged audio data",
                other.channels,
                other.frame_rate
            );
            self.channels = other.channels;
            self.frame_rate = other.frame_rate;
        } else if other.channels != self.channels || other.frame_rate != self.frame_rate {
            return Err(Error::IncompatibleMerge {
                channels: self.channels,
                frame_rate: self.frame_rate,
                other_channels: other.channels,
                other_frame_rate: other.frame_rate,
            });
        }
        Ok(())
    }

    // Indexed access

    /// Read-only view of all interleaved samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get a sample by its absolute index.
    pub fn sample(&self, index: usize) -> Result<f32, Error> {
        self.samples
            .get(index)
            .copied()
            .ok_or(Error::OutOfBounds {
                kind: BoundsKind::Sample,
                requested: index,
                bound: self.samples.len(),
            })
    }

    /// Set a sample by its absolute index. Non-finite values are rejected.
    pub fn set_sample(&mut self, index: usize, value: f32) -> Result<(), Error> {
        let bound = self.samples.len();
        let sample = self.samples.get_mut(index).ok_or(Error::OutOfBounds {
            kind: BoundsKind::Sample,
            requested: index,
            bound,
        })?;
        if !value.is_finite() {
            return Err(Error::NonFiniteValue { index, value });
        }
        *sample = value;
        Ok(())
    }

    /// Get a sample by frame and channel index.
    pub fn sample_by_frame(&self, frame: usize, channel: usize) -> Result<f32, Error> {
        let index = self.frame_channel_index(frame, channel)?;
        self.sample(index)
    }

    /// Set a sample by frame and channel index. Non-finite values are rejected.
    pub fn set_sample_by_frame(
        &mut self,
        frame: usize,
        channel: usize,
        value: f32,
    ) -> Result<(), Error> {
        let index = self.frame_channel_index(frame, channel)?;
        self.set_sample(index, value)
    }

    /// All interleaved channel values of the given frame.
    pub fn frame(&self, frame: usize) -> Result<&[f32], Error> {
        let start = self.frame_channel_index(frame, 0)?;
        Ok(&self.samples[start..start + self.channels])
    }

    fn frame_channel_index(&self, frame: usize, channel: usize) -> Result<usize, Error> {
        let frame_count = self.frame_count()?;
        if frame >= frame_count {
            return Err(Error::OutOfBounds {
                kind: BoundsKind::Frame,
                requested: frame,
                bound: frame_count,
            });
        }
        if channel >= self.channels {
            return Err(Error::OutOfBounds {
                kind: BoundsKind::Channel,
                requested: channel,
                bound: self.channels,
            });
        }
        Ok(frame * self.channels + channel)
    }

    // Growth

    /// Append `count` silent samples.
    pub fn add_to_sample_count(&mut self, count: usize) -> Result<(), Error> {
        let bound = Self::MAX_SAMPLE_COUNT - self.samples.len();
        if count > bound {
            return Err(Error::OutOfBounds {
                kind: BoundsKind::AddedSamples,
                requested: count,
                bound,
            });
        }
        self.samples.resize(self.samples.len() + count, 0.0);
        Ok(())
    }

    /// Append `count` silent frames. Needs a configured channel count.
    pub fn add_to_frame_count(&mut self, count: usize) -> Result<(), Error> {
        self.require_channels()?;
        let bound = (Self::MAX_SAMPLE_COUNT - self.samples.len()) / self.channels;
        if count > bound {
            return Err(Error::OutOfBounds {
                kind: BoundsKind::AddedFrames,
                requested: count,
                bound,
            });
        }
        self.add_to_sample_count(count * self.channels)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of whole frames. Needs a configured channel count.
    pub fn frame_count(&self) -> Result<usize, Error> {
        self.require_channels()?;
        Ok(self.samples.len() / self.channels)
    }

    /// Playback duration of the buffer's frames at the configured frame rate.
    pub fn duration(&self) -> Result<Duration, Error> {
        let frame_count = self.frame_count()?;
        if self.frame_rate < 1 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::FrameRate,
                value: 0,
            });
        }
        Ok(Duration::from_secs_f64(
            frame_count as f64 / self.frame_rate as f64,
        ))
    }

    fn require_channels(&self) -> Result<(), Error> {
        if self.channels < 1 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::Channels,
                value: self.channels,
            });
        }
        Ok(())
    }

    fn check_finite(samples: &[f32], offset: usize) -> Result<(), Error> {
        match samples.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(Error::NonFiniteValue {
                index: offset + index,
                value: samples[index],
            }),
            None => Ok(()),
        }
    }

    // Trimming & slicing

    /// Remove the first `frame_count` frames, shifting all remaining samples to the front.
    pub fn discard_frames_from_front(&mut self, frame_count: usize) -> Result<(), Error> {
        let bound = self.frame_count()?;
        if frame_count > bound {
            return Err(Error::OutOfBounds {
                kind: BoundsKind::DiscardFrames,
                requested: frame_count,
                bound,
            });
        }
        self.samples.drain(..frame_count * self.channels);
        Ok(())
    }

    /// Move the last `sample_count` samples into a new buffer with the same configuration.
    ///
    /// Ownership of the returned buffer passes to the caller; this buffer shrinks accordingly.
    pub fn slice_samples_from_back(&mut self, sample_count: usize) -> Result<AudioBuffer, Error> {
        let bound = self.samples.len();
        if sample_count > bound {
            return Err(Error::OutOfBounds {
                kind: BoundsKind::SliceSamples,
                requested: sample_count,
                bound,
            });
        }
        Ok(AudioBuffer {
            channels: self.channels,
            frame_rate: self.frame_rate,
            samples: self.samples.split_off(bound - sample_count),
        })
    }
}

// -------------------------------------------------------------------------------------------------
