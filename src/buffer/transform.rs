use super::AudioBuffer;
use crate::error::{ConfigParameter, Error};

// -------------------------------------------------------------------------------------------------

/// Decimation policy for [`AudioBuffer::downsample`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DownsamplingMode {
    /// Keep every `factor`-th sample as it is. Cheap, but prone to aliasing.
    Shortcut,
    /// Replace each block of `factor` samples with the block's mean (boxcar averaging).
    #[default]
    Average,
}

impl From<bool> for DownsamplingMode {
    /// Maps a `shortcut` flag to its mode.
    fn from(shortcut: bool) -> Self {
        if shortcut {
            Self::Shortcut
        } else {
            Self::Average
        }
    }
}

// -------------------------------------------------------------------------------------------------

impl AudioBuffer {
    /// Mix down all channels of each frame into their mean and make the buffer monophonic.
    ///
    /// Does nothing when the buffer has less than two channels. Trailing samples which don't form
    /// a whole frame are dropped.
    pub fn reduce_to_mono(&mut self) {
        let channels = self.channels;
        if channels < 2 {
            return;
        }
        let frame_count = self.samples.len() / channels;

        // write position never overtakes the read position, so this can be done in place
        let mut cursor = self.stream();
        for _ in 0..frame_count {
            let mut sum = 0.0_f64;
            for _ in 0..channels {
                sum += cursor.sample_at_read() as f64;
                cursor.advance_read(1);
            }
            cursor.set_sample_at_write((sum / channels as f64) as f32);
            cursor.advance_write(1);
        }

        self.samples.truncate(frame_count);
        self.channels = 1;
    }

    /// Decimate a monophonic buffer by the given integer factor.
    ///
    /// Apply a low-pass filter at the new Nyquist frequency before downsampling: aliasing is not
    /// handled here. The frame rate is divided by `factor` with integer division.
    pub fn downsample(&mut self, factor: usize, mode: DownsamplingMode) -> Result<(), Error> {
        if factor == 1 {
            return Ok(());
        }
        if self.channels > 1 {
            return Err(Error::IncompatibleChannelLayout {
                channels: self.channels,
            });
        }
        if factor == 0 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::DownsampleFactor,
                value: factor,
            });
        }
        let frame_rate = u32::try_from(factor)
            .map(|factor| self.frame_rate / factor)
            .unwrap_or(0);
        if frame_rate < 1 {
            return Err(Error::InvalidConfiguration {
                parameter: ConfigParameter::FrameRate,
                value: frame_rate as usize,
            });
        }
        if self.frame_rate as usize % factor != 0 {
            log::warn!(
                "Downsampling {} Hz by {} truncates the frame rate to {} Hz",
                self.frame_rate,
                factor,
                frame_rate
            );
        }

        let sample_count = self.samples.len().div_ceil(factor);
        let mut cursor = self.stream();
        match mode {
            DownsamplingMode::Shortcut => {
                while cursor.read_within_upper_bound() {
                    let value = cursor.sample_at_read();
                    cursor.set_sample_at_write(value);
                    cursor.advance_read(factor);
                    cursor.advance_write(1);
                }
            }
            DownsamplingMode::Average => {
                while cursor.read_within_upper_bound() {
                    // the last block may be shorter than factor
                    let mut sum = 0.0_f64;
                    let mut block_len = 0;
                    while block_len < factor && cursor.read_within_upper_bound() {
                        sum += cursor.sample_at_read() as f64;
                        cursor.advance_read(1);
                        block_len += 1;
                    }
                    cursor.set_sample_at_write((sum / block_len as f64) as f32);
                    cursor.advance_write(1);
                }
            }
        }

        self.samples.truncate(sample_count);
        self.frame_rate = frame_rate;
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{AudioBuffer, BufferSpecs, DownsamplingMode, Error};

    fn buffer(channels: usize, frame_rate: u32, samples: Vec<f32>) -> AudioBuffer {
        AudioBuffer::from_interleaved(BufferSpecs::new(channels, frame_rate).unwrap(), samples)
            .unwrap()
    }

    #[test]
    fn mono_reduction() {
        let mut mono = buffer(1, 44100, vec![1.0, 2.0, 3.0]);
        mono.reduce_to_mono();
        assert_eq!(mono, buffer(1, 44100, vec![1.0, 2.0, 3.0]));

        let mut stereo = buffer(2, 44100, vec![1.0, 3.0, 2.0, 4.0, 5.0, 7.0, 6.0, 8.0]);
        stereo.reduce_to_mono();
        assert_eq!(stereo.channels(), 1);
        assert_eq!(stereo.frame_rate(), 44100);
        assert_eq!(stereo.samples(), &[2.0, 3.0, 6.0, 7.0]);

        let mut surround = buffer(3, 48000, vec![3.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        surround.reduce_to_mono();
        assert_eq!(surround.samples(), &[1.0, 2.0]);

        let mut empty = AudioBuffer::with_specs(BufferSpecs::stereo(44100).unwrap());
        empty.reduce_to_mono();
        assert!(empty.is_empty());
        assert_eq!(empty.channels(), 1);
    }

    #[test]
    fn mono_reduction_drops_partial_frames() {
        let mut stereo = buffer(2, 44100, vec![1.0, 3.0]);
        stereo.add_to_sample_count(1).unwrap();
        stereo.reduce_to_mono();
        assert_eq!(stereo.samples(), &[2.0]);
    }

    #[test]
    fn downsample_identity() {
        for mode in [DownsamplingMode::Shortcut, DownsamplingMode::Average] {
            let mut mono = buffer(1, 44100, vec![1.0, 2.0, 3.0]);
            mono.downsample(1, mode).unwrap();
            assert_eq!(mono, buffer(1, 44100, vec![1.0, 2.0, 3.0]));
        }
    }

    #[test]
    fn downsample_average() {
        let mut stereo = buffer(2, 44100, vec![1.0, 3.0, 2.0, 4.0, 5.0, 7.0, 6.0, 8.0]);
        stereo.reduce_to_mono();
        stereo.downsample(2, false.into()).unwrap();
        assert_eq!(stereo.samples(), &[2.5, 6.5]);
        assert_eq!(stereo.frame_rate(), 22050);

        // short tail blocks get divided by their own length
        let mut mono = buffer(1, 30, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 10.0]);
        mono.downsample(3, DownsamplingMode::Average).unwrap();
        assert_eq!(mono.samples(), &[2.0, 5.0, 8.5]);
        assert_eq!(mono.frame_rate(), 10);
    }

    #[test]
    fn downsample_shortcut() {
        let mut mono = buffer(1, 48000, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        mono.downsample(3, true.into()).unwrap();
        assert_eq!(mono.samples(), &[1.0, 4.0, 7.0]);
        assert_eq!(mono.frame_rate(), 16000);

        let mut empty = AudioBuffer::with_specs(BufferSpecs::mono(48000).unwrap());
        empty.downsample(4, DownsamplingMode::Shortcut).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.frame_rate(), 12000);
    }

    #[test]
    fn downsample_truncates_frame_rate() {
        let mut mono = buffer(1, 44100, vec![0.0; 8]);
        mono.downsample(4, DownsamplingMode::Average).unwrap();
        assert_eq!(mono.frame_rate(), 11025);
        mono.downsample(4, DownsamplingMode::Average).unwrap();
        assert_eq!(mono.frame_rate(), 2756);
        assert_eq!(mono.sample_count(), 1);
    }

    #[test]
    fn downsample_errors() {
        let mut stereo = buffer(2, 44100, vec![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(
            stereo.downsample(2, DownsamplingMode::Average),
            Err(Error::IncompatibleChannelLayout { channels: 2 })
        );

        let mut mono = buffer(1, 4, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            mono.downsample(0, DownsamplingMode::Shortcut),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            mono.downsample(5, DownsamplingMode::Shortcut),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert_eq!(mono, buffer(1, 4, vec![1.0, 2.0, 3.0, 4.0]));

        let mut unconfigured = AudioBuffer::new();
        unconfigured.add_to_sample_count(4).unwrap();
        assert!(matches!(
            unconfigured.downsample(2, DownsamplingMode::Average),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert_eq!(unconfigured.sample_count(), 4);
    }
}
