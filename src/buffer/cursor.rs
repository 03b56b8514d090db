use super::AudioBuffer;

// -------------------------------------------------------------------------------------------------

/// A read and a write position for a single, sequential pass over an [`AudioBuffer`]'s samples.
///
/// Created via [`AudioBuffer::stream`], which places both positions at the start of the buffer.
/// The cursor mutably borrows the buffer, so the buffer can't be resized, trimmed or merged while
/// a pass is in progress. Start a new pass by creating a new cursor.
///
/// Advancing never checks bounds. Callers test [`Self::read_within_upper_bound`] or
/// [`Self::write_within_upper_bound`] before accessing samples at the cursor positions. Accessing
/// a position past the end panics.
///
/// ## Example
///
/// ```rust
/// use audiodata::{AudioBuffer, BufferSpecs};
///
/// # fn main() -> Result<(), audiodata::Error> {
/// let specs = BufferSpecs::mono(44100)?;
/// let mut buffer = AudioBuffer::from_interleaved(specs, vec![0.5, -1.0, 0.25])?;
///
/// // halve the gain of all samples in place
/// let mut cursor = buffer.stream();
/// while cursor.read_within_upper_bound() {
///     let value = cursor.sample_at_read();
///     cursor.set_sample_at_write(value * 0.5);
///     cursor.advance_read(1);
///     cursor.advance_write(1);
/// }
/// assert_eq!(buffer.samples(), &[0.25, -0.5, 0.125]);
/// # Ok(()) }
/// ```
pub struct StreamCursor<'a> {
    samples: &'a mut [f32],
    read_pos: usize,
    write_pos: usize,
}

impl<'a> StreamCursor<'a> {
    pub(crate) fn new(samples: &'a mut [f32]) -> Self {
        Self {
            samples,
            read_pos: 0,
            write_pos: 0,
        }
    }

    pub fn read_position(&self) -> usize {
        self.read_pos
    }
    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    #[inline]
    pub fn read_within_upper_bound(&self) -> bool {
        self.read_pos < self.samples.len()
    }
    #[inline]
    pub fn write_within_upper_bound(&self) -> bool {
        self.write_pos < self.samples.len()
    }

    #[inline]
    pub fn advance_read(&mut self, by: usize) {
        self.read_pos = self.read_pos.saturating_add(by);
    }
    #[inline]
    pub fn advance_write(&mut self, by: usize) {
        self.write_pos = self.write_pos.saturating_add(by);
    }

    /// Sample at the read position.
    #[inline]
    pub fn sample_at_read(&self) -> f32 {
        self.samples[self.read_pos]
    }

    /// Overwrite the sample at the write position. `value` must be finite.
    #[inline]
    pub fn set_sample_at_write(&mut self, value: f32) {
        debug_assert!(value.is_finite(), "Cannot set sample to non-finite value");
        self.samples[self.write_pos] = value;
    }
}

// -------------------------------------------------------------------------------------------------

impl AudioBuffer {
    /// Start a sequential streaming pass with both the read and the write cursor at the first
    /// sample.
    pub fn stream(&mut self) -> StreamCursor<'_> {
        StreamCursor::new(&mut self.samples)
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{AudioBuffer, BufferSpecs};

    #[test]
    fn bounds() {
        let mut empty = AudioBuffer::new();
        let cursor = empty.stream();
        assert!(!cursor.read_within_upper_bound());
        assert!(!cursor.write_within_upper_bound());

        let mut buffer = AudioBuffer::with_specs(BufferSpecs::mono(8000).unwrap());
        buffer.add_to_sample_count(3).unwrap();
        let mut cursor = buffer.stream();
        assert!(cursor.read_within_upper_bound());
        cursor.advance_read(2);
        assert!(cursor.read_within_upper_bound());
        cursor.advance_read(1);
        assert!(!cursor.read_within_upper_bound());
        assert!(cursor.write_within_upper_bound());
        cursor.advance_write(usize::MAX);
        assert!(!cursor.write_within_upper_bound());
        assert_eq!(cursor.read_position(), 3);
        assert_eq!(cursor.write_position(), usize::MAX);
    }

    #[test]
    fn independent_positions() {
        let specs = BufferSpecs::stereo(44100).unwrap();
        let mut buffer =
            AudioBuffer::from_interleaved(specs, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();

        // swap channels by reading ahead of the write position
        let mut cursor = buffer.stream();
        while cursor.read_within_upper_bound() {
            let left = cursor.sample_at_read();
            cursor.advance_read(1);
            let right = cursor.sample_at_read();
            cursor.advance_read(1);
            cursor.set_sample_at_write(right);
            cursor.advance_write(1);
            cursor.set_sample_at_write(left);
            cursor.advance_write(1);
        }
        assert!(!cursor.write_within_upper_bound());
        assert_eq!(buffer.samples(), &[2.0, 1.0, 4.0, 3.0, 6.0, 5.0]);

        // a new pass starts at the front again
        let cursor = buffer.stream();
        assert_eq!(cursor.read_position(), 0);
        assert_eq!(cursor.sample_at_read(), 2.0);
    }

    #[test]
    #[should_panic]
    fn read_past_end() {
        let mut buffer = AudioBuffer::new();
        buffer.add_to_sample_count(1).unwrap();
        let mut cursor = buffer.stream();
        cursor.advance_read(1);
        cursor.sample_at_read();
    }
}
