//! Sliding sample window

use crate::{
    error::Error,
    sampling::{BLOCK_LEN, WINDOW_LEN},
};

/// The most recent [`WINDOW_LEN`] paired IR and RED samples, oldest first.
///
/// The window is either empty or completely filled. It is filled once by [`load`](Self::load)
/// and then moved forward one block at a time by [`advance`](Self::advance).
pub struct SampleWindow<C> {
    ir: C,
    red: C,
    loaded: bool,
}

impl Default for SampleWindow<[i32; WINDOW_LEN]> {
    fn default() -> Self {
        Self::new([0; WINDOW_LEN], [0; WINDOW_LEN])
    }
}

impl<C> SampleWindow<C>
where
    C: AsRef<[i32]> + AsMut<[i32]>,
{
    pub fn new(ir: C, red: C) -> Self {
        assert_eq!(
            ir.as_ref().len(),
            WINDOW_LEN,
            "IR buffer must hold {} samples",
            WINDOW_LEN
        );
        assert_eq!(
            red.as_ref().len(),
            WINDOW_LEN,
            "RED buffer must hold {} samples",
            WINDOW_LEN
        );

        Self {
            ir,
            red,
            loaded: false,
        }
    }

    pub fn clear(&mut self) {
        self.loaded = false;
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        if self.loaded {
            WINDOW_LEN
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.loaded
    }

    /// Returns the IR and RED channels, or `None` before the first load.
    pub fn channels(&self) -> Option<(&[i32], &[i32])> {
        self.loaded.then(|| (self.ir.as_ref(), self.red.as_ref()))
    }

    /// Replaces the window with the most recent [`WINDOW_LEN`] samples of each channel.
    pub fn load<I, R>(&mut self, ir: I, red: R) -> Result<(), Error>
    where
        I: IntoIterator<Item = i32>,
        I::IntoIter: ExactSizeIterator,
        R: IntoIterator<Item = i32>,
        R::IntoIter: ExactSizeIterator,
    {
        let ir = newest(ir, WINDOW_LEN)?;
        let red = newest(red, WINDOW_LEN)?;

        fill(self.ir.as_mut(), ir);
        fill(self.red.as_mut(), red);
        self.loaded = true;

        Ok(())
    }

    /// Drops the oldest [`BLOCK_LEN`] samples and appends the most recent [`BLOCK_LEN`]
    /// samples of each channel.
    pub fn advance<I, R>(&mut self, ir: I, red: R) -> Result<(), Error>
    where
        I: IntoIterator<Item = i32>,
        I::IntoIter: ExactSizeIterator,
        R: IntoIterator<Item = i32>,
        R::IntoIter: ExactSizeIterator,
    {
        if !self.loaded {
            return Err(Error::InsufficientData {
                required: WINDOW_LEN,
                available: 0,
            });
        }

        let ir = newest(ir, BLOCK_LEN)?;
        let red = newest(red, BLOCK_LEN)?;

        shift_in(self.ir.as_mut(), ir);
        shift_in(self.red.as_mut(), red);

        Ok(())
    }
}

/// Skips to the last `n` items, or fails if there are fewer.
fn newest<I>(samples: I, n: usize) -> Result<impl Iterator<Item = i32>, Error>
where
    I: IntoIterator<Item = i32>,
    I::IntoIter: ExactSizeIterator,
{
    let samples = samples.into_iter();
    let available = samples.len();
    if available < n {
        log::warn!("{} samples supplied, {} required", available, n);
        return Err(Error::InsufficientData {
            required: n,
            available,
        });
    }

    Ok(samples.skip(available - n))
}

fn fill(buffer: &mut [i32], samples: impl Iterator<Item = i32>) {
    for (slot, sample) in buffer.iter_mut().zip(samples) {
        *slot = sample;
    }
}

fn shift_in(buffer: &mut [i32], samples: impl Iterator<Item = i32>) {
    buffer.copy_within(BLOCK_LEN.., 0);
    fill(&mut buffer[WINDOW_LEN - BLOCK_LEN..], samples);
}
