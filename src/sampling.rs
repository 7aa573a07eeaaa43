//! Helpers for working with sampling frequencies and sample numbers.
//!
//! The estimator runs at a fixed rate. Every window and block length used by the pipeline is
//! derived from [`FS`] here, so the numbers stay consistent with each other.

/// Sampling frequency in whole samples per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplingFrequency(u32);

/// Extension functions for integer types used to create [`SamplingFrequency`] values.
///
/// # Usage
/// ```rust
/// use ppg_oximeter::sampling::*;
///
/// // Both values represent 1000 samples per second
/// let fs = 1000.sps();
/// let fs2 = 1.ksps();
///
/// assert_eq!(fs, fs2);
/// ```
pub trait SamplingFrequencyExt {
    fn sps(self) -> SamplingFrequency;
    fn ksps(self) -> SamplingFrequency;
}

impl SamplingFrequencyExt for u32 {
    fn sps(self) -> SamplingFrequency {
        SamplingFrequency(self)
    }

    fn ksps(self) -> SamplingFrequency {
        (self * 1000).sps()
    }
}

impl SamplingFrequency {
    /// Returns the sampling frequency in units of samples per second.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Convert `s` seconds to number of samples
    /// ```rust
    /// # use ppg_oximeter::sampling::*;
    /// #
    /// assert_eq!(100.sps().s_to_samples(5), 500);
    /// ```
    pub const fn s_to_samples(self, s: u32) -> usize {
        (s * self.0) as usize
    }

    /// Number of samples in one minute.
    pub const fn samples_per_minute(self) -> i32 {
        (60 * self.0) as i32
    }

    /// Convert an average beat-to-beat distance in samples to beats per minute.
    ///
    /// Returns `None` for a non-positive interval.
    /// ```rust
    /// # use ppg_oximeter::sampling::*;
    /// #
    /// assert_eq!(100.sps().interval_to_bpm(100), Some(60));
    /// assert_eq!(100.sps().interval_to_bpm(0), None);
    /// ```
    pub fn interval_to_bpm(self, samples: i32) -> Option<i32> {
        if samples > 0 {
            Some(self.samples_per_minute() / samples)
        } else {
            None
        }
    }
}

/// Rate the optical front end is configured for.
pub const FS: SamplingFrequency = SamplingFrequency(100);

/// Samples held by the analysis window (5 s).
pub const WINDOW_LEN: usize = FS.s_to_samples(5);

/// Samples appended by each incremental update (1 s).
pub const BLOCK_LEN: usize = FS.s_to_samples(1);
