//! This crate provides a realtime heart rate and SpO2 estimator for pulse oximeters.
//!
//! The estimator works on two photoplethysmography channels, infrared and red, sampled at
//! 100 samples per second. Every estimation looks at the most recent 5 seconds of samples:
//!
//! 1. the IR channel is demeaned and smoothed
//! 2. its derivative is filtered with a Hamming window and searched for pulses
//! 3. the distance of the pulses gives the heart rate
//! 4. the valleys between pulses bound the cycles where the AC/DC ratio of red and infrared
//!    light is measured, and the median ratio is mapped to SpO2 with a calibration table
//!
//! A window that contains no usable pulses yields no estimate. [`Estimator::update`] and
//! [`Estimator::process`] fill such gaps with the last reported values.
#![cfg_attr(not(test), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod algorithms;
mod cache;
pub mod decode;
mod error;
pub mod record;
pub mod sampling;
mod sliding;

pub use algorithms::calibration::{calibration_curve, spo2_from_ratio, SPO2_TABLE};
pub use cache::ResultCache;
pub use error::Error;

use record::Sample;
use sampling::WINDOW_LEN;
use sliding::SampleWindow;

/// Result of a single estimation. `None` marks a metric the window did not support.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Estimate {
    /// Beats per minute.
    pub heart_rate: Option<i32>,
    /// Oxygen saturation in percent.
    pub spo2: Option<i32>,
}

/// A heart rate and SpO2 pair as presented to the user, gaps filled in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub heart_rate: i32,
    pub spo2: i32,
}

/// Estimates heart rate and SpO2 from a stream of IR and RED samples.
///
/// Each sensor stream needs its own estimator.
///
/// # Type parameters:
///
/// - `C` - a buffer type holding [`WINDOW_LEN`] samples of one channel
pub struct Estimator<C> {
    window: SampleWindow<C>,
    cache: ResultCache,
}

impl Estimator<()> {
    /// Creates a new estimator. The sample window is stored inline, as part of the
    /// `Estimator` structure.
    ///
    /// # Example
    /// ```rust
    /// use ppg_oximeter::Estimator;
    ///
    /// let estimator = Estimator::new();
    /// assert!(!estimator.is_loaded());
    /// ```
    pub fn new() -> Estimator<[i32; WINDOW_LEN]> {
        Estimator {
            window: SampleWindow::default(),
            cache: ResultCache::new(),
        }
    }

    /// Creates a new estimator using the provided buffers as the sample window.
    ///
    /// # Arguments
    /// * `ir_buffer` - A buffer holding [`WINDOW_LEN`] IR samples.
    /// * `red_buffer` - A buffer holding [`WINDOW_LEN`] RED samples.
    ///
    /// # Panics
    /// If either buffer is not exactly [`WINDOW_LEN`] long.
    ///
    /// # Examples
    ///
    /// The backing buffers may be slices:
    ///
    /// ```rust
    /// use ppg_oximeter::{sampling::WINDOW_LEN, Estimator};
    ///
    /// let mut ir_buffer = [0; WINDOW_LEN];
    /// let mut red_buffer = [0; WINDOW_LEN];
    /// let estimator = Estimator::new_from(&mut ir_buffer[..], &mut red_buffer[..]);
    /// ```
    pub fn new_from<C>(ir_buffer: C, red_buffer: C) -> Estimator<C>
    where
        C: AsRef<[i32]> + AsMut<[i32]>,
    {
        Estimator {
            window: SampleWindow::new(ir_buffer, red_buffer),
            cache: ResultCache::new(),
        }
    }

    /// Creates a new estimator with the sample window allocated on the heap.
    #[cfg(feature = "alloc")]
    pub fn new_alloc() -> Estimator<alloc::boxed::Box<[i32]>> {
        use alloc::vec;
        Estimator {
            window: SampleWindow::new(
                vec![0; WINDOW_LEN].into_boxed_slice(),
                vec![0; WINDOW_LEN].into_boxed_slice(),
            ),
            cache: ResultCache::new(),
        }
    }
}

impl<C> Estimator<C>
where
    C: AsRef<[i32]> + AsMut<[i32]>,
{
    /// Forgets the sample window. The next update loads a fresh one.
    ///
    /// The last reading is kept and still serves as the fallback.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Returns `true` once the sample window holds a full [`WINDOW_LEN`] samples.
    pub fn is_loaded(&self) -> bool {
        !self.window.is_empty()
    }

    /// Fills the sample window with the most recent [`WINDOW_LEN`] samples of each channel.
    pub fn load(&mut self, ir: &[i32], red: &[i32]) -> Result<(), Error> {
        self.window.load(ir.iter().copied(), red.iter().copied())
    }

    /// Moves the sample window forward by the most recent
    /// [`BLOCK_LEN`](sampling::BLOCK_LEN) samples of each channel.
    pub fn advance(&mut self, ir: &[i32], red: &[i32]) -> Result<(), Error> {
        self.window.advance(ir.iter().copied(), red.iter().copied())
    }

    /// Estimates heart rate and SpO2 from the current window.
    ///
    /// The window is not modified, so repeated calls return the same estimate.
    pub fn estimate(&self) -> Result<Estimate, Error> {
        let (ir, red) = self.window.channels().ok_or(Error::InsufficientData {
            required: WINDOW_LEN,
            available: 0,
        })?;

        let estimate = algorithms::estimate(ir, red);
        log::debug!("estimate: {:?}", estimate);

        Ok(estimate)
    }

    /// The reading reported by the last successful update.
    pub fn last_reading(&self) -> Option<Reading> {
        self.cache.last()
    }

    /// Takes in the newest samples and returns the current reading.
    ///
    /// `ir` and `red` are the sample histories of the two channels, oldest first, and must
    /// both hold at least [`WINDOW_LEN`] samples. The first call loads the window and later
    /// calls advance it by one block, so this is meant to be called once per
    /// [`BLOCK_LEN`](sampling::BLOCK_LEN) new samples.
    ///
    /// Metrics that cannot be estimated are filled in from the previous reading. The first
    /// reading falls back to the newest raw sample of each channel.
    ///
    /// # Example
    /// ```rust
    /// use ppg_oximeter::{Error, Estimator};
    ///
    /// let mut estimator = Estimator::new();
    ///
    /// // not enough samples yet
    /// assert!(matches!(
    ///     estimator.update(&[0; 300], &[0; 300]),
    ///     Err(Error::InsufficientData { .. })
    /// ));
    ///
    /// // no pulse in a flat signal, the newest samples are reported
    /// let reading = estimator.update(&[51_000; 500], &[43_000; 500]).unwrap();
    /// assert_eq!((reading.heart_rate, reading.spo2), (51_000, 43_000));
    /// ```
    pub fn update(&mut self, ir: &[i32], red: &[i32]) -> Result<Reading, Error> {
        let bootstrap = match (ir.last(), red.last()) {
            (Some(&heart_rate), Some(&spo2)) => Reading { heart_rate, spo2 },
            _ => Reading::default(),
        };

        self.ingest(ir.iter().copied(), red.iter().copied())?;

        let estimate = self.estimate()?;
        Ok(self.cache.resolve(estimate, bootstrap))
    }

    /// Takes in the newest sample records and returns the current reading as records.
    ///
    /// Works like [`update`](Self::update). The heart rate is reported in a copy of the newest
    /// IR record and SpO2 in a copy of the newest RED record.
    pub fn process(&mut self, ir: &[Sample], red: &[Sample]) -> Result<(Sample, Sample), Error> {
        let (latest_ir, latest_red) = match (ir.last(), red.last()) {
            (Some(&ir), Some(&red)) => (ir, red),
            _ => {
                return Err(Error::InsufficientData {
                    required: WINDOW_LEN,
                    available: 0,
                })
            }
        };

        self.ingest(ir.iter().map(|s| s.value), red.iter().map(|s| s.value))?;

        let estimate = self.estimate()?;
        let reading = self.cache.resolve(
            estimate,
            Reading {
                heart_rate: latest_ir.value,
                spo2: latest_red.value,
            },
        );

        Ok((
            latest_ir.with_value(reading.heart_rate),
            latest_red.with_value(reading.spo2),
        ))
    }

    fn ingest<I, R>(&mut self, ir: I, red: R) -> Result<(), Error>
    where
        I: ExactSizeIterator<Item = i32>,
        R: ExactSizeIterator<Item = i32>,
    {
        let available = ir.len().min(red.len());
        if available < WINDOW_LEN {
            log::warn!("{} samples available, {} required", available, WINDOW_LEN);
            return Err(Error::InsufficientData {
                required: WINDOW_LEN,
                available,
            });
        }

        if self.window.is_empty() {
            self.window.load(ir, red)
        } else {
            self.window.advance(ir, red)
        }
    }
}
