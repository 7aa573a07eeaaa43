//! Sample records exchanged with the sensor side.

/// Optical channel a sample was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Ir,
    Red,
}

/// A sample value with the metadata it arrived with.
///
/// Estimates are reported by replacing the value of the newest input sample, so the channel
/// and order of the record are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub value: i32,
    pub channel: Channel,
    /// Position in the sensor stream, increasing monotonically.
    pub order: u32,
}

impl Sample {
    pub const fn new(value: i32, channel: Channel, order: u32) -> Self {
        Self {
            value,
            channel,
            order,
        }
    }

    /// Returns a copy of this sample carrying `value`.
    ///
    /// ```rust
    /// use ppg_oximeter::record::{Channel, Sample};
    ///
    /// let sample = Sample::new(51_200, Channel::Ir, 812);
    /// let hr = sample.with_value(64);
    ///
    /// assert_eq!(hr, Sample::new(64, Channel::Ir, 812));
    /// ```
    pub fn with_value(self, value: i32) -> Self {
        Self { value, ..self }
    }
}
