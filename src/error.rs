/// Errors reported to the caller.
///
/// Noisy or flat signals are not errors: they produce an unavailable metric that the result
/// cache resolves. Only malformed inputs end up here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Fewer samples were supplied than the operation needs.
    #[error("insufficient data: {required} samples required, {available} available")]
    InsufficientData { required: usize, available: usize },

    /// A binary string contained something other than `0` or `1`.
    #[error("invalid binary digit {0:?}")]
    InvalidBinary(char),

    /// A binary string was empty or wider than the decoder supports.
    #[error("unsupported bit width: {0}")]
    BitWidth(usize),
}
