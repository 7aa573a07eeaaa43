/// Width of the moving average applied to both channels.
pub const MA4_SIZE: usize = 4;

/// Writes `signal` minus its truncated mean into `out`.
///
/// The output is widened, as the distance of a sample from the mean can exceed `i32`.
pub fn remove_dc(signal: &[i32], out: &mut [i64]) {
    if signal.is_empty() {
        return;
    }

    let sum: i64 = signal.iter().copied().map(i64::from).sum();
    let mean = sum / signal.len() as i64;

    for (out, &sample) in out.iter_mut().zip(signal) {
        *out = i64::from(sample) - mean;
    }
}

/// 4-point moving average, in place.
///
/// Sample `k` becomes the truncated mean of samples `k..k + 4`. The last [`MA4_SIZE`] samples
/// have no complete span and are left as they are.
pub fn moving_average_4(signal: &mut [i64]) {
    for k in 0..signal.len().saturating_sub(MA4_SIZE) {
        let sum: i64 = signal[k..k + MA4_SIZE].iter().sum();
        signal[k] = sum / MA4_SIZE as i64;
    }
}
