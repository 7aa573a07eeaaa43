use crate::{algorithms::smooth::MA4_SIZE, sampling::WINDOW_LEN};

/// 512 * hamming(5), rounded.
pub const HAMMING: [i32; HAMMING_SIZE] = [41, 276, 512, 276, 41];
pub const HAMMING_SIZE: usize = 5;
const HAMMING_SUM: i64 = 1146;

/// Length of the difference buffer.
const DERIVATIVE_LEN: usize = WINDOW_LEN - MA4_SIZE;

/// Length of the peak-detection signal.
pub const DETECTION_LEN: usize = WINDOW_LEN - HAMMING_SIZE;

/// Builds the peak-detection signal from the demeaned, smoothed IR channel.
///
/// The first difference is smoothed with a 2-point average and filtered with the Hamming
/// kernel. The result is inverted, so the steep falling edges of the raw PPG (the onset of
/// each pulse) become positive peaks.
///
/// Each pass runs in place over a span that shrinks with its kernel, and the positions past
/// the last complete span keep the output of the previous pass.
pub fn detection_signal(smoothed: &[i64]) -> [i64; DETECTION_LEN] {
    debug_assert!(smoothed.len() >= WINDOW_LEN);

    let mut dx = [0; DERIVATIVE_LEN];

    for k in 0..DERIVATIVE_LEN - 1 {
        dx[k] = smoothed[k + 1] - smoothed[k];
    }

    for k in 0..DERIVATIVE_LEN - 2 {
        dx[k] = (dx[k] + dx[k + 1]) / 2;
    }

    for i in 0..DERIVATIVE_LEN - HAMMING_SIZE - 2 {
        let s: i64 = dx[i..i + HAMMING_SIZE]
            .iter()
            .zip(HAMMING.iter())
            .map(|(&d, &w)| -d * i64::from(w))
            .sum();
        dx[i] = s / HAMMING_SUM;
    }

    let mut signal = [0; DETECTION_LEN];
    signal.copy_from_slice(&dx[..DETECTION_LEN]);
    signal
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kernel_sum() {
        assert_eq!(HAMMING.iter().map(|&w| i64::from(w)).sum::<i64>(), HAMMING_SUM);
    }

    #[test]
    fn rising_ramp_gives_negative_signal() {
        let ramp: Vec<i64> = (0..WINDOW_LEN as i64).map(|i| 4 * i).collect();
        let signal = detection_signal(&ramp);

        // slope 4, inverted and normalised by the kernel sum
        assert!(signal[..DERIVATIVE_LEN - HAMMING_SIZE - 2]
            .iter()
            .all(|&s| s == -4));
    }

    #[test]
    fn falling_edge_becomes_peak() {
        let mut step = [1000; WINDOW_LEN];
        for s in step[200..].iter_mut() {
            *s = 0;
        }
        let signal = detection_signal(&step);

        let (peak, &max) = signal
            .iter()
            .enumerate()
            .max_by_key(|&(_, &s)| s)
            .unwrap();
        assert!(max > 0);
        // the step sits between samples 199 and 200, output `i` is centred on `i + 2`
        assert!((196..=200).contains(&peak), "peak at {}", peak);
        assert!(signal.iter().all(|&s| s >= 0));
    }
}
