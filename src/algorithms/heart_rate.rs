use crate::sampling::FS;

/// Beats per minute from the average distance of consecutive peaks.
///
/// Needs at least two peaks.
pub fn heart_rate(peaks: &[usize]) -> Option<i32> {
    if peaks.len() < 2 {
        return None;
    }

    let interval_sum: usize = peaks.windows(2).map(|w| w[1] - w[0]).sum();
    let average = interval_sum / (peaks.len() - 1);

    FS.interval_to_bpm(average as i32)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn needs_two_peaks() {
        assert_eq!(heart_rate(&[]), None);
        assert_eq!(heart_rate(&[120]), None);
    }

    #[test]
    fn averages_intervals() {
        assert_eq!(heart_rate(&[100, 200]), Some(60));
        // intervals 70, 90, 80 average to 80 samples, 0.8 s
        assert_eq!(heart_rate(&[10, 80, 170, 250]), Some(75));
        // 251 / 3 = 83, 6000 / 83 = 72
        assert_eq!(heart_rate(&[9, 90, 175, 260]), Some(72));
    }
}
