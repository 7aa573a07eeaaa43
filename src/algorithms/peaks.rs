use core::cmp::Reverse;

use heapless::Vec;

/// Upper bound on candidate peaks collected in one window.
pub const MAX_CANDIDATES: usize = 15;

/// Peaks kept for rate and valley estimation.
pub const MAX_PEAKS: usize = 5;

/// Minimum separation of two pulses, in samples.
pub const MIN_PEAK_DISTANCE: usize = 8;

/// Sample indices into a signal, in ascending order once detection is done.
pub type Locations = Vec<usize, MAX_CANDIDATES>;

/// Mean absolute value of `signal`, used as the minimum peak height.
pub fn threshold(signal: &[i64]) -> i64 {
    if signal.is_empty() {
        return 0;
    }

    let sum: i64 = signal.iter().map(|s| s.abs()).sum();
    sum / signal.len() as i64
}

/// Finds at most `max_peaks` peaks above `min_height`, separated by more than `min_distance`.
///
/// Higher peaks win when two are too close. The surviving locations are sorted, and the
/// earliest `max_peaks` of them are returned.
pub fn find_peaks(
    signal: &[i64],
    min_height: i64,
    min_distance: usize,
    max_peaks: usize,
) -> Locations {
    let mut locations = peaks_above(signal, min_height);
    remove_close_peaks(&mut locations, signal, min_distance);
    locations.truncate(max_peaks);
    locations
}

/// Collects local maxima above `min_height`, left to right, up to [`MAX_CANDIDATES`].
fn peaks_above(signal: &[i64], min_height: i64) -> Locations {
    let mut locations = Locations::new();
    let n = signal.len();

    let mut i = 1;
    while i + 1 < n {
        if signal[i] > min_height && signal[i] > signal[i - 1] {
            // a flat top counts once, at its left edge
            let mut width = 1;
            while i + width < n && signal[i] == signal[i + width] {
                width += 1;
            }

            match signal.get(i + width) {
                Some(&next) if signal[i] > next => match locations.push(i) {
                    Ok(()) => i += width + 1,
                    Err(_) => {
                        log::trace!("peak at {} dropped, candidate list full", i);
                        i += width;
                    }
                },
                _ => i += width,
            }
        } else {
            i += 1;
        }
    }

    locations
}

fn remove_close_peaks(locations: &mut Locations, signal: &[i64], min_distance: usize) {
    // Candidates were collected left to right, so the index breaks ties in discovery order.
    locations.sort_unstable_by_key(|&i| (Reverse(signal[i]), i));

    let mut kept = Locations::new();
    for &location in locations.iter() {
        // The zero-lag peak of the autocorrelation sits at index -1.
        let clear_of_origin = location + 1 > min_distance;
        let clear_of_kept = kept
            .iter()
            .all(|&other| location.abs_diff(other) > min_distance);

        if clear_of_origin && clear_of_kept {
            // never full, `kept` is no longer than `locations`
            let _ = kept.push(location);
        }
    }

    kept.sort_unstable();
    *locations = kept;
}
