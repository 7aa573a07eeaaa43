//! The estimation pipeline.

pub mod calibration;
mod derivative;
mod heart_rate;
mod peaks;
mod ratio;
mod smooth;
mod valleys;

use crate::{sampling::WINDOW_LEN, Estimate};

use derivative::DETECTION_LEN;
use peaks::{Locations, MAX_PEAKS, MIN_PEAK_DISTANCE};

/// Estimates heart rate and SpO2 from one full window of IR and RED samples.
pub fn estimate(ir: &[i32], red: &[i32]) -> Estimate {
    debug_assert_eq!(ir.len(), WINDOW_LEN);
    debug_assert_eq!(red.len(), WINDOW_LEN);

    let mut x = [0i64; WINDOW_LEN];
    smooth::remove_dc(ir, &mut x);
    smooth::moving_average_4(&mut x);

    let signal = derivative::detection_signal(&x);
    let threshold = peaks::threshold(&signal);
    let peaks = peaks::find_peaks(&signal, threshold, MIN_PEAK_DISTANCE, MAX_PEAKS);
    log::trace!("threshold {}, peaks at {:?}", threshold, peaks.as_slice());

    Estimate {
        heart_rate: heart_rate::heart_rate(&peaks),
        spo2: oxygen_saturation(ir, red, &peaks),
    }
}

fn oxygen_saturation(ir: &[i32], red: &[i32], peaks: &Locations) -> Option<i32> {
    let valleys = valleys::refine(peaks, ir, DETECTION_LEN);
    if valleys.len() < 2 {
        log::trace!("{} valleys, no SpO2", valleys.len());
        return None;
    }

    let mut x = [0i64; WINDOW_LEN];
    let mut y = [0i64; WINDOW_LEN];
    for (x, &sample) in x.iter_mut().zip(ir) {
        *x = i64::from(sample);
    }
    for (y, &sample) in y.iter_mut().zip(red) {
        *y = i64::from(sample);
    }
    smooth::moving_average_4(&mut x);
    smooth::moving_average_4(&mut y);

    let mut ratios = ratio::ratios(&x, &y, &valleys);
    let ratio = ratio::median(&mut ratios)?;
    log::trace!("valleys at {:?}, ratio {}", valleys.as_slice(), ratio);

    calibration::spo2_from_ratio(ratio).map(i32::from)
}
