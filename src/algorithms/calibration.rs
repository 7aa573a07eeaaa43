//! Ratio to SpO2 calibration.

#[allow(unused_imports)]
use micromath::F32Ext;

/// Smallest ratio with a trusted table entry.
pub const MIN_RATIO: i32 = 3;

/// Largest ratio with a trusted table entry.
pub const MAX_RATIO: i32 = 183;

/// %SpO2 indexed by the ratio (scaled by 100), tabulated from [`calibration_curve`].
#[rustfmt::skip]
pub const SPO2_TABLE: [u8; 184] = [
    95, 95, 95, 96, 96, 96, 97, 97, 97, 97, 97, 98, 98, 98, 98, 98, 99, 99, 99, 99,
    99, 99, 99, 99, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 100, 100, 99, 99, 99, 99, 99, 99, 99, 99, 98, 98, 98, 98, 98, 98, 97, 97,
    97, 97, 96, 96, 96, 96, 95, 95, 95, 94, 94, 94, 93, 93, 93, 92, 92, 92, 91, 91,
    90, 90, 89, 89, 89, 88, 88, 87, 87, 86, 86, 85, 85, 84, 84, 83, 82, 82, 81, 81,
    80, 80, 79, 78, 78, 77, 76, 76, 75, 74, 74, 73, 72, 72, 71, 70, 69, 69, 68, 67,
    66, 66, 65, 64, 63, 62, 62, 61, 60, 59, 58, 57, 56, 56, 55, 54, 53, 52, 51, 50,
    49, 48, 47, 46, 45, 44, 43, 42, 41, 40, 39, 38, 37, 36, 35, 34, 33, 31, 30, 29,
    28, 27, 26, 25, 23, 22, 21, 20, 19, 17, 16, 15, 14, 12, 11, 10, 9, 7, 6, 5,
    3, 2, 1, 0,
];

/// Looks up the SpO2 percentage for a scaled ratio.
///
/// Returns `None` outside `MIN_RATIO..=MAX_RATIO`.
///
/// ```rust
/// use ppg_oximeter::spo2_from_ratio;
///
/// assert_eq!(spo2_from_ratio(30), Some(100));
/// assert_eq!(spo2_from_ratio(100), Some(80));
/// assert_eq!(spo2_from_ratio(2), None);
/// ```
pub fn spo2_from_ratio(ratio: i32) -> Option<u8> {
    if (MIN_RATIO..=MAX_RATIO).contains(&ratio) {
        SPO2_TABLE.get(ratio as usize).copied()
    } else {
        None
    }
}

/// The empirical fit `-45.060 r² + 30.354 r + 94.845` with `r = ratio / 100`, rounded and
/// floored at 0.
pub fn calibration_curve(ratio: i32) -> u8 {
    let r = ratio as f32 / 100.0;
    let spo2 = -45.060 * r * r + 30.354 * r + 94.845;

    spo2.round().max(0.0).min(100.0) as u8
}
