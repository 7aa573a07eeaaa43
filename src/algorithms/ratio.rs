use heapless::Vec;

/// Upper bound on ratio samples collected in one window.
pub const MAX_RATIOS: usize = 5;

/// Valleys closer than this do not bound a usable pulse.
pub const MIN_VALLEY_GAP: usize = 10;

/// Red to infrared AC/DC ratios, scaled by 100.
pub type Ratios = Vec<i32, MAX_RATIOS>;

/// Systolic peak of one channel between two valleys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pulse {
    /// Highest sample, the DC level at the peak.
    max: i64,
    /// Height of the peak above the straight line joining the valleys.
    ac: i64,
}

impl Pulse {
    fn measure(signal: &[i64], start: usize, end: usize) -> Option<Self> {
        let span = signal.get(start..end)?;
        let first = *signal.get(start)?;
        let last = *signal.get(end)?;

        // `rev` so the first of equal maxima wins
        let (offset, &max) = span.iter().enumerate().rev().max_by_key(|&(_, &v)| v)?;

        let baseline = first + (last - first) * offset as i64 / (end - start) as i64;

        Some(Self {
            max,
            ac: max - baseline,
        })
    }
}

/// Collects up to [`MAX_RATIOS`] ratios, one per valley pair wider than [`MIN_VALLEY_GAP`].
///
/// `ir` and `red` are the smoothed raw channels. Each ratio is
/// `(RED_AC * IR_DC) / (IR_AC * RED_DC) * 100` in fixed point, and pairs whose terms vanish or
/// turn negative are skipped.
pub fn ratios(ir: &[i64], red: &[i64], valleys: &[usize]) -> Ratios {
    let mut ratios = Ratios::new();

    for pair in valleys.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if end <= start + MIN_VALLEY_GAP {
            continue;
        }

        let (ir, red) = match (Pulse::measure(ir, start, end), Pulse::measure(red, start, end)) {
            (Some(ir), Some(red)) => (ir, red),
            _ => continue,
        };

        // |ac| < 2^32 and |max| <= 2^31, so neither product leaves i64
        let numerator = (red.ac * ir.max) >> 7;
        let denominator = (ir.ac * red.max) >> 7;
        if denominator > 0 && numerator != 0 {
            let ratio = (numerator * 100 / denominator).clamp(i32::MIN.into(), i32::MAX.into());
            if ratios.push(ratio as i32).is_err() {
                break;
            }
        }
    }

    ratios
}

/// Median of `ratios`, sorting them in place.
///
/// An even count yields the truncated mean of the two middle values.
pub fn median(ratios: &mut [i32]) -> Option<i32> {
    ratios.sort_unstable();

    let mid = ratios.len() / 2;
    match ratios.len() {
        0 => None,
        n if n % 2 == 1 => Some(ratios[mid]),
        _ => Some(((i64::from(ratios[mid - 1]) + i64::from(ratios[mid])) / 2) as i32),
    }
}
