use crate::algorithms::{derivative::HAMMING_SIZE, peaks::Locations};

/// Half width of the neighbourhood searched for the exact valley.
pub const VALLEY_RADIUS: usize = 5;

/// Maps detection peaks back to minima of the raw IR channel.
///
/// Each peak is shifted by half the kernel width and the first minimum of `ir` within
/// `VALLEY_RADIUS` of that point is taken. Peaks whose neighbourhood is not strictly inside
/// `0..limit` are dropped.
pub fn refine(peaks: &[usize], ir: &[i32], limit: usize) -> Locations {
    let mut valleys = Locations::new();

    for &peak in peaks {
        let centre = peak + HAMMING_SIZE / 2;
        if centre <= VALLEY_RADIUS || centre + VALLEY_RADIUS >= limit {
            continue;
        }

        let start = centre - VALLEY_RADIUS;
        let valley = ir
            .get(start..centre + VALLEY_RADIUS)
            .and_then(|span| span.iter().enumerate().min_by_key(|&(_, &v)| v))
            .map(|(offset, _)| start + offset);

        if let Some(valley) = valley {
            if valleys.push(valley).is_err() {
                break;
            }
        }
    }

    valleys
}
