use crate::{Estimate, Reading};

/// Last presented reading, used in place of unavailable metrics.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResultCache {
    last: Option<Reading>,
}

impl ResultCache {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// The most recently presented reading, if any.
    pub fn last(&self) -> Option<Reading> {
        self.last
    }

    /// Fills the gaps of `estimate` and remembers the result.
    ///
    /// Missing metrics come from the previous reading. Before the first reading exists they
    /// come from `bootstrap`.
    pub fn resolve(&mut self, estimate: Estimate, bootstrap: Reading) -> Reading {
        let fallback = self.last.unwrap_or(bootstrap);

        if estimate.heart_rate.is_none() {
            log::debug!("heart rate unavailable, using {}", fallback.heart_rate);
        }
        if estimate.spo2.is_none() {
            log::debug!("SpO2 unavailable, using {}", fallback.spo2);
        }

        let reading = Reading {
            heart_rate: estimate.heart_rate.unwrap_or(fallback.heart_rate),
            spo2: estimate.spo2.unwrap_or(fallback.spo2),
        };
        self.last = Some(reading);

        reading
    }
}
