use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{RawSample, Sample};

/// Result of the pre-pass that turns provider samples into a renderable series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolvedSeries {
    pub samples: Vec<Sample>,
    /// Samples removed because their time was missing or non-finite.
    pub dropped_malformed: usize,
    /// Gaps that preceded any known price.
    pub dropped_leading: usize,
    /// Gaps filled with the previous known price.
    pub filled: usize,
}

impl ResolvedSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Validates, orders and forward-fills a provider series.
///
/// Samples without a finite time are dropped. The remaining samples are
/// stable-sorted by time, then every missing (or non-finite) price takes the
/// last known price. Gaps before the first known price are dropped.
#[must_use]
pub fn resolve_series(raw: &[RawSample]) -> ResolvedSeries {
    let mut timed: Vec<(f64, Option<f64>)> = Vec::with_capacity(raw.len());
    let mut dropped_malformed = 0;
    for sample in raw {
        match sample.time {
            Some(time) if time.is_finite() => {
                timed.push((time, sample.price.filter(|price| price.is_finite())));
            }
            _ => dropped_malformed += 1,
        }
    }

    timed.sort_by(|left, right| left.0.total_cmp(&right.0));

    let mut samples = Vec::with_capacity(timed.len());
    let mut last_known: Option<f64> = None;
    let mut dropped_leading = 0;
    let mut filled = 0;
    for (time, price) in timed {
        match (price, last_known) {
            (Some(price), _) => {
                last_known = Some(price);
                samples.push(Sample::new(time, price));
            }
            (None, Some(previous)) => {
                filled += 1;
                samples.push(Sample::new(time, previous));
            }
            (None, None) => dropped_leading += 1,
        }
    }

    debug!(
        raw_count = raw.len(),
        resolved_count = samples.len(),
        dropped_malformed,
        dropped_leading,
        filled,
        "resolved price series"
    );

    ResolvedSeries {
        samples,
        dropped_malformed,
        dropped_leading,
        filled,
    }
}

/// Inclusive `(min, max)` of sample times, or `None` for an empty series.
#[must_use]
pub fn time_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    extent(samples.iter().map(|sample| sample.time))
}

/// Inclusive `(min, max)` of sample prices, or `None` for an empty series.
#[must_use]
pub fn price_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    extent(samples.iter().map(|sample| sample.price))
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
