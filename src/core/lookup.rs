//! Time-ordered lookups over a resolved series.
//!
//! Both lookups assume samples are sorted ascending by time. On unsorted
//! input they still terminate in O(log n) without panicking, but the
//! returned sample is unspecified.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Sample;

/// Price obtained by linear interpolation between two bracketing samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedPrice {
    pub time: f64,
    pub price: f64,
    pub left_index: usize,
    pub right_index: usize,
}

/// Index of the sample whose time is closest to `time`.
///
/// Ties resolve to the lower index. Returns `None` for an empty series,
/// a non-finite query, or a query outside the series' time extent.
#[must_use]
pub fn nearest_sample_index(samples: &[Sample], time: f64) -> Option<usize> {
    if !time.is_finite() || !within_extent(samples, time) {
        return None;
    }

    let right = lower_bound(samples, time);
    let mut candidates: SmallVec<[usize; 2]> = SmallVec::new();
    if right > 0 {
        // Walk back to the first sample sharing the left neighbour's time.
        candidates.push(lower_bound(samples, samples[right - 1].time).min(right - 1));
    }
    if right < samples.len() {
        candidates.push(right);
    }

    candidates
        .into_iter()
        .min_by_key(|&index| (OrderedFloat((samples[index].time - time).abs()), index))
}

#[must_use]
pub fn nearest_sample(samples: &[Sample], time: f64) -> Option<&Sample> {
    nearest_sample_index(samples, time).map(|index| &samples[index])
}

/// Linear interpolation of price at `time` between its bracketing samples.
///
/// Returns `None` outside the series' time extent or when fewer than two
/// samples exist. A zero-width bracket yields the left sample's price.
#[must_use]
pub fn interpolate_price(samples: &[Sample], time: f64) -> Option<InterpolatedPrice> {
    if samples.len() < 2 || !time.is_finite() || !within_extent(samples, time) {
        return None;
    }

    let right_index = lower_bound(samples, time).clamp(1, samples.len() - 1);
    let left_index = right_index - 1;
    let left = samples[left_index];
    let right = samples[right_index];

    let width = right.time - left.time;
    let price = if width <= 0.0 {
        left.price
    } else {
        let ratio = ((time - left.time) / width).clamp(0.0, 1.0);
        left.price + (right.price - left.price) * ratio
    };

    Some(InterpolatedPrice {
        time,
        price,
        left_index,
        right_index,
    })
}

fn within_extent(samples: &[Sample], time: f64) -> bool {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => time >= first.time && time <= last.time,
        _ => false,
    }
}

/// First index whose time is `>= time`.
fn lower_bound(samples: &[Sample], time: f64) -> usize {
    samples.partition_point(|sample| sample.time < time)
}
