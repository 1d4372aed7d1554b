const MIN_TICKS: usize = 2;
const MAX_TICKS: usize = 12;

const SECOND: f64 = 1.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.0 * DAY;

const TIME_STEPS: [f64; 19] = [
    SECOND,
    5.0 * SECOND,
    15.0 * SECOND,
    30.0 * SECOND,
    MINUTE,
    5.0 * MINUTE,
    15.0 * MINUTE,
    30.0 * MINUTE,
    HOUR,
    3.0 * HOUR,
    6.0 * HOUR,
    12.0 * HOUR,
    DAY,
    2.0 * DAY,
    7.0 * DAY,
    14.0 * DAY,
    30.0 * DAY,
    91.0 * DAY,
    182.0 * DAY,
];

pub(super) fn axis_tick_target_count(axis_span_px: f64, target_spacing_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return MIN_TICKS;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return MIN_TICKS;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(MIN_TICKS, MAX_TICKS)
}

/// 1-2-5 step closest to `span / count`.
pub(super) fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Round-valued ticks inside `[min, max]`, roughly `count` of them.
pub(super) fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || count == 0 {
        return Vec::new();
    }
    let (min, max) = (min.min(max), min.max(max));
    if max == min {
        return vec![min];
    }
    ticks_with_step(min, max, nice_step(max - min, count))
}

/// Ticks on calendar-like boundaries (UTC) for a span of Unix seconds.
///
/// Spans longer than the largest fixed step fall back to 1-2-5 multiples of
/// a 365-day year.
pub(super) fn time_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || count == 0 {
        return Vec::new();
    }
    let (min, max) = (min.min(max), min.max(max));
    if max == min {
        return vec![min];
    }

    let raw = (max - min) / count as f64;
    let step = if raw < SECOND {
        nice_step(max - min, count)
    } else {
        match TIME_STEPS.iter().copied().find(|step| *step >= raw) {
            Some(step) => step,
            None => nice_step((max - min) / YEAR, count) * YEAR,
        }
    };
    ticks_with_step(min, max, step)
}

fn ticks_with_step(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let first = (min / step).ceil();
    let last = (max / step).floor();
    if first > last || last - first > (MAX_TICKS * 4) as f64 {
        return Vec::new();
    }
    let (first, last) = (first as i64, last as i64);
    (first..=last).map(|index| index as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_use_round_steps() {
        assert_eq!(nice_ticks(0.0, 130.0, 6), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]);
    }

    #[test]
    fn nice_ticks_accept_reversed_bounds() {
        assert_eq!(nice_ticks(10.0, 0.0, 2), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn collapsed_range_yields_single_tick() {
        assert_eq!(nice_ticks(5.0, 5.0, 4), vec![5.0]);
        assert_eq!(time_ticks(60.0, 60.0, 4), vec![60.0]);
    }

    #[test]
    fn daily_ticks_land_on_utc_midnight() {
        let ticks = time_ticks(0.5 * DAY, 10.5 * DAY, 5);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|tick| tick % DAY == 0.0));
    }

    #[test]
    fn target_count_is_clamped() {
        assert_eq!(axis_tick_target_count(0.0, 50.0), MIN_TICKS);
        assert_eq!(axis_tick_target_count(10_000.0, 10.0), MAX_TICKS);
        assert_eq!(axis_tick_target_count(730.0, 90.0), 9);
    }
}
