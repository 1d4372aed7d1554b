use price_chart::core::{RawSample, Sample, resolve_series};

fn raw(points: &[(f64, Option<f64>)]) -> Vec<RawSample> {
    points
        .iter()
        .map(|&(time, price)| RawSample::new(Some(time), price))
        .collect()
}

#[test]
fn gaps_are_forward_filled() {
    let resolved = resolve_series(&raw(&[
        (0.0, Some(10.0)),
        (1.0, None),
        (2.0, None),
        (3.0, Some(20.0)),
    ]));
    let prices: Vec<f64> = resolved.samples.iter().map(|s| s.price).collect();
    assert_eq!(prices, vec![10.0, 10.0, 10.0, 20.0]);
    assert_eq!(resolved.filled, 2);
}

#[test]
fn leading_gap_is_dropped() {
    let resolved = resolve_series(&raw(&[(0.0, None), (1.0, Some(10.0))]));
    assert_eq!(resolved.samples, vec![Sample::new(1.0, 10.0)]);
    assert_eq!(resolved.dropped_leading, 1);
}

#[test]
fn samples_without_time_are_malformed() {
    let resolved = resolve_series(&[
        RawSample::new(None, Some(1.0)),
        RawSample::new(Some(f64::NAN), Some(2.0)),
        RawSample::new(Some(5.0), Some(3.0)),
    ]);
    assert_eq!(resolved.samples, vec![Sample::new(5.0, 3.0)]);
    assert_eq!(resolved.dropped_malformed, 2);
}

#[test]
fn unordered_input_is_sorted_before_filling() {
    let resolved = resolve_series(&raw(&[(2.0, None), (0.0, Some(1.0)), (1.0, Some(4.0))]));
    assert_eq!(
        resolved.samples,
        vec![
            Sample::new(0.0, 1.0),
            Sample::new(1.0, 4.0),
            Sample::new(2.0, 4.0)
        ]
    );
}

#[test]
fn provider_payload_deserializes_with_timestamp_alias() {
    let payload = r#"[
        {"timestamp": 1700000000, "price": 100.5},
        {"timestamp": 1700086400, "price": null},
        {"price": 3.0}
    ]"#;
    let samples: Vec<RawSample> = serde_json::from_str(payload).expect("payload");
    let resolved = resolve_series(&samples);

    assert_eq!(
        resolved.samples,
        vec![
            Sample::new(1_700_000_000.0, 100.5),
            Sample::new(1_700_086_400.0, 100.5)
        ]
    );
    assert_eq!(resolved.dropped_malformed, 1);
}

#[test]
fn empty_input_resolves_to_empty_series() {
    let resolved = resolve_series(&[]);
    assert!(resolved.is_empty());
}

#[test]
fn decimal_provider_samples_convert_to_unix_seconds() {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    let day = Utc.with_ymd_and_hms(2024, 10, 16, 0, 0, 0).single().expect("date");
    let raw = [
        RawSample::from_datetime(day, Some(Decimal::new(12_050, 2))).expect("raw"),
        RawSample::from_datetime(day + chrono::Duration::days(1), None).expect("raw"),
    ];
    let resolved = resolve_series(&raw);

    assert_eq!(
        resolved.samples,
        vec![
            Sample::new(1_729_036_800.0, 120.5),
            Sample::new(1_729_123_200.0, 120.5)
        ]
    );
    assert_eq!(
        Sample::from_decimal_time(day, Decimal::new(7, 0)).expect("sample"),
        Sample::new(1_729_036_800.0, 7.0)
    );
}
