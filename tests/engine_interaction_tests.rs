use approx::assert_relative_eq;
use price_chart::api::{ChartEngine, ChartEngineConfig, ClickOutcome};
use price_chart::core::{PriceLabelFormat, RawSample, Sample, TimeLabelFormat};
use price_chart::interaction::{ChartInput, HoverMode, InteractionMode};
use price_chart::render::NullRenderer;

fn raw_series() -> Vec<RawSample> {
    vec![
        RawSample::unix(0, Some(100.0)),
        RawSample::unix(1, Some(110.0)),
        RawSample::unix(2, None),
        RawSample::unix(3, Some(130.0)),
    ]
}

fn engine_with(config: ChartEngineConfig) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series(&raw_series()).expect("series");
    engine
}

fn engine() -> ChartEngine<NullRenderer> {
    engine_with(ChartEngineConfig::default())
}

/// Viewport x of a domain time under the current view.
fn viewport_x(engine: &ChartEngine<NullRenderer>, time: f64) -> f64 {
    let view = engine.view().expect("view");
    engine.plot_area().left + view.time_to_x(time)
}

#[test]
fn default_layout_leaves_margins_around_plot() {
    let engine = engine();
    let plot = engine.plot_area();
    assert_eq!((plot.left, plot.top), (40.0, 20.0));
    assert_eq!((plot.width, plot.height), (730.0, 340.0));
}

#[test]
fn set_series_fills_gaps_and_fits_domains() {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default())
        .expect("engine init");
    let summary = engine.set_series(&raw_series()).expect("series");

    assert_eq!(summary.samples_len, 4);
    assert_eq!(summary.filled, 1);
    assert_eq!(engine.samples()[2].price, 110.0);
    assert_eq!(engine.time_domain().map(|d| d.as_tuple()), Some((0.0, 3.0)));
    assert_eq!(engine.price_domain().map(|d| d.as_tuple()), Some((0.0, 130.0)));
    assert_eq!(engine.renderer().render_count, 1);
}

#[test]
fn hover_interpolates_between_bracketing_samples() {
    let mut engine = engine();
    let x = viewport_x(&engine, 2.5);
    engine.pointer_move(x, 100.0).expect("pointer move");

    let hovered = engine.hovered().expect("hover point");
    assert_relative_eq!(hovered.time, 2.5, epsilon = 1e-9);
    assert_relative_eq!(hovered.price, 120.0, epsilon = 1e-9);

    let annotation = engine.hover_annotation().expect("hover annotation");
    assert_eq!(annotation.label.price, "$120.00");
    assert!(!annotation.frozen);
}

#[test]
fn snap_mode_uses_nearest_sample() {
    let mut engine = engine_with(ChartEngineConfig::default().with_hover_mode(HoverMode::SnapToNearest));
    let x = viewport_x(&engine, 1.4);
    engine.pointer_move(x, 100.0).expect("pointer move");

    let hovered = engine.hovered().expect("hover point");
    assert_eq!((hovered.time, hovered.price), (1.0, 110.0));
    assert_eq!(hovered.nearest_index, 1);
}

#[test]
fn hidden_mode_never_shows_hover() {
    let mut engine = engine();
    engine.set_hover_mode(HoverMode::Hidden).expect("mode");
    let x = viewport_x(&engine, 1.5);
    engine.pointer_move(x, 100.0).expect("pointer move");

    assert!(engine.hovered().is_none());
    assert!(engine.hover_annotation().is_none());
}

#[test]
fn pointer_in_margin_hides_hover() {
    let mut engine = engine();
    let x = viewport_x(&engine, 1.5);
    engine.pointer_move(x, 100.0).expect("pointer move");
    assert!(engine.hover_annotation().is_some());

    engine.pointer_move(10.0, 100.0).expect("pointer move");
    assert!(engine.hover_annotation().is_none());

    engine.pointer_move(x, 100.0).expect("pointer move");
    engine.pointer_leave().expect("leave");
    assert!(engine.hover_annotation().is_none());
}

#[test]
fn click_freezes_hover_then_dismisses_on_marker() {
    let mut engine = engine();
    let x = viewport_x(&engine, 2.5);
    engine.pointer_move(x, 100.0).expect("pointer move");

    let ClickOutcome::Frozen(id) = engine.click(x, 100.0).expect("click") else {
        panic!("expected a frozen annotation");
    };
    let frozen = engine.frozen_annotation(id).expect("stored");
    assert_relative_eq!(frozen.price, 120.0, epsilon = 1e-9);
    let marker = engine.plot_area().to_viewport(frozen.screen);

    let outcome = engine.click(marker.x, marker.y).expect("click");
    assert_eq!(outcome, ClickOutcome::Dismissed(id));
    assert_eq!(engine.frozen_annotations().count(), 0);
}

#[test]
fn click_without_hover_is_ignored() {
    let mut engine = engine();
    let outcome = engine.click(200.0, 200.0).expect("click");
    assert_eq!(outcome, ClickOutcome::Ignored);
    assert_eq!(engine.frozen_annotations().count(), 0);
}

#[test]
fn dismissing_unknown_annotation_is_a_no_op() {
    let mut engine = engine();
    let x = viewport_x(&engine, 1.0);
    engine.pointer_move(x, 100.0).expect("pointer move");
    let ClickOutcome::Frozen(id) = engine.click(x, 100.0).expect("click") else {
        panic!("expected a frozen annotation");
    };

    assert!(engine.dismiss_annotation(id).expect("dismiss"));
    assert!(!engine.dismiss_annotation(id).expect("dismiss again"));
}

#[test]
fn wheel_zoom_keeps_time_under_pointer() {
    let mut engine = engine();
    let x = viewport_x(&engine, 1.2);
    let y = 150.0;
    let view = engine.view().expect("view");
    let local_x = x - engine.plot_area().left;
    let before = view.x_to_time(local_x);

    engine.wheel(x, y, -500.0).expect("wheel");

    assert_relative_eq!(engine.transform().k, 2.0, epsilon = 1e-12);
    let after = engine.view().expect("view").x_to_time(local_x);
    assert_relative_eq!(before, after, epsilon = 1e-9);
    assert_eq!(engine.time_domain().map(|d| d.as_tuple()), Some((0.0, 3.0)));
}

#[test]
fn wheel_zoom_out_at_identity_is_clamped() {
    let mut engine = engine();
    engine.wheel(200.0, 200.0, 300.0).expect("wheel");
    assert!(engine.transform().is_identity());
}

#[test]
fn brush_commits_both_domains_and_resets_transform() {
    let mut engine = engine();
    engine.pinch(300.0, 150.0, 1.5).expect("pinch");
    engine.reset_view().expect("reset");

    engine.brush_start(113.0, 54.0).expect("brush start");
    assert_eq!(engine.interaction_mode(), InteractionMode::Brushing);
    engine.brush_move(300.0, 120.0).expect("brush move");
    let commit = engine
        .brush_end(405.0, 190.0)
        .expect("brush end")
        .expect("commit");

    assert_relative_eq!(commit.time.min(), 0.3, epsilon = 1e-9);
    assert_relative_eq!(commit.time.max(), 1.5, epsilon = 1e-9);
    assert_relative_eq!(commit.price.min(), 65.0, epsilon = 1e-9);
    assert_relative_eq!(commit.price.max(), 117.0, epsilon = 1e-9);
    assert_eq!(engine.time_domain(), Some(commit.time));
    assert_eq!(engine.price_domain(), Some(commit.price));
    assert!(engine.transform().is_identity());
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn degenerate_brush_leaves_domains_unchanged() {
    let mut engine = engine();
    let before = (engine.time_domain(), engine.price_domain());

    engine.brush_start(200.0, 100.0).expect("brush start");
    let commit = engine.brush_end(200.4, 300.0).expect("brush end");

    assert!(commit.is_none());
    assert_eq!((engine.time_domain(), engine.price_domain()), before);
}

#[test]
fn zero_epsilon_brush_still_ignores_zero_width_drag() {
    let mut engine = engine_with(ChartEngineConfig::default().with_brush_epsilon_px(0.0));
    let before = (engine.time_domain(), engine.price_domain());

    engine.brush_start(200.0, 100.0).expect("brush start");
    assert!(engine.brush_end(200.0, 300.0).expect("brush end").is_none());
    engine.brush_start(200.0, 100.0).expect("brush start");
    assert!(engine.brush_end(400.0, 100.0).expect("brush end").is_none());

    assert_eq!((engine.time_domain(), engine.price_domain()), before);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn frozen_annotations_survive_series_replacement() {
    let mut engine = engine();
    let x = viewport_x(&engine, 2.5);
    engine.pointer_move(x, 100.0).expect("pointer move");
    let ClickOutcome::Frozen(id) = engine.click(x, 100.0).expect("click") else {
        panic!("expected a frozen annotation");
    };

    engine
        .set_series(&[RawSample::unix(0, Some(50.0)), RawSample::unix(10, Some(60.0))])
        .expect("series");

    let frozen = engine.frozen_annotation(id).expect("still frozen");
    assert_relative_eq!(frozen.time, 2.5, epsilon = 1e-9);
    assert_relative_eq!(frozen.price, 120.0, epsilon = 1e-9);
    assert_relative_eq!(frozen.screen.x, 730.0 * 0.25, epsilon = 1e-9);
    assert!(engine.hover_annotation().is_none());
}

#[test]
fn reset_view_restores_data_extent() {
    let mut engine = engine();
    engine.set_domains((1.0, 2.0), (100.0, 110.0)).expect("domains");
    engine.pan(25.0, -10.0).expect("pan");

    engine.dispatch(ChartInput::ResetView).expect("reset");

    assert!(engine.transform().is_identity());
    assert_eq!(engine.time_domain().map(|d| d.as_tuple()), Some((0.0, 3.0)));
    assert_eq!(engine.price_domain().map(|d| d.as_tuple()), Some((0.0, 130.0)));
}

#[test]
fn non_finite_pointer_is_rejected() {
    let mut engine = engine();
    assert!(engine.pointer_move(f64::NAN, 10.0).is_err());
    assert!(engine.wheel(10.0, 10.0, f64::INFINITY).is_err());
    assert!(engine.pan(f64::NAN, 0.0).is_err());
}

#[test]
fn inputs_before_series_are_harmless() {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default())
        .expect("engine init");
    engine.pointer_move(200.0, 200.0).expect("pointer move");
    assert_eq!(engine.click(200.0, 200.0).expect("click"), ClickOutcome::Ignored);
    engine.brush_start(100.0, 100.0).expect("brush start");
    assert!(engine.brush_end(300.0, 300.0).expect("brush end").is_none());
    assert!(engine.view().is_none());
}

#[test]
fn every_input_ends_with_one_render() {
    let mut engine = engine();
    let before = engine.renderer().render_count;
    let x = viewport_x(&engine, 1.0);

    for input in [
        ChartInput::PointerMove { x, y: 100.0 },
        ChartInput::Click { x, y: 100.0 },
        ChartInput::Wheel {
            x,
            y: 100.0,
            delta_y: -100.0,
        },
        ChartInput::PointerLeave,
    ] {
        engine.dispatch(input).expect("input");
    }

    assert_eq!(engine.renderer().render_count, before + 4);
}

#[test]
fn label_formats_relabel_existing_annotations() {
    let mut engine = engine();
    let x = viewport_x(&engine, 2.5);
    engine.pointer_move(x, 100.0).expect("pointer move");
    let ClickOutcome::Frozen(id) = engine.click(x, 100.0).expect("click") else {
        panic!("expected a frozen annotation");
    };

    engine
        .set_label_formats(
            TimeLabelFormat::new("%H:%M:%S"),
            PriceLabelFormat {
                prefix: "EUR ".to_owned(),
                precision: 1,
            },
        )
        .expect("formats");

    let frozen = engine.frozen_annotation(id).expect("frozen");
    assert_eq!(frozen.label.date, "00:00:02");
    assert_eq!(frozen.label.price, "EUR 120.0");
    assert!(
        engine
            .set_label_formats(TimeLabelFormat::new(""), PriceLabelFormat::default())
            .is_err()
    );
}

#[test]
fn clearing_series_keeps_frozen_annotations_and_axes() {
    let mut engine = engine();
    let x = viewport_x(&engine, 2.5);
    engine.pointer_move(x, 100.0).expect("pointer move");
    let ClickOutcome::Frozen(id) = engine.click(x, 100.0).expect("click") else {
        panic!("expected a frozen annotation");
    };

    engine.clear_series().expect("clear");

    assert!(engine.samples().is_empty());
    assert_eq!(engine.time_domain(), None);
    assert_eq!(engine.price_domain(), None);
    assert!(engine.view().is_none());
    assert!(engine.hover_annotation().is_none());
    assert_eq!(engine.frozen_annotations().count(), 1);

    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.lines.len(), 2);
    assert!(frame.texts.is_empty());
    assert!(frame.annotations.is_empty());

    engine.set_series(&raw_series()).expect("series");
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.annotation(id).is_some());
}

#[test]
fn empty_series_replacement_matches_clear() {
    let mut engine = engine();
    let summary = engine.set_series(&[]).expect("empty series");

    assert_eq!(summary.samples_len, 0);
    assert_eq!(engine.time_domain(), None);
    engine.pointer_move(300.0, 150.0).expect("pointer move");
    assert!(engine.hovered().is_none());
    assert_eq!(engine.click(300.0, 150.0).expect("click"), ClickOutcome::Ignored);
}

#[test]
fn set_samples_rejects_non_finite_and_sorts_input() {
    let mut engine = engine();
    let before = engine.samples().to_vec();

    let err = engine.set_samples(vec![Sample::new(0.0, 1.0), Sample::new(1.0, f64::NAN)]);
    assert!(err.is_err());
    assert!(engine.set_samples(vec![Sample::new(f64::INFINITY, 1.0)]).is_err());
    assert_eq!(engine.samples(), before.as_slice());

    engine
        .set_samples(vec![
            Sample::new(5.0, 150.0),
            Sample::new(1.0, 110.0),
            Sample::new(3.0, 130.0),
        ])
        .expect("samples");

    let times: Vec<f64> = engine.samples().iter().map(|sample| sample.time).collect();
    assert_eq!(times, vec![1.0, 3.0, 5.0]);
    assert_eq!(engine.time_domain().map(|d| d.as_tuple()), Some((1.0, 5.0)));
    assert_eq!(engine.price_domain().map(|d| d.as_tuple()), Some((0.0, 150.0)));
}
