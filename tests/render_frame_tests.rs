use price_chart::annotation::AnnotationId;
use price_chart::api::{ChartEngine, ChartEngineConfig, ClickOutcome};
use price_chart::core::{PlotArea, RawSample};
use price_chart::render::{Color, LinePrimitive, NullRenderer};

const EPSILON: f64 = 1e-6;

fn engine() -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default())
        .expect("engine init");
    let raw: Vec<RawSample> = (0..40)
        .map(|i| RawSample::unix(i * 60, Some(100.0 + (i % 7) as f64 * 3.0)))
        .collect();
    engine.set_series(&raw).expect("series");
    engine
}

fn freeze_at(engine: &mut ChartEngine<NullRenderer>, time: f64) -> AnnotationId {
    let view = engine.view().expect("view");
    let x = engine.plot_area().left + view.time_to_x(time);
    engine.pointer_move(x, 200.0).expect("pointer move");
    match engine.click(x, 200.0).expect("click") {
        ClickOutcome::Frozen(id) => id,
        other => panic!("expected a frozen annotation, got {other:?}"),
    }
}

fn inside_plot(plot: PlotArea, line: &LinePrimitive) -> bool {
    let xs = plot.left - EPSILON..=plot.right() + EPSILON;
    let ys = plot.top - EPSILON..=plot.bottom() + EPSILON;
    xs.contains(&line.x1) && xs.contains(&line.x2) && ys.contains(&line.y1) && ys.contains(&line.y2)
}

#[test]
fn empty_engine_draws_axes_only() {
    let engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default())
        .expect("engine init");
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.lines.len(), 2);
    assert!(frame.texts.is_empty());
    assert!(frame.annotations.is_empty());
}

#[test]
fn loaded_series_draws_line_and_tick_labels() {
    let engine = engine();
    let frame = engine.build_render_frame().expect("frame");
    let line_color = engine.config().style.line.color;

    assert_eq!(
        frame.lines.iter().filter(|line| line.color == line_color).count(),
        39
    );
    assert!(frame.texts.iter().any(|text| text.text == "$100"));
    assert!(frame.texts.iter().any(|text| text.text == "1970-01-01"));
}

#[test]
fn zoomed_series_is_clipped_to_plot() {
    let mut engine = engine();
    engine.pinch(300.0, 150.0, 4.0).expect("pinch");
    engine.pan(-120.0, 35.0).expect("pan");

    let frame = engine.build_render_frame().expect("frame");
    let plot = engine.plot_area();
    let line_color = engine.config().style.line.color;
    let series: Vec<_> = frame
        .lines
        .iter()
        .filter(|line| line.color == line_color)
        .collect();

    assert!(!series.is_empty());
    assert!(series.iter().all(|line| inside_plot(plot, line)));
}

#[test]
fn frozen_annotation_has_purple_marker_and_vertical_guide() {
    let mut engine = engine();
    let id = freeze_at(&mut engine, 600.0);
    engine.pointer_leave().expect("leave");

    let frame = engine.build_render_frame().expect("frame");
    let visual = frame.annotation(id).expect("frozen visual");
    let plot = engine.plot_area();

    assert!(visual.frozen);
    assert_eq!(visual.marker.fill_color, Color::rgb(0.5, 0.0, 0.5));
    assert_eq!(visual.guide.x1, visual.marker.cx);
    assert_eq!(visual.guide.x2, visual.marker.cx);
    assert_eq!((visual.guide.y1, visual.guide.y2), (plot.top, plot.bottom()));
    assert_eq!(visual.tooltip_lines.len(), 2);
    assert!(visual.tooltip_lines[0].text.starts_with("Date: "));
    assert!(visual.tooltip_lines[1].text.starts_with("Price: $"));
}

#[test]
fn hover_and_frozen_visuals_coexist() {
    let mut engine = engine();
    freeze_at(&mut engine, 600.0);

    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.annotations.len(), 2);
    assert_eq!(frame.annotations.iter().filter(|v| v.frozen).count(), 1);
    let hover = frame.annotations.iter().find(|v| !v.frozen).expect("hover visual");
    assert_eq!(hover.marker.fill_color, Color::rgb(0.0, 0.0, 0.0));
}

#[test]
fn dismissed_annotation_leaves_no_visual() {
    let mut engine = engine();
    let id = freeze_at(&mut engine, 600.0);
    engine.dismiss_annotation(id).expect("dismiss");

    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.annotation(id).is_none());
    assert!(frame.annotations.iter().all(|visual| !visual.frozen));
}

#[test]
fn brush_rect_is_drawn_while_dragging() {
    let mut engine = engine();
    engine.brush_start(100.0, 60.0).expect("brush start");
    engine.brush_move(250.0, 180.0).expect("brush move");

    let frame = engine.renderer().last_frame.clone().expect("rendered");
    assert_eq!(frame.rects.len(), 1);
    let rect = frame.rects[0];
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (100.0, 60.0, 150.0, 120.0));

    engine.brush_end(250.0, 180.0).expect("brush end");
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.rects.is_empty());
}

#[test]
fn zoomed_out_marker_is_clipped_then_restored() {
    let mut engine = engine();
    let id = freeze_at(&mut engine, 1_800.0);
    let plot = engine.plot_area();

    engine.pinch(plot.left, plot.top, 10.0).expect("pinch");
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.annotation(id).is_none());
    assert!(engine.frozen_annotation(id).is_some());

    engine.reset_view().expect("reset");
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.annotation(id).is_some());
}

#[test]
fn null_renderer_tracks_last_frame() {
    let mut engine = engine();
    freeze_at(&mut engine, 600.0);

    let renderer = engine.renderer();
    assert_eq!(renderer.last_annotation_count, 2);
    assert_eq!(renderer.last_frozen_count(), 1);
    assert_eq!(
        renderer.last_line_count,
        renderer.last_frame.as_ref().map_or(0, |frame| frame.lines.len())
    );
}
