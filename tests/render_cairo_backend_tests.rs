#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use price_chart::ChartError;
use price_chart::api::{ChartEngine, ChartEngineConfig, ClickOutcome};
use price_chart::core::{RawSample, Viewport};
use price_chart::render::CairoRenderer;

fn series() -> Vec<RawSample> {
    vec![
        RawSample::unix(0, Some(10.0)),
        RawSample::unix(30, Some(20.0)),
        RawSample::unix(60, None),
        RawSample::unix(90, Some(15.0)),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_series_axes_and_annotations() {
    let renderer = CairoRenderer::new(900, 500).expect("renderer");
    let config = ChartEngineConfig::new(Viewport::new(900, 500));
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.set_series(&series()).expect("series");

    engine.pointer_move(300.0, 200.0).expect("pointer move");
    let outcome = engine.click(300.0, 200.0).expect("click");
    assert!(matches!(outcome, ClickOutcome::Frozen(_)));

    let expected = engine.build_render_frame().expect("frame");
    let renderer = engine.into_renderer();
    let stats = renderer.last_stats();

    assert_eq!(stats.lines_drawn, expected.lines.len());
    assert_eq!(stats.texts_drawn, expected.texts.len());
    assert_eq!(stats.annotations_drawn, 2);
    assert!(stats.lines_drawn >= 5);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(600, 320).expect("renderer");
    let config = ChartEngineConfig::new(Viewport::new(600, 320));
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.set_series(&series()).expect("series");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_on_cairo_context(&context)
        .expect("render on context");

    let renderer = engine.into_renderer();
    assert!(renderer.last_stats().lines_drawn >= 5);
}

#[test]
fn cairo_renderer_writes_png() {
    let mut renderer = CairoRenderer::new(320, 200).expect("renderer");
    renderer
        .set_clear_color(price_chart::render::Color::rgb(0.95, 0.95, 0.95))
        .expect("clear color");
    let mut engine =
        ChartEngine::new(renderer, ChartEngineConfig::new(Viewport::new(320, 200))).expect("engine");
    engine.set_series(&series()).expect("series");

    let mut bytes = Vec::new();
    engine.renderer().write_png(&mut bytes).expect("png");
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
