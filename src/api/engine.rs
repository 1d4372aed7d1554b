use crate::annotation::{Annotation, AnnotationId, AnnotationManager};
use crate::core::{
    Domain, PlotArea, PriceLabelFormat, PriceScale, Sample, TimeLabelFormat, TimeScale, Transform,
    ViewProjection, Viewport,
};
use crate::error::ChartResult;
use crate::extensions::ChartPlugin;
use crate::interaction::{
    BrushSelector, HoverPoint, InteractionMode, InteractionState, TransformState,
};
use crate::render::Renderer;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::ChartEngineConfig;

/// Both axis scales, present once a non-empty series is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct AxisScales {
    pub(super) time: TimeScale,
    pub(super) price: PriceScale,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the scales, the zoom transform, the brush, the
/// annotation set and the renderer. Every input runs to completion and ends
/// with exactly one render pass.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) plot: PlotArea,
    pub(super) samples: Vec<Sample>,
    pub(super) scales: Option<AxisScales>,
    pub(super) transform: TransformState,
    pub(super) brush: BrushSelector,
    pub(super) interaction: InteractionState,
    pub(super) annotations: AnnotationManager,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no series loaded.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let plot = config.validate()?;
        let transform = TransformState::new(config.zoom_limits)?;
        let mut interaction = InteractionState::default();
        interaction.set_hover_mode(config.hover_mode);
        let annotations = AnnotationManager::new(
            config.time_label_format.clone(),
            config.price_label_format.clone(),
        );

        Ok(Self {
            renderer,
            brush: BrushSelector::new(config.brush_epsilon_px),
            config,
            plot,
            samples: Vec::new(),
            scales: None,
            transform,
            interaction,
            annotations,
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    /// Resolved samples currently charted.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Stored time domain; `None` while no series is loaded.
    #[must_use]
    pub fn time_domain(&self) -> Option<Domain> {
        self.scales.map(|scales| scales.time.domain())
    }

    #[must_use]
    pub fn price_domain(&self) -> Option<Domain> {
        self.scales.map(|scales| scales.price.domain())
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform.transform()
    }

    /// Scales composed with the current transform.
    #[must_use]
    pub fn view(&self) -> Option<ViewProjection> {
        self.scales
            .map(|scales| ViewProjection::new(scales.time, scales.price, self.transform()))
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Point under the pointer as of the last pointer event.
    #[must_use]
    pub fn hovered(&self) -> Option<HoverPoint> {
        self.interaction.hovered()
    }

    /// Visible hover annotation, if any.
    #[must_use]
    pub fn hover_annotation(&self) -> Option<&Annotation> {
        self.annotations.hover()
    }

    /// Frozen annotations in creation order.
    pub fn frozen_annotations(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.annotations.frozen()
    }

    #[must_use]
    pub fn frozen_annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    /// Switches tooltip label formats and relabels existing annotations.
    pub fn set_label_formats(
        &mut self,
        time_format: TimeLabelFormat,
        price_format: PriceLabelFormat,
    ) -> ChartResult<()> {
        time_format.validate()?;
        price_format.validate()?;
        self.annotations
            .set_formats(time_format.clone(), price_format.clone());
        self.config.time_label_format = time_format;
        self.config.price_label_format = price_format;
        self.render()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Renders the frame into an external cairo context, for toolkit draw
    /// callbacks that own the surface.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }
}
