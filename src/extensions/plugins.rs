use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationId;
use crate::core::{Transform, Viewport};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    /// `None` while no series is loaded.
    pub time_domain: Option<(f64, f64)>,
    pub price_domain: Option<(f64, f64)>,
    pub transform: Transform,
    pub samples_len: usize,
    pub frozen_annotations_len: usize,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
///
/// `DomainCommitted` carries the new view range and is the hook a host uses
/// to refetch a narrower or wider series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    SeriesReplaced {
        samples_len: usize,
        dropped_malformed: usize,
        dropped_leading: usize,
    },
    HoverUpdated { time: f64, price: f64 },
    HoverCleared,
    AnnotationFrozen { id: AnnotationId, time: f64, price: f64 },
    AnnotationDismissed { id: AnnotationId },
    TransformChanged { transform: Transform },
    DomainCommitted { time: (f64, f64), price: (f64, f64) },
    ViewReset,
    Rendered,
}

/// Observer interface for host-side logic.
///
/// Plugins see events and read engine context without mutating engine state.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
