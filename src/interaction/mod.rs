mod brush;
mod transform;

pub use brush::{BrushPhase, BrushSelection, BrushSelector, DomainCommit};
pub use transform::{TransformState, ZoomLimits};

use serde::{Deserialize, Serialize};

use crate::core::{Sample, ScreenPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Brushing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverMode {
    /// Marker follows the pointer's time at the interpolated price.
    #[default]
    Interpolate,
    /// Marker snaps to the nearest sample.
    SnapToNearest,
    /// No hover annotation is shown.
    Hidden,
}

/// One user gesture, in viewport pixels.
///
/// The engine handles each input to completion before the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartInput {
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    Click { x: f64, y: f64 },
    /// Mouse wheel; positive `delta_y` zooms out.
    Wheel { x: f64, y: f64, delta_y: f64 },
    /// Pinch gesture with a multiplicative scale delta.
    Pinch { x: f64, y: f64, scale: f64 },
    Pan { dx: f64, dy: f64 },
    BrushStart { x: f64, y: f64 },
    BrushMove { x: f64, y: f64 },
    BrushEnd { x: f64, y: f64 },
    ResetView,
}

/// The point currently under the pointer, as read by the click handler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub time: f64,
    pub price: f64,
    pub nearest_index: usize,
    pub nearest: Sample,
    /// Plot-local pixel position of the hover marker.
    pub screen: ScreenPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    hover_mode: HoverMode,
    cursor: Option<ScreenPoint>,
    hovered: Option<HoverPoint>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            hover_mode: HoverMode::default(),
            cursor: None,
            hovered: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn hover_mode(self) -> HoverMode {
        self.hover_mode
    }

    pub fn set_hover_mode(&mut self, mode: HoverMode) {
        self.hover_mode = mode;
    }

    /// Last pointer position inside the viewport, plot-local.
    #[must_use]
    pub fn cursor(self) -> Option<ScreenPoint> {
        self.cursor
    }

    #[must_use]
    pub fn hovered(self) -> Option<HoverPoint> {
        self.hovered
    }

    pub fn on_pointer_move(&mut self, local: ScreenPoint) {
        self.cursor = Some(local);
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.hovered = None;
    }

    pub fn set_hovered(&mut self, hovered: Option<HoverPoint>) {
        self.hovered = hovered;
    }

    pub fn on_brush_start(&mut self) {
        self.mode = InteractionMode::Brushing;
    }

    pub fn on_brush_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
