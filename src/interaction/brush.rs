use serde::{Deserialize, Serialize};

use crate::core::{Domain, ScreenPoint, ViewProjection};
use crate::error::ChartResult;

/// Drag rectangle in plot-local screen pixels, corners in gesture order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSelection {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushSelection {
    #[must_use]
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            x0: a.x,
            y0: a.y,
            x1: b.x,
            y1: b.y,
        }
    }

    /// Same rectangle with `x0 <= x1` and `y0 <= y1`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    /// A rectangle without positive area is degenerate whatever the
    /// epsilon, so a zero epsilon still rejects single-axis drags.
    #[must_use]
    pub fn is_degenerate(self, epsilon_px: f64) -> bool {
        let (width, height) = (self.width(), self.height());
        !(width > 0.0 && height > 0.0) || width < epsilon_px || height < epsilon_px
    }

    /// Converts the rectangle into new time and price domains through the
    /// current view.
    pub fn to_domains(self, view: ViewProjection) -> ChartResult<DomainCommit> {
        let rect = self.normalized();
        let time = Domain::new(view.x_to_time(rect.x0), view.x_to_time(rect.x1))?;
        let price = Domain::new(view.y_to_price(rect.y0), view.y_to_price(rect.y1))?;
        Ok(DomainCommit { time, price })
    }
}

/// New domains for both axes produced by a completed brush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainCommit {
    pub time: Domain,
    pub price: Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum BrushPhase {
    #[default]
    Idle,
    Dragging {
        origin: ScreenPoint,
        current: ScreenPoint,
    },
}

/// `Idle -> Dragging` on pointer-down, back to `Idle` on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSelector {
    phase: BrushPhase,
    epsilon_px: f64,
}

impl Default for BrushSelector {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl BrushSelector {
    #[must_use]
    pub fn new(epsilon_px: f64) -> Self {
        Self {
            phase: BrushPhase::Idle,
            epsilon_px,
        }
    }

    #[must_use]
    pub fn phase(self) -> BrushPhase {
        self.phase
    }

    #[must_use]
    pub fn epsilon_px(self) -> f64 {
        self.epsilon_px
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self.phase, BrushPhase::Dragging { .. })
    }

    /// Starts a drag; restarting while dragging moves the origin.
    pub fn begin(&mut self, point: ScreenPoint) {
        self.phase = BrushPhase::Dragging {
            origin: point,
            current: point,
        };
    }

    /// Moves the free corner. Returns `false` when idle.
    pub fn update(&mut self, point: ScreenPoint) -> bool {
        match &mut self.phase {
            BrushPhase::Dragging { current, .. } => {
                *current = point;
                true
            }
            BrushPhase::Idle => false,
        }
    }

    /// Ends the drag and returns the selection when it is large enough.
    ///
    /// The selector is idle afterwards in every case.
    pub fn end(&mut self, point: ScreenPoint) -> Option<BrushSelection> {
        let BrushPhase::Dragging { origin, .. } = self.phase else {
            return None;
        };
        self.phase = BrushPhase::Idle;
        let selection = BrushSelection::from_corners(origin, point);
        (!selection.is_degenerate(self.epsilon_px)).then_some(selection)
    }

    pub fn cancel(&mut self) {
        self.phase = BrushPhase::Idle;
    }

    /// Rectangle currently being dragged, for drawing the selection.
    #[must_use]
    pub fn selection(self) -> Option<BrushSelection> {
        match self.phase {
            BrushPhase::Dragging { origin, current } => {
                Some(BrushSelection::from_corners(origin, current))
            }
            BrushPhase::Idle => None,
        }
    }
}
