use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{PriceLabelFormat, ScreenPoint, TimeLabelFormat, ViewProjection};

use super::AnnotationId;

/// Tooltip text handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationLabel {
    pub date: String,
    pub price: String,
}

/// A point annotation. `time`/`price` are domain values and never change
/// after creation; `screen` is recomputed on every reprojection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub time: f64,
    pub price: f64,
    pub frozen: bool,
    /// Plot-local pixel position of the marker.
    pub screen: ScreenPoint,
    pub label: AnnotationLabel,
}

/// Owns the single hover annotation and every frozen annotation.
#[derive(Debug, Clone, Default)]
pub struct AnnotationManager {
    hover: Option<Annotation>,
    hover_visible: bool,
    frozen: IndexMap<AnnotationId, Annotation>,
    time_format: TimeLabelFormat,
    price_format: PriceLabelFormat,
}

impl AnnotationManager {
    #[must_use]
    pub fn new(time_format: TimeLabelFormat, price_format: PriceLabelFormat) -> Self {
        Self {
            time_format,
            price_format,
            ..Self::default()
        }
    }

    /// Replaces the hover annotation's content and position.
    ///
    /// A missing price (no bracketing interpolation) or non-finite input
    /// hides the hover instead. Returns whether the hover is visible.
    pub fn update_hover(
        &mut self,
        time: f64,
        price: Option<f64>,
        screen_x: f64,
        screen_y: f64,
    ) -> bool {
        let screen = ScreenPoint::new(screen_x, screen_y);
        let Some(price) = price.filter(|price| price.is_finite()) else {
            self.clear_hover();
            return false;
        };
        if !time.is_finite() || !screen.is_finite() {
            self.clear_hover();
            return false;
        }

        let label = self.label_for(time, price);
        match &mut self.hover {
            Some(hover) => {
                hover.time = time;
                hover.price = price;
                hover.screen = screen;
                hover.label = label;
            }
            None => {
                self.hover = Some(Annotation {
                    id: AnnotationId::generate(),
                    time,
                    price,
                    frozen: false,
                    screen,
                    label,
                });
            }
        }
        self.hover_visible = true;
        trace!(time, price, "hover updated");
        true
    }

    /// Hides the hover visuals. The hover state object is kept.
    ///
    /// Returns `true` if the hover was visible before the call.
    pub fn clear_hover(&mut self) -> bool {
        std::mem::replace(&mut self.hover_visible, false)
    }

    /// Visible hover annotation, if any.
    #[must_use]
    pub fn hover(&self) -> Option<&Annotation> {
        self.hover.as_ref().filter(|_| self.hover_visible)
    }

    #[must_use]
    pub fn is_hover_visible(&self) -> bool {
        self.hover_visible && self.hover.is_some()
    }

    /// Persists a new annotation at the given domain point.
    pub fn freeze(&mut self, time: f64, price: f64, screen_x: f64, screen_y: f64) -> AnnotationId {
        let id = AnnotationId::generate();
        let annotation = Annotation {
            id,
            time,
            price,
            frozen: true,
            screen: ScreenPoint::new(screen_x, screen_y),
            label: self.label_for(time, price),
        };
        let previous = self.frozen.insert(id, annotation);
        debug_assert!(previous.is_none(), "annotation id collision: {id}");
        debug!(%id, time, price, frozen_count = self.frozen.len(), "annotation frozen");
        id
    }

    /// Removes every part of the annotation with `id`. Unknown ids are a no-op.
    pub fn dismiss(&mut self, id: AnnotationId) -> Option<Annotation> {
        let removed = self.frozen.shift_remove(&id);
        if removed.is_some() {
            debug!(%id, frozen_count = self.frozen.len(), "annotation dismissed");
        }
        removed
    }

    /// Recomputes screen positions from stored domain values.
    pub fn reproject_all(&mut self, view: &ViewProjection) {
        for annotation in self.frozen.values_mut() {
            annotation.screen = view.to_screen(annotation.time, annotation.price);
        }
        if let Some(hover) = &mut self.hover {
            hover.screen = view.to_screen(hover.time, hover.price);
        }
        trace!(frozen_count = self.frozen.len(), "annotations reprojected");
    }

    /// Topmost frozen annotation whose marker lies within `radius_px` of `point`.
    #[must_use]
    pub fn hit_test_marker(&self, point: ScreenPoint, radius_px: f64) -> Option<AnnotationId> {
        self.frozen
            .values()
            .rev()
            .find(|annotation| annotation.screen.distance_to(point) <= radius_px)
            .map(|annotation| annotation.id)
    }

    /// Frozen annotations in creation order.
    pub fn frozen(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.frozen.values()
    }

    #[must_use]
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.frozen.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: AnnotationId) -> bool {
        self.frozen.contains_key(&id)
    }

    #[must_use]
    pub fn frozen_len(&self) -> usize {
        self.frozen.len()
    }

    /// Switches label formats and relabels every annotation.
    pub fn set_formats(&mut self, time_format: TimeLabelFormat, price_format: PriceLabelFormat) {
        self.time_format = time_format;
        self.price_format = price_format;
        for annotation in self.frozen.values_mut() {
            annotation.label = make_label(&self.time_format, &self.price_format, annotation);
        }
        if let Some(hover) = &mut self.hover {
            hover.label = make_label(&self.time_format, &self.price_format, hover);
        }
    }

    fn label_for(&self, time: f64, price: f64) -> AnnotationLabel {
        AnnotationLabel {
            date: self.time_format.format(time),
            price: self.price_format.format(price),
        }
    }
}

fn make_label(
    time_format: &TimeLabelFormat,
    price_format: &PriceLabelFormat,
    annotation: &Annotation,
) -> AnnotationLabel {
    AnnotationLabel {
        date: time_format.format(annotation.time),
        price: price_format.format(annotation.price),
    }
}
