//! Hover and frozen point annotations.
//!
//! Annotations store domain-space `(time, price)` only; screen positions are
//! derived from the current view on every reprojection.

mod id;
mod manager;

pub use id::AnnotationId;
pub use manager::{Annotation, AnnotationLabel, AnnotationManager};
