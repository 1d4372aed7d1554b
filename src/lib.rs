//! price-chart-rs: headless interactive price-chart engine.
//!
//! The crate maps a time/price series onto a plot area, answers hover
//! lookups under a pointer, applies wheel/pinch zoom and brush rezoom, and
//! keeps click-frozen annotations attached to their data points across view
//! changes. Drawing is delegated to a `render::Renderer`.

pub mod annotation;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
