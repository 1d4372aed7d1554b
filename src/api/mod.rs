//! Engine facade: owns chart state and turns input events into frames.

mod axis_ticks;
mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_coordinator;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod render_style;

pub use data_controller::SeriesSummary;
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use engine_snapshot::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
pub use interaction_coordinator::ClickOutcome;
pub use render_style::{
    AnnotationStyle, AxisStyle, BrushStyle, ChartStyle, GuideLineStyle, LineStyle, MarkerStyle,
    TooltipStyle,
};
