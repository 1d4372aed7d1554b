//! Observer hooks for host applications.

mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
