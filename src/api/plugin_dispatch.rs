use crate::extensions::{PluginContext, PluginEvent};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.config.viewport,
            time_domain: self.time_domain().map(|domain| domain.as_tuple()),
            price_domain: self.price_domain().map(|domain| domain.as_tuple()),
            transform: self.transform(),
            samples_len: self.samples.len(),
            frozen_annotations_len: self.annotations.frozen_len(),
            interaction_mode: self.interaction.mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
