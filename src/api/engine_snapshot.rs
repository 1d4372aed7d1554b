use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::core::{Domain, Margins, PlotArea, Transform, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverMode, InteractionMode};
use crate::render::Renderer;

use super::ChartEngine;

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Deterministic view of engine state for regression fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub margins: Margins,
    pub plot: PlotArea,
    pub time_domain: Option<Domain>,
    pub price_domain: Option<Domain>,
    pub transform: Transform,
    pub interaction_mode: InteractionMode,
    pub hover_mode: HoverMode,
    pub samples_len: usize,
    pub hover: Option<Annotation>,
    pub frozen: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<EngineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            viewport: self.config.viewport,
            margins: self.config.margins,
            plot: self.plot,
            time_domain: self.time_domain(),
            price_domain: self.price_domain(),
            transform: self.transform(),
            interaction_mode: self.interaction.mode(),
            hover_mode: self.interaction.hover_mode(),
            samples_len: self.samples.len(),
            hover: self.annotations.hover().cloned(),
            frozen: self.annotations.frozen().cloned().collect(),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
