use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PriceScale, RawSample, ResolvedSeries, Sample, TimeScale, resolve_series};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::ChartEngine;
use super::engine::AxisScales;

/// Counts reported after a series replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub samples_len: usize,
    pub dropped_malformed: usize,
    pub dropped_leading: usize,
    pub filled: usize,
}

impl From<&ResolvedSeries> for SeriesSummary {
    fn from(resolved: &ResolvedSeries) -> Self {
        Self {
            samples_len: resolved.samples.len(),
            dropped_malformed: resolved.dropped_malformed,
            dropped_leading: resolved.dropped_leading,
            filled: resolved.filled,
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the whole series with provider samples.
    ///
    /// Gaps are forward-filled before charting. Both domains are refitted to
    /// the data, the zoom transform and hover are reset, and frozen
    /// annotations are kept and reprojected.
    pub fn set_series(&mut self, raw: &[RawSample]) -> ChartResult<SeriesSummary> {
        let resolved = resolve_series(raw);
        let summary = SeriesSummary::from(&resolved);
        self.replace_samples(resolved.samples, summary)?;
        Ok(summary)
    }

    /// Replaces the series with already-resolved samples.
    ///
    /// Samples are stable-sorted by time; non-finite values are rejected.
    pub fn set_samples(&mut self, mut samples: Vec<Sample>) -> ChartResult<()> {
        if samples
            .iter()
            .any(|sample| !sample.time.is_finite() || !sample.price.is_finite())
        {
            return Err(ChartError::InvalidData(
                "sample time and price must be finite".to_owned(),
            ));
        }
        samples.sort_by(|left, right| left.time.total_cmp(&right.time));
        let summary = SeriesSummary {
            samples_len: samples.len(),
            ..SeriesSummary::default()
        };
        self.replace_samples(samples, summary)
    }

    /// Drops the series. Axes are still drawn; frozen annotations are kept.
    pub fn clear_series(&mut self) -> ChartResult<()> {
        self.replace_samples(Vec::new(), SeriesSummary::default())
    }

    fn replace_samples(&mut self, samples: Vec<Sample>, summary: SeriesSummary) -> ChartResult<()> {
        self.samples = samples;
        self.scales = self.fit_scales()?;
        self.transform.reset();
        self.brush.cancel();
        self.interaction.on_brush_end();
        self.hide_hover();
        self.reproject_annotations();

        debug!(
            samples_len = summary.samples_len,
            dropped_malformed = summary.dropped_malformed,
            dropped_leading = summary.dropped_leading,
            filled = summary.filled,
            "series replaced"
        );
        self.emit_plugin_event(PluginEvent::SeriesReplaced {
            samples_len: summary.samples_len,
            dropped_malformed: summary.dropped_malformed,
            dropped_leading: summary.dropped_leading,
        });
        self.render()
    }

    /// Scales fitted to the data extent, or `None` for an empty series.
    pub(super) fn fit_scales(&self) -> ChartResult<Option<AxisScales>> {
        let time = TimeScale::from_samples(&self.samples, self.plot.width)?;
        let price = PriceScale::from_samples(
            &self.samples,
            self.plot.height,
            self.config.price_autoscale,
        )?;
        Ok(time.zip(price).map(|(time, price)| AxisScales { time, price }))
    }
}
