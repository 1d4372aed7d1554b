pub mod label_format;
pub mod line_series;
pub mod lookup;
pub mod price_scale;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod types;

pub use label_format::{PriceLabelFormat, TimeLabelFormat};
pub use line_series::{ClipRect, LineSegment, clip_segment, project_line_segments};
pub use lookup::{InterpolatedPrice, interpolate_price, nearest_sample, nearest_sample_index};
pub use price_scale::{PriceAutoscale, PriceScale};
pub use projection::{Transform, ViewProjection};
pub use scale::{Domain, LinearScale, PixelRange};
pub use series::{ResolvedSeries, price_extent, resolve_series, time_extent};
pub use time_scale::TimeScale;
pub use types::{Margins, PlotArea, RawSample, Sample, ScreenPoint, Viewport};
