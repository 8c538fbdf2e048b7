pub mod line_series;
pub mod nearest;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use line_series::{
    PairBand, PathPoint, pair_band_at_x, path_length, project_line_path, project_pair_bands,
};
pub use nearest::{NearestHit, NearestPointIndex};
pub use primitives::{datetime_to_unix_seconds, decimal_to_f64, unix_seconds_to_datetime};
pub use scale::LinearScale;
pub use series::SampleSeries;
pub use time_scale::TimeScale;
pub use types::{CanvasSize, Margin, Sample, Viewport};
pub use value_scale::ValueScale;
