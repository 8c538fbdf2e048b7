use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("sample series must not be empty")]
    EmptySeries,

    #[error("sample series is not sorted ascending by timestamp at index {index}")]
    UnsortedSeries { index: usize },

    #[error("sample at index {index} has a non-finite timestamp or value")]
    NonFiniteSample { index: usize },

    #[error("no chart has been created on this host yet")]
    NoChart,
}
