use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unsupported {kind} mode: `{value}`")]
    UnsupportedMode { kind: &'static str, value: String },

    #[error("dataset index {index} out of range (datasets: {len})")]
    DatasetIndexOutOfRange { index: usize, len: usize },
}
