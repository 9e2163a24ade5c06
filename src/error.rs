use std::path::PathBuf;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("failed to read font `{}`: {source}", path.display())]
    FontIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font `{}`: {reason}", path.display())]
    FontFormat { path: PathBuf, reason: String },

    #[error("backend error: {0}")]
    Backend(String),
}
