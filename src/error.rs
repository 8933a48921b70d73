use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("computation service returned HTTP status {status}")]
    Http { status: u16 },

    #[error("computation service unreachable: {0}")]
    Transport(String),

    #[error("failed to decode computation result: {0}")]
    Decode(String),
}
