use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("triangle has zero area")]
    DegenerateTriangle,
    #[error("bounding box {width}x{height} is empty")]
    EmptyBounds { width: i64, height: i64 },
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
}
