use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatermarkError {
    #[error("image could not be decoded: {0}")]
    MalformedImage(String),

    #[error("image too small for marking: {rows}x{cols} (minimum {min}x{min})")]
    ImageTooSmall {
        rows: usize,
        cols: usize,
        min: usize,
    },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("image encoding failed: {0}")]
    ImageEncode(String),
}

pub type Result<T> = std::result::Result<T, WatermarkError>;
