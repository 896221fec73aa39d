// Every variant states *where* things went wrong.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[error("camera init error: {0}")]
    CameraInit(String),

    #[error("camera frame error: {0}")]
    CameraFrame(String),

    #[error("background error: {message} ({path:?})")]
    Background { message: String, path: PathBuf },

    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}
