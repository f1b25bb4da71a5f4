use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CockpitError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to open window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel buffer error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("failed to read font {path}: {source}")]
    FontIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a usable TrueType/OpenType font")]
    InvalidFont(PathBuf),
}

pub type Result<T> = std::result::Result<T, CockpitError>;
