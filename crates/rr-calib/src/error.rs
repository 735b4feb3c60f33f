use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalibError {
    #[error("need at least {need} anchors to calibrate, got {got}")]
    InsufficientAnchors { got: usize, need: usize },

    #[error("anchor parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CalibResult<T> = Result<T, CalibError>;
