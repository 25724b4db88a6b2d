use std::path::{Path, PathBuf};

pub type PlaycardsResult<T> = Result<T, PlaycardsError>;

#[derive(thiserror::Error, Debug)]
pub enum PlaycardsError {
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("output target collision: '{}' already exists", .0.display())]
    OutputCollision(PathBuf),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("io error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaycardsError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn collision(path: impl Into<PathBuf>) -> Self {
        Self::OutputCollision(path.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Wrap an I/O failure with the operation and path it happened on.
    pub fn io(op: &str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            context: format!("{op} '{}'", path.display()),
            source,
        }
    }
}
