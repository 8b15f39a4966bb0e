use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;

pub type Result<T> = std::result::Result<T, AskError>;

/// Everything that can abort an invocation. The dispatcher prints the
/// message as a single `An error occurred: ...` line and exits nonzero.
#[derive(Debug, Error)]
pub enum AskError {
    /// Settings document absent, malformed, or a required key missing/empty.
    #[error("settings: {0}")]
    Config(String),

    /// Read or write failure on the context file.
    #[error("context file {}: {source}", path.display())]
    ContextIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Model open, tokenization, or decode-step failure.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The output sink rejected a streamed fragment.
    #[error("output stream: {0}")]
    Stream(#[from] io::Error),
}
