use std::{io, path::PathBuf};

use thiserror::Error;

/// A file could not be turned into a buffer.
#[derive(Debug, Error)]
#[error("cannot load {}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum EditorError {
    /// The editor loop that owns the receiving end has gone away.
    #[error("editor is no longer accepting {0}")]
    Disconnected(&'static str),
    #[error("unable to start input thread: {0}")]
    Spawn(#[source] io::Error),
    #[error(transparent)]
    Screen(#[from] anyhow::Error),
}
