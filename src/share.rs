use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

pub const SHARING_NOT_AVAILABLE: &str = "Sharing not available";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("no sharing surface is available")]
    Unavailable,

    #[error("failed to write share file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Somewhere a text summary can be handed off to.
pub trait ShareSurface {
    fn share(&mut self, message: &str) -> Result<(), ShareError>;
}

pub fn share_message(units_sold: u64, revenue: u64) -> String {
    format!("I've sold {units_sold} desserts for a total of ${revenue} #DessertClicker")
}

/// Used when nothing is configured to receive shares.
#[derive(Debug, Default)]
pub struct NoShare;

impl ShareSurface for NoShare {
    fn share(&mut self, _message: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }
}

/// Appends each shared message as a line to a file.
#[derive(Debug)]
pub struct FileShare {
    path: PathBuf,
}

impl FileShare {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ShareSurface for FileShare {
    fn share(&mut self, message: &str) -> Result<(), ShareError> {
        let io_err = |source| ShareError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{message}").map_err(io_err)
    }
}
