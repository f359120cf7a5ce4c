use std::io::Write;
use std::path::PathBuf;

use crate::error::ShareError;

/// External sink for receipt text.
pub trait ShareSurface {
    fn share(&self, text: &str) -> Result<(), ShareError>;
}

/// Prints the receipt to standard output.
#[derive(Debug, Default)]
pub struct StdoutShare;

impl ShareSurface for StdoutShare {
    fn share(&self, text: &str) -> Result<(), ShareError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }
}

/// Writes the receipt to a file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct FileShare {
    pub path: PathBuf,
}

impl ShareSurface for FileShare {
    fn share(&self, text: &str) -> Result<(), ShareError> {
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
