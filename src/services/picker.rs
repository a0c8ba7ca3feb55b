//! Choosing the output directory.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::SessionError;

/// Source of the directory generated files are written to.
///
/// `Ok(None)` means the user cancelled; callers treat that as a silent no-op.
pub trait DirectoryPicker {
    fn pick_directory(&mut self) -> Result<Option<PathBuf>, SessionError>;
}

/// Always answers with the same directory (or always cancels).
#[derive(Debug, Clone, Default)]
pub struct FixedDirectory {
    dir: Option<PathBuf>,
}

impl FixedDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// A picker the user always cancels.
    pub fn cancelled() -> Self {
        Self { dir: None }
    }
}

impl DirectoryPicker for FixedDirectory {
    fn pick_directory(&mut self) -> Result<Option<PathBuf>, SessionError> {
        Ok(self.dir.clone())
    }
}

/// Asks for a directory on a line-based terminal. An empty answer cancels.
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptPicker<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr, read from stdin.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> DirectoryPicker for PromptPicker<R, W> {
    fn pick_directory(&mut self) -> Result<Option<PathBuf>, SessionError> {
        write!(self.output, "Output directory (empty to cancel): ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(answer)))
    }
}
