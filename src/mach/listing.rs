use super::{compile, Program};
use crate::error;
use crate::lang::{Error, Line};
use std::sync::Arc;

pub const MAX_LINE_LEN: usize = 1024;

/// ## Editable source text
///
/// Lines are checked as they are added so mistakes surface at entry.
/// Labels are only cross checked when the whole listing compiles.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: Arc<Vec<String>>,
}

impl Listing {
    pub fn clear(&mut self) {
        self.source = Arc::default();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// 1 based, like error line numbers.
    pub fn line(&self, number: usize) -> Option<&str> {
        match number {
            0 => None,
            n => self.source.get(n - 1).map(String::as_str),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.iter().map(String::as_str)
    }

    /// Append one line of source.
    pub fn push(&mut self, line: &str) -> Result<(), Error> {
        let number = self.source.len() + 1;
        if line.len() > MAX_LINE_LEN {
            return Err(error!(TokenizerError, Some(number); "LINE TOO LONG"));
        }
        Line::new(number, line)?;
        Arc::make_mut(&mut self.source).push(line.trim_end().to_string());
        Ok(())
    }

    pub fn compile(&self) -> Result<Program, Error> {
        compile(self.source.iter())
    }
}
