use std::fmt;

/// An error produced while lexing or parsing a document.
///
/// Every error is constructed in one piece: the message, the offending
/// source text, and the byte offset that text starts at. Callers never
/// amend an error after the fact, so the fields stay read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    message: String,
    data: String,
    index: usize,
}

impl Error {
    /// Create an error for the source text `data` starting at byte `index`.
    pub fn new(message: impl Into<String>, data: impl Into<String>, index: usize) -> Self {
        Self {
            message: message.into(),
            data: data.into(),
            index,
        }
    }

    /// The error's message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The source text the error applies to.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The byte offset the error starts at.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at index {}", self.message, self.index)?;
        if !self.data.is_empty() {
            write!(f, ": `{}`", self.data)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
