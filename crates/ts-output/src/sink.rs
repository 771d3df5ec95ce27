//! The `OutputSink` trait and an in-memory implementation.

use crate::{OutputError, OutputResult};

/// A structured writer with open-tag / attribute / close-tag semantics.
///
/// Attributes belong to the most recently opened element and must be
/// written before any child element is opened.
pub trait OutputSink {
    /// Start a new element named `name`, nested in the current one.
    fn open_tag(&mut self, name: &str) -> OutputResult<()>;

    /// Add an attribute to the element opened last.
    fn write_attr(&mut self, name: &str, value: &str) -> OutputResult<()>;

    /// Close the innermost element, optionally followed by a comment.
    fn close_tag(&mut self, comment: Option<&str>) -> OutputResult<()>;
}

// ── TagRecorder ───────────────────────────────────────────────────────────────

/// One element captured by [`TagRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTag {
    pub name:    String,
    /// Attributes in the order they were written.
    pub attrs:   Vec<(String, String)>,
    pub comment: Option<String>,
    /// Nesting depth; top-level elements are 0.
    pub depth:   usize,
}

impl RecordedTag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attr_names(&self) -> Vec<&str> {
        self.attrs.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// An [`OutputSink`] that keeps every element in memory, in document order.
#[derive(Debug, Default)]
pub struct TagRecorder {
    tags: Vec<RecordedTag>,
    /// Indices into `tags` of the currently open elements.
    open: Vec<usize>,
}

impl TagRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[RecordedTag] {
        &self.tags
    }

    pub fn is_balanced(&self) -> bool {
        self.open.is_empty()
    }
}

impl OutputSink for TagRecorder {
    fn open_tag(&mut self, name: &str) -> OutputResult<()> {
        self.tags.push(RecordedTag {
            name:    name.to_owned(),
            attrs:   Vec::new(),
            comment: None,
            depth:   self.open.len(),
        });
        self.open.push(self.tags.len() - 1);
        Ok(())
    }

    fn write_attr(&mut self, name: &str, value: &str) -> OutputResult<()> {
        let idx = *self
            .open
            .last()
            .ok_or_else(|| OutputError::AttributeOutsideTag(name.to_owned()))?;
        // Only the element opened last, and only before it got children.
        if idx != self.tags.len() - 1 {
            return Err(OutputError::AttributeOutsideTag(name.to_owned()));
        }
        self.tags[idx].attrs.push((name.to_owned(), value.to_owned()));
        Ok(())
    }

    fn close_tag(&mut self, comment: Option<&str>) -> OutputResult<()> {
        let idx = self.open.pop().ok_or(OutputError::NoOpenTag)?;
        self.tags[idx].comment = comment.map(str::to_owned);
        Ok(())
    }
}
