//! XML output backend.

use std::io::Write;

use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::{OutputError, OutputResult, OutputSink};

/// Writes elements as indented XML.
///
/// An element is buffered until either a child is opened (it becomes a
/// start tag) or it is closed (it becomes an empty element `<x .../>`), so
/// attributes can be appended after `open_tag`.  A comment passed to
/// `close_tag` follows the element on its line.
pub struct XmlSink<W: Write> {
    writer:  Writer<W>,
    open:    Vec<String>,
    pending: Option<BytesStart<'static>>,
}

impl<W: Write> XmlSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer:  Writer::new_with_indent(inner, b' ', 4),
            open:    Vec::new(),
            pending: None,
        }
    }

    fn flush_pending(&mut self) -> OutputResult<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    /// Check that every element was closed and return the underlying writer.
    pub fn finish(self) -> OutputResult<W> {
        if !self.open.is_empty() {
            return Err(OutputError::UnclosedTags(self.open.len()));
        }
        Ok(self.writer.into_inner())
    }
}

impl<W: Write> OutputSink for XmlSink<W> {
    fn open_tag(&mut self, name: &str) -> OutputResult<()> {
        self.flush_pending()?;
        self.pending = Some(BytesStart::new(name.to_owned()));
        self.open.push(name.to_owned());
        Ok(())
    }

    fn write_attr(&mut self, name: &str, value: &str) -> OutputResult<()> {
        let start = self
            .pending
            .as_mut()
            .ok_or_else(|| OutputError::AttributeOutsideTag(name.to_owned()))?;
        start.push_attribute((name, value));
        Ok(())
    }

    fn close_tag(&mut self, comment: Option<&str>) -> OutputResult<()> {
        let name = self.open.pop().ok_or(OutputError::NoOpenTag)?;
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }
        // Trails the element on the same line; `--` is not allowed inside.
        if let Some(comment) = comment {
            let masked = escape(comment).replace("--", "&#45;&#45;");
            write!(self.writer.get_mut(), " <!-- {masked} -->")?;
        }
        Ok(())
    }
}
