use memchr::memchr;
use tracing::trace;

use crate::Result;
use crate::tag::{EXTM3U, Tag};

/// A classified, non-blank playlist line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Tag(Tag<'a>),
    /// A segment reference, as written
    Uri(&'a str),
}

/// Iterator over the logical lines of a playlist document.
///
/// Blank lines, comments, unknown tags and the `#EXTM3U` header produce no item.
pub struct Lines<'a> {
    remaining: &'a str,
    line_number: usize,
}

impl<'a> Lines<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            remaining: input.strip_prefix('\u{feff}').unwrap_or(input),
            line_number: 0,
        }
    }

    /// 1-based number of the last line read.
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        if self.remaining.is_empty() {
            return None;
        }

        let line = match memchr(b'\n', self.remaining.as_bytes()) {
            Some(pos) => {
                let line = &self.remaining[..pos];
                self.remaining = &self.remaining[pos + 1..];
                line
            }
            None => std::mem::take(&mut self.remaining),
        };
        self.line_number += 1;

        // Handles CRLF line endings as well
        Some(line.trim())
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<Line<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.next_raw()?;
            if line.is_empty() {
                continue;
            }

            if !line.starts_with('#') {
                return Some(Ok(Line::Uri(line)));
            }

            match Tag::parse(line) {
                Ok(Some(Tag::Header)) => continue,
                Ok(Some(tag)) => return Some(Ok(Line::Tag(tag))),
                Ok(None) => {
                    trace!(line_number = self.line_number, "Ignoring line: {line}");
                    continue;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Whether the first non-blank line of `input` is the `#EXTM3U` header.
pub fn has_header(input: &str) -> bool {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    input
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line == EXTM3U)
}
