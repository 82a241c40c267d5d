//! Brace-delimited block extraction over a line sequence.
//!
//! This is a textual approximation, not a parser: braces inside string
//! literals and comments are counted like any other brace.

use crate::source::{SourceError, SourceLine};
use regex::Regex;

/// A contiguous run of lines captured after a trigger line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// Line after the trigger.
    pub start_line: usize,
    /// Line before the one that closed the block, or the trigger line itself
    /// when the body closed there.
    pub end_line: usize,
    /// Trigger text from the match onward, then the accumulated lines,
    /// newline-separated, up to the closing brace.
    pub text: String,
}

impl TextBlock {
    /// Returns true if the block text contains every needle.
    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.text.contains(n))
    }
}

/// Collects [`TextBlock`]s opened by a trigger pattern.
///
/// On a trigger at line `L`, text is accumulated from the match onward. The
/// first `{` after the match opens the body; from there the block closes at
/// the first `}` that outnumbers the `{` seen inside the body. The block is
/// numbered from `L + 1`, so a body spanning lines opens after its header. The
/// closing line is kept up to the unbalancing brace and the rest of it may
/// trigger the next block, as in `} catch (OtherException e) {`. A trigger
/// seen while a block is open is ignored. A block still open at end of input
/// is discarded.
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    trigger: Regex,
}

struct OpenBlock {
    start_line: usize,
    text: String,
    entered: bool,
    opened: usize,
    closed: usize,
}

impl BlockExtractor {
    /// Creates an extractor triggered by `trigger`.
    #[must_use]
    pub fn new(trigger: Regex) -> Self {
        Self { trigger }
    }

    /// The trigger pattern.
    #[must_use]
    pub fn trigger(&self) -> &Regex {
        &self.trigger
    }

    /// Drives `lines` to completion and returns every closed block.
    ///
    /// # Errors
    ///
    /// Propagates the first read error from `lines`.
    pub fn extract<I>(&self, lines: I) -> Result<Vec<TextBlock>, SourceError>
    where
        I: IntoIterator<Item = Result<SourceLine, SourceError>>,
    {
        let mut blocks = Vec::new();
        let mut open: Option<OpenBlock> = None;

        for line in lines {
            let line = line?;
            let mut offset = 0;

            loop {
                let rest = &line.text[offset..];
                if let Some(block) = open.as_mut() {
                    let Some(consumed) = block.feed(rest) else {
                        break;
                    };
                    offset += consumed;
                    if let Some(done) = open.take() {
                        let end_line = (line.number - 1).max(done.start_line - 1);
                        blocks.push(TextBlock {
                            start_line: done.start_line,
                            end_line,
                            text: done.text,
                        });
                    }
                } else if let Some(m) = self.trigger.find(rest) {
                    offset += m.start();
                    open = Some(OpenBlock::new(line.number + 1));
                } else {
                    break;
                }
            }
        }

        if let Some(block) = open {
            tracing::debug!(
                "Discarding unbalanced block starting at line {}",
                block.start_line
            );
        }

        Ok(blocks)
    }
}

impl OpenBlock {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            text: String::new(),
            entered: false,
            opened: 0,
            closed: 0,
        }
    }

    /// Appends `text`, stopping right after the brace that unbalances the
    /// body. Returns the number of bytes consumed if the block closed.
    fn feed(&mut self, text: &str) -> Option<usize> {
        for (idx, c) in text.char_indices() {
            match c {
                '{' if !self.entered => {
                    self.entered = true;
                    continue;
                }
                '{' => self.opened += 1,
                '}' if self.entered => self.closed += 1,
                _ => continue,
            }
            if self.closed > self.opened {
                self.text.push_str(&text[..=idx]);
                return Some(idx + 1);
            }
        }
        self.text.push_str(text);
        self.text.push('\n');
        None
    }
}
