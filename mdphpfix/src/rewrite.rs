//! Byte-range safe text rewriter.
//!
//! Collects edits against a source document and applies them in one pass,
//! validating that no two edits overlap and that every edit stays in bounds.
//!
//! # Usage
//!
//! ```
//! use mdphpfix::rewrite::{Edit, TextRewriter};
//!
//! let mut rewriter = TextRewriter::new("hello world");
//! rewriter.add_edit(Edit::replace(0, 5, "hi"));
//! assert_eq!(rewriter.apply().unwrap(), "hi world");
//! ```

use thiserror::Error;

/// A single edit operation against a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Replacement text.
    pub replacement: String,
}

impl Edit {
    /// Creates a replacement edit.
    #[must_use]
    pub fn replace(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    /// Creates an insertion edit (zero-width range, inserts before `position`).
    #[must_use]
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self::replace(position, position, content)
    }

    /// Checks if this edit's byte range overlaps another's.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Error raised when a batch of edits cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Two edits cover overlapping byte ranges.
    #[error("overlapping edits at indices {0} and {1}")]
    OverlappingEdits(usize, usize),
    /// An edit extends past the end of the source.
    #[error("edit {index} ends at byte {end} but the source is {len} bytes long")]
    OutOfBounds {
        /// Index of the offending edit.
        index: usize,
        /// End byte of the offending edit.
        end: usize,
        /// Length of the source in bytes.
        len: usize,
    },
}

/// Applies a batch of edits to a document in a single pass.
///
/// Edits are applied in reverse start order so earlier byte offsets stay
/// valid while the string is spliced.
#[derive(Debug, Clone)]
pub struct TextRewriter {
    source: String,
    edits: Vec<Edit>,
}

impl TextRewriter {
    /// Creates a new rewriter for the given source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Queues an edit.
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Returns true if any edits are pending.
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Validates pending edits without applying them.
    ///
    /// # Errors
    /// Returns an error if edits overlap or run out of bounds.
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.end > self.source.len() {
                return Err(RewriteError::OutOfBounds {
                    index: i,
                    end: edit.end,
                    len: self.source.len(),
                });
            }
        }

        for i in 0..self.edits.len() {
            for j in (i + 1)..self.edits.len() {
                if self.edits[i].overlaps(&self.edits[j]) {
                    return Err(RewriteError::OverlappingEdits(i, j));
                }
            }
        }

        Ok(())
    }

    /// Applies all pending edits and returns the modified source.
    ///
    /// # Errors
    /// Returns an error if edits overlap or run out of bounds.
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut edits = self.edits;
        edits.sort_by(|a, b| b.start.cmp(&a.start));

        for edit in edits {
            result.replace_range(edit.start..edit.end, &edit.replacement);
        }

        Ok(result)
    }
}
