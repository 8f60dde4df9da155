//! Fenced PHP block detection and `<?php` tag insertion.
//!
//! This is the core rewrite rule: every fenced block opened with
//! ```` ```php ```` and closed by the nearest following fence must have the
//! canonical `<?php` tag as its first non-blank content line. Blocks that
//! already carry the tag, blocks labeled with another language, and text
//! outside fences are left byte-identical.

use crate::constants::{FENCE_CLOSE, PHP_FENCE_OPEN, PHP_OPEN_TAG};
use crate::rewrite::{Edit, RewriteError, TextRewriter};

/// A fenced PHP block located within a document, as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhpBlock {
    /// Offset of the opening fence.
    pub start: usize,
    /// Offset one past the closing fence.
    pub end: usize,
    /// Offset where the block body begins (after the opening fence line).
    pub body_start: usize,
    /// Offset where the block body ends (start of the closing fence).
    pub body_end: usize,
}

impl PhpBlock {
    /// Returns the raw body text of this block.
    #[must_use]
    pub fn body<'a>(&self, content: &'a str) -> &'a str {
        &content[self.body_start..self.body_end]
    }

    /// Checks whether the body already begins with the canonical tag,
    /// ignoring surrounding whitespace.
    #[must_use]
    pub fn has_open_tag(&self, content: &str) -> bool {
        self.body(content).trim().starts_with(PHP_OPEN_TAG)
    }
}

/// Finds all non-overlapping fenced PHP blocks in a document.
///
/// Each block runs from a ```` ```php ```` fence to the nearest subsequent
/// closing fence, and the scan resumes after that closing fence. This keeps
/// matching non-greedy across the whole document: one block's body can never
/// swallow a later block's fence. An opening fence with no closing fence
/// before end of input is left unmatched.
#[must_use]
pub fn find_php_blocks(content: &str) -> Vec<PhpBlock> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(found) = content[pos..].find(PHP_FENCE_OPEN) {
        let start = pos + found;
        let body_start = start + PHP_FENCE_OPEN.len();

        // Unterminated block: leave it unmatched and untouched.
        let Some(close) = content[body_start..].find(FENCE_CLOSE) else {
            break;
        };

        let body_end = body_start + close;
        let end = body_end + FENCE_CLOSE.len();
        blocks.push(PhpBlock {
            start,
            end,
            body_start,
            body_end,
        });
        pos = end;
    }

    blocks
}

/// Inserts the `<?php` tag into every PHP block that is missing it.
///
/// Returns `Ok(None)` when the document is already normalized, so callers
/// can skip the write entirely. The result is idempotent: feeding the
/// rewritten document back in yields `Ok(None)`.
///
/// # Errors
/// Returns an error if the collected edits fail validation; blocks are
/// non-overlapping by construction, so this indicates a scanner bug.
pub fn ensure_open_tags(content: &str) -> Result<Option<String>, RewriteError> {
    let mut rewriter = TextRewriter::new(content);

    for block in find_php_blocks(content) {
        if !block.has_open_tag(content) {
            rewriter.add_edit(Edit::insert(block.body_start, format!("{PHP_OPEN_TAG}\n")));
        }
    }

    if !rewriter.has_edits() {
        return Ok(None);
    }

    rewriter.apply().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(content: &str) -> Option<String> {
        ensure_open_tags(content).unwrap()
    }

    #[test]
    fn inserts_tag_into_untagged_block() {
        let input = "```php\nfoo();\n```";
        assert_eq!(fix(input).unwrap(), "```php\n<?php\nfoo();\n```");
    }

    #[test]
    fn tagged_block_is_returned_unchanged() {
        let input = "```php\n<?php\nfoo();\n```";
        assert_eq!(fix(input), None);
    }

    #[test]
    fn tag_after_blank_lines_counts_as_tagged() {
        let input = "```php\n\n  <?php\nfoo();\n```";
        assert_eq!(fix(input), None);
    }

    #[test]
    fn other_language_blocks_are_never_touched() {
        let input = "intro\n```python\nprint(1)\n```\n```js\nf()\n```\n";
        assert_eq!(fix(input), None);
    }

    #[test]
    fn surrounding_text_is_byte_identical() {
        let input = "# Title\n\nSome prose.\n\n```php\necho 1;\n```\n\nTrailing prose.\n";
        let fixed = fix(input).unwrap();
        assert_eq!(
            fixed,
            "# Title\n\nSome prose.\n\n```php\n<?php\necho 1;\n```\n\nTrailing prose.\n"
        );
    }

    #[test]
    fn empty_block_still_gets_tagged() {
        let input = "```php\n```";
        assert_eq!(fix(input).unwrap(), "```php\n<?php\n```");
    }

    #[test]
    fn blocks_are_handled_independently() {
        let input = "```php\n<?php\na();\n```\ntext\n```php\nb();\n```\n";
        let fixed = fix(input).unwrap();
        assert_eq!(fixed, "```php\n<?php\na();\n```\ntext\n```php\n<?php\nb();\n```\n");
    }

    #[test]
    fn one_block_never_swallows_the_next_fence() {
        let input = "```php\na();\n```\n```php\nb();\n```\n";
        let blocks = find_php_blocks(input);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].body(input), "a();\n");
        assert_eq!(blocks[1].body(input), "b();\n");
    }

    #[test]
    fn unterminated_block_is_left_untouched() {
        let input = "```php\nno closing fence here\n";
        assert!(find_php_blocks(input).is_empty());
        assert_eq!(fix(input), None);
    }

    #[test]
    fn fence_without_newline_is_not_a_block() {
        assert!(find_php_blocks("```php").is_empty());
        assert!(find_php_blocks("prefix ```phps\nx\n```").is_empty());
    }

    #[test]
    fn document_without_blocks_signals_no_change() {
        assert_eq!(fix("plain markdown, no fences at all\n"), None);
        assert_eq!(fix(""), None);
    }

    #[test]
    fn rewrite_is_idempotent() {
        let input = "a\n```php\nfoo();\n```\nb\n```php\nbar();\n```\n";
        let once = fix(input).unwrap();
        assert_eq!(fix(&once), None);
    }

    #[test]
    fn block_offsets_cover_the_full_span() {
        let input = "xx\n```php\nbody\n```yy";
        let blocks = find_php_blocks(input);
        assert_eq!(blocks.len(), 1);
        let block = blocks[0];
        assert_eq!(&input[block.start..block.end], "```php\nbody\n```");
        assert_eq!(block.body(input), "body\n");
    }
}
