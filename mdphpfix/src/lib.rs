//! Core library for the `mdphpfix` documentation fixer.
//!
//! `mdphpfix` scans a Markdown documentation tree and inserts the canonical
//! `<?php` opening tag into fenced PHP code blocks that are missing it, so
//! syntax highlighters render those blocks correctly. Files are rewritten in
//! place, one at a time, and only when their content actually changes.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants.
pub mod constants;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;

/// Module for locating fenced PHP blocks and inserting missing `<?php` tags.
pub mod fences;

/// Module for per-file processing and the batch fix run.
pub mod processor;

/// Module containing the byte-range text rewriter.
pub mod rewrite;

/// Module containing utility functions.
/// This includes file collection and path display helpers.
pub mod utils;
