//! Shared constants for fence markers, the canonical tag, and defaults.

/// Opening fence of a PHP code block, including the mandatory newline.
///
/// The newline is part of the marker: a fence followed by anything else
/// (another label, EOF) is not a PHP block.
pub const PHP_FENCE_OPEN: &str = "```php\n";

/// Closing fence marker. The nearest occurrence after a block body starts
/// terminates that block.
pub const FENCE_CLOSE: &str = "```";

/// The canonical PHP opening tag inserted at the top of untagged blocks.
pub const PHP_OPEN_TAG: &str = "<?php";

/// Directory scanned when neither the CLI nor the configuration names one.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Name of the configuration file searched for in the start directory and
/// its ancestors.
pub const CONFIG_FILENAME: &str = ".mdphpfix.toml";

/// Directory names skipped during traversal in addition to gitignore rules.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", "node_modules", "vendor", "target", ".venv"];
