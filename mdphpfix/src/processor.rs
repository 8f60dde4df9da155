//! Per-file processing and the batch fix run.

use crate::fences::ensure_open_tags;
use crate::utils::{collect_markdown_files, normalize_display_path};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Options controlling a fix run.
#[derive(Debug, Default, Clone)]
pub struct FixOptions {
    /// Preview changes without writing any file.
    pub dry_run: bool,
    /// Emit the run summary as JSON instead of plain text.
    pub json: bool,
    /// Report configuration and per-file detail on stderr.
    pub verbose: bool,
    /// Additional folder names to skip while walking.
    pub exclude_folders: Vec<String>,
}

/// Outcome of processing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file content changed (or would change, in dry-run mode).
    Changed,
    /// The file was already normalized; nothing was written.
    Unchanged,
    /// The file could not be read or written; it was left alone.
    Failed,
}

/// Summary of a completed fix run.
#[derive(Debug, Serialize)]
pub struct FixReport {
    /// Files rewritten on disk (or that would be, in dry-run mode).
    pub fixed_files: Vec<String>,
    /// Number of Markdown files scanned.
    pub files_scanned: usize,
    /// Number of files skipped because of read or write errors.
    pub error_count: usize,
}

/// Rewrites one Markdown file in place if any PHP block is missing its tag.
///
/// The rewritten content is computed fully in memory before anything is
/// written, so a failed write never leaves a truncated file behind. Read and
/// write errors are reported on stderr with the file path and cause and
/// mapped to [`FileOutcome::Failed`] so a batch run continues with the next
/// file.
pub fn process_file(path: &Path, dry_run: bool) -> FileOutcome {
    match try_process_file(path, dry_run) {
        Ok(true) => FileOutcome::Changed,
        Ok(false) => FileOutcome::Unchanged,
        Err(e) => {
            eprintln!(
                "{} {}: {e:#}",
                "Error processing".red(),
                normalize_display_path(path)
            );
            FileOutcome::Failed
        }
    }
}

fn try_process_file(path: &Path, dry_run: bool) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match ensure_open_tags(&content)? {
        Some(fixed) => {
            if !dry_run {
                fs::write(path, fixed)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Runs the fixer over every Markdown file under `root`, one file at a time.
///
/// Prints one line per changed file and a final summary (or, with
/// `options.json`, the full report as JSON). Per-file failures are already
/// reported on stderr by [`process_file`] and only counted here.
///
/// # Errors
///
/// Returns an error if writing to the output writer fails.
pub fn run_fix<W: Write>(root: &Path, options: &FixOptions, writer: &mut W) -> Result<FixReport> {
    let files = collect_markdown_files(root, &options.exclude_folders);

    if options.verbose {
        eprintln!(
            "[VERBOSE] Found {} Markdown file(s) under {}",
            files.len(),
            normalize_display_path(root)
        );
    }

    let mut fixed_files = Vec::new();
    let mut error_count = 0usize;

    for path in &files {
        match process_file(path, options.dry_run) {
            FileOutcome::Changed => {
                let display = normalize_display_path(path);
                if !options.json {
                    if options.dry_run {
                        writeln!(writer, "{} {display}", "Would fix:".yellow())?;
                    } else {
                        writeln!(writer, "{} {display}", "Fixed:".green())?;
                    }
                }
                fixed_files.push(display);
            }
            FileOutcome::Unchanged => {
                if options.verbose {
                    eprintln!("[VERBOSE] Unchanged: {}", normalize_display_path(path));
                }
            }
            FileOutcome::Failed => error_count += 1,
        }
    }

    let report = FixReport {
        files_scanned: files.len(),
        error_count,
        fixed_files,
    };

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(
            writer,
            "\nProcessed {} file(s) with PHP code blocks",
            report.fixed_files.len()
        )?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rewrites_file_missing_tag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.md");
        fs::write(&path, "```php\necho 1;\n```\n").unwrap();

        assert_eq!(process_file(&path, false), FileOutcome::Changed);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "```php\n<?php\necho 1;\n```\n"
        );
    }

    #[test]
    fn normalized_file_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.md");
        let content = "```php\n<?php\necho 1;\n```\n";
        fs::write(&path, content).unwrap();

        assert_eq!(process_file(&path, false), FileOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn dry_run_reports_change_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.md");
        let content = "```php\necho 1;\n```\n";
        fs::write(&path, content).unwrap();

        assert_eq!(process_file(&path, true), FileOutcome::Changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn unreadable_file_fails_without_aborting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert_eq!(process_file(&path, false), FileOutcome::Failed);
    }

    #[test]
    fn run_fix_prints_changed_files_and_summary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "```php\na();\n```\n").unwrap();
        fs::write(dir.path().join("b.md"), "no blocks here\n").unwrap();

        let mut buffer = Vec::new();
        let report = run_fix(dir.path(), &FixOptions::default(), &mut buffer).unwrap();

        assert_eq!(report.fixed_files.len(), 1);
        assert!(report.fixed_files[0].ends_with("a.md"));
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.error_count, 0);

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("a.md"));
        assert!(output.contains("Processed 1 file(s) with PHP code blocks"));
    }

    #[test]
    fn run_fix_continues_past_bad_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), [0xff, 0xfe]).unwrap();
        fs::write(dir.path().join("good.md"), "```php\ng();\n```\n").unwrap();

        let mut buffer = Vec::new();
        let report = run_fix(dir.path(), &FixOptions::default(), &mut buffer).unwrap();

        assert_eq!(report.error_count, 1);
        assert_eq!(report.fixed_files.len(), 1);
        assert!(report.fixed_files[0].ends_with("good.md"));
        assert_eq!(
            fs::read_to_string(dir.path().join("good.md")).unwrap(),
            "```php\n<?php\ng();\n```\n"
        );
    }

    #[test]
    fn run_fix_json_emits_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "```php\na();\n```\n").unwrap();

        let options = FixOptions {
            json: true,
            ..FixOptions::default()
        };
        let mut buffer = Vec::new();
        run_fix(dir.path(), &options, &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["fixed_files"][0]
            .as_str()
            .is_some_and(|p| p.ends_with("a.md")));
        assert_eq!(value["files_scanned"], 1);
        assert_eq!(value["error_count"], 0);
    }

    #[test]
    fn second_run_reports_zero_changes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "```php\na();\n```\n").unwrap();

        let mut buffer = Vec::new();
        run_fix(dir.path(), &FixOptions::default(), &mut buffer).unwrap();

        let mut buffer = Vec::new();
        let report = run_fix(dir.path(), &FixOptions::default(), &mut buffer).unwrap();
        assert!(report.fixed_files.is_empty());
        assert!(String::from_utf8(buffer)
            .unwrap()
            .contains("Processed 0 file(s)"));
    }
}
