//! Input collection
//!
//! Turns path arguments into [`SourceText`]s: files are read as-is,
//! directories are walked for markdown files and `-` (or no argument at
//! all) reads standard input under the `(stdin)` label.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use mdl_domain::constants::STDIN_LABEL;
use mdl_domain::error::Result;
use mdl_infrastructure::ErrorContext;
use mdl_infrastructure::constants::{MARKDOWN_EXTENSIONS, STDIN_ARG};
use mdl_rules::SourceText;
use tracing::debug;
use walkdir::WalkDir;

/// Read every input named by `paths`, in argument order
///
/// Standard input is consumed at most once; a repeated `-` is skipped.
pub fn collect_sources<R: Read>(paths: &[PathBuf], stdin: R) -> Result<Vec<SourceText>> {
    if paths.is_empty() {
        return Ok(vec![read_stdin(stdin)?]);
    }

    let mut stdin = Some(stdin);
    let mut sources = Vec::new();
    for path in paths {
        if path.as_os_str() == STDIN_ARG {
            match stdin.take() {
                Some(reader) => sources.push(read_stdin(reader)?),
                None => debug!("standard input already read, skipping repeated '-'"),
            }
        } else if path.is_dir() {
            for file in markdown_files(path)? {
                sources.push(read_file(&file)?);
            }
        } else {
            sources.push(read_file(path)?);
        }
    }
    Ok(sources)
}

fn read_stdin<R: Read>(mut reader: R) -> Result<SourceText> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .io_context("Failed to read standard input")?;
    Ok(SourceText::new(STDIN_LABEL, text))
}

fn read_file(path: &Path) -> Result<SourceText> {
    let text =
        fs::read_to_string(path).io_context(format!("Failed to read {}", path.display()))?;
    Ok(SourceText::new(path.display().to_string(), text))
}

/// Markdown files under `dir`, sorted by path
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.io_context(format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }
    debug!(dir = %dir.display(), count = files.len(), "collected markdown files");
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}
