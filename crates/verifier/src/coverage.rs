//! Coverage scoping
//!
//! The coverage tool instruments the whole test run. Only files under the
//! source directory are attributed coverage: every other `SF:` record is
//! dropped before the report is written.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use contracts::{ContractError, CoverageSummary, FileCoverage};
use lcov::{Reader, Record};
use tracing::{debug, info};

use crate::error::{Result, VerifyError};

/// Line data of one `SF:` record
#[derive(Debug, Default, Clone)]
struct FileRecord {
    path: PathBuf,
    lines: BTreeMap<u32, u64>,
    lines_found: Option<u32>,
    lines_hit: Option<u32>,
}

impl FileRecord {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    /// DA lines win over LF/LH summaries when both are present
    fn coverage(&self) -> FileCoverage {
        let (found, hit) = if self.lines.is_empty() {
            (
                self.lines_found.unwrap_or(0),
                self.lines_hit.unwrap_or(0),
            )
        } else {
            let found = self.lines.len() as u32;
            let hit = self.lines.values().filter(|c| **c > 0).count() as u32;
            (found, hit)
        };
        FileCoverage {
            path: self.path.clone(),
            lines_found: found,
            lines_hit: hit,
        }
    }
}

/// Coverage restricted to one directory
#[derive(Debug, Clone)]
pub struct ScopedCoverage {
    records: Vec<FileRecord>,
    excluded: usize,
}

impl ScopedCoverage {
    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary {
            files: self.records.iter().map(FileRecord::coverage).collect(),
            excluded_files: self.excluded,
        }
    }

    /// Render the scoped records back to LCOV text
    pub fn to_lcov(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            let cov = record.coverage();
            let _ = writeln!(out, "SF:{}", record.path.display());
            for (line, count) in &record.lines {
                let _ = writeln!(out, "DA:{line},{count}");
            }
            let _ = writeln!(out, "LF:{}", cov.lines_found);
            let _ = writeln!(out, "LH:{}", cov.lines_hit);
            out.push_str("end_of_record\n");
        }
        out
    }

    /// Write the scoped report, creating parent directories
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VerifyError::io(parent, e))?;
        }
        std::fs::write(path, self.to_lcov()).map_err(|e| VerifyError::io(path, e))?;
        info!(path = %path.display(), files = self.records.len(), "Scoped coverage report written");
        Ok(())
    }
}

/// Read an LCOV artifact and keep only records under `source_dir`.
///
/// Relative `SF:` paths are resolved against `root`.
pub fn scope_lcov(lcov_path: &Path, source_dir: &Path, root: &Path) -> Result<ScopedCoverage> {
    let malformed = |message: String| {
        VerifyError::from(ContractError::coverage_artifact(
            lcov_path.display().to_string(),
            message,
        ))
    };

    let reader = Reader::open_file(lcov_path).map_err(|e| VerifyError::io(lcov_path, e))?;
    let scope = normalize(&root.join(source_dir));

    let mut records = Vec::new();
    let mut excluded = 0usize;
    let mut current: Option<FileRecord> = None;

    for record in reader {
        let record = record.map_err(|e| malformed(e.to_string()))?;
        match record {
            Record::SourceFile { path } => {
                if let Some(open) = current.take() {
                    return Err(malformed(format!(
                        "record for '{}' not closed before '{}'",
                        open.path.display(),
                        path.display()
                    )));
                }
                current = Some(FileRecord::new(path));
            }
            Record::LineData { line, count, .. } => {
                if let Some(file) = current.as_mut() {
                    *file.lines.entry(line).or_insert(0) += count;
                }
            }
            Record::LinesFound { found } => {
                if let Some(file) = current.as_mut() {
                    file.lines_found = Some(found);
                }
            }
            Record::LinesHit { hit } => {
                if let Some(file) = current.as_mut() {
                    file.lines_hit = Some(hit);
                }
            }
            Record::EndOfRecord => {
                if let Some(file) = current.take() {
                    if in_scope(&file.path, &scope, root) {
                        records.push(file);
                    } else {
                        debug!(path = %file.path.display(), "Coverage record outside source dir");
                        excluded += 1;
                    }
                }
            }
            _ => {}
        }
    }

    // Tolerate a missing trailing end_of_record
    if let Some(file) = current.take() {
        if in_scope(&file.path, &scope, root) {
            records.push(file);
        } else {
            excluded += 1;
        }
    }

    Ok(ScopedCoverage { records, excluded })
}

fn in_scope(path: &Path, scope: &Path, root: &Path) -> bool {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    normalize(&absolute).starts_with(scope)
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
