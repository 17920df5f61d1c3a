//! Directory batch processing.
//!
//! Every `*.pdf` in an input directory is turned into `<stem>.json` in an
//! output directory. Documents share nothing but the read-only classifier,
//! so they are processed in parallel with Rayon unless the options say
//! otherwise.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::classify::Classifier;
use crate::detect::has_pdf_extension;
use crate::error::Result;
use crate::normalize::normalize;
use crate::options::{ErrorMode, ExtractOptions};
use crate::render::{to_json, JsonFormat};
use crate::source::{PdfSpanSource, SpanSource};

/// Prefix of office lock files that sit next to real documents.
const LOCK_FILE_PREFIX: &str = "~$";

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The outline was written to `output`.
    Written { output: PathBuf, entries: usize },
    /// Extraction failed (lenient mode only).
    Failed(String),
}

/// Per-file entry of a [`BatchReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FileOutcome::Written { .. })
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Per-file results, in input order
    pub files: Vec<FileReport>,
    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of outlines written.
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    /// Total outline entries across all written files.
    pub fn total_entries(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Written { entries, .. } => entries,
                FileOutcome::Failed(_) => 0,
            })
            .sum()
    }

    /// Whether the run took longer than `budget`.
    pub fn exceeded(&self, budget: Duration) -> bool {
        self.elapsed > budget
    }
}

/// Converts a directory of PDFs into outline JSON files.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    options: ExtractOptions,
    classifier: Classifier,
    json_format: JsonFormat,
}

impl BatchProcessor {
    /// Create a processor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        let classifier = Classifier::with_config(options.classifier.clone());
        Self {
            options,
            classifier,
            json_format: JsonFormat::Pretty,
        }
    }

    /// Set the JSON layout of written files.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// List the PDFs of `input_dir` in name order, skipping lock files.
    ///
    /// Files that would write the same `<stem>.json` (`a.pdf` and `a.PDF`)
    /// are kept only once: the first in name order wins.
    pub fn collect_inputs(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(input_dir)? {
            let path = entry?.path();
            if !path.is_file() || !has_pdf_extension(&path) {
                continue;
            }
            let is_lock_file = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with(LOCK_FILE_PREFIX))
                .unwrap_or(false);
            if is_lock_file {
                log::debug!("Skipping lock file {}", path.display());
                continue;
            }
            inputs.push(path);
        }
        inputs.sort();

        let mut stems = HashSet::new();
        inputs.retain(|path| {
            let fresh = stems.insert(crate::fallback_title(path));
            if !fresh {
                log::warn!(
                    "Skipping {}: another input already writes {}.json",
                    path.display(),
                    crate::fallback_title(path)
                );
            }
            fresh
        });
        Ok(inputs)
    }

    /// Extract one document and write `<stem>.json` into `output_dir`.
    ///
    /// Returns the output path and the number of outline entries.
    pub fn process_file(&self, input: &Path, output_dir: &Path) -> Result<(PathBuf, usize)> {
        let source = PdfSpanSource::open(input)?
            .with_pages(self.options.pages.clone())
            .with_error_mode(self.options.error_mode);
        let records = normalize(&source.lines()?);
        let outline = self
            .classifier
            .classify(&records, &crate::fallback_title(input));

        let output = output_dir.join(format!("{}.json", crate::fallback_title(input)));
        fs::write(&output, to_json(&outline, self.json_format)?)?;
        log::info!(
            "{} -> {} ({} entries)",
            input.display(),
            output.display(),
            outline.entries.len()
        );

        Ok((output, outline.entries.len()))
    }

    /// Process every PDF in `input_dir`.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        self.run_with(input_dir, output_dir, |_| {})
    }

    /// Process every PDF in `input_dir`, calling `on_done` after each file.
    ///
    /// In strict mode the first failure aborts the run and is returned.
    pub fn run_with<F>(&self, input_dir: &Path, output_dir: &Path, on_done: F) -> Result<BatchReport>
    where
        F: Fn(&FileReport) + Sync,
    {
        let start = Instant::now();
        let inputs = self.collect_inputs(input_dir)?;
        fs::create_dir_all(output_dir)?;
        log::info!(
            "Processing {} PDF files from {}",
            inputs.len(),
            input_dir.display()
        );

        let process = |input: &PathBuf| -> Result<FileReport> {
            let outcome = match self.process_file(input, output_dir) {
                Ok((output, entries)) => FileOutcome::Written { output, entries },
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to process {}: {}", input.display(), e);
                    FileOutcome::Failed(e.to_string())
                }
                Err(e) => {
                    log::error!("Failed to process {}: {}", input.display(), e);
                    return Err(e);
                }
            };
            let report = FileReport {
                input: input.clone(),
                outcome,
            };
            on_done(&report);
            Ok(report)
        };

        let files = if self.options.parallel {
            inputs.par_iter().map(&process).collect::<Result<Vec<_>>>()?
        } else {
            inputs.iter().map(&process).collect::<Result<Vec<_>>>()?
        };

        Ok(BatchReport {
            files,
            elapsed: start.elapsed(),
        })
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}
