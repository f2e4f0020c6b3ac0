//! Test case discovery and loading
//!
//! Discovery only lists and orders file pairs; file contents are read one
//! case at a time by [`CaseFiles::load`] so that ordering and truncation are
//! settled before any input is touched.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use tokio::fs;

use crate::config::CaseSelection;
use crate::constants::{INPUT_EXTENSION, OUTPUT_EXTENSION};
use crate::error::{HarnessError, HarnessResult};
use crate::utils::{decode_text, natural_key};

/// Order in which discovered cases are run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    /// Directory listing order
    AsDiscovered,
    /// Random permutation, different on every run
    Shuffled,
    /// Ascending size of the input file
    BySize,
    /// Numeric-aware name order (`t2` before `t10`)
    #[default]
    Natural,
}

impl std::fmt::Display for Ordering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ordering::AsDiscovered => write!(f, "as-discovered"),
            Ordering::Shuffled => write!(f, "shuffled"),
            Ordering::BySize => write!(f, "size"),
            Ordering::Natural => write!(f, "natural"),
        }
    }
}

/// A discovered but not yet loaded case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFiles {
    /// Base name shared by the `.in`/`.out` pair
    pub name: String,
    pub input_path: PathBuf,
    /// `None` when no `.out` file exists next to the input
    pub output_path: Option<PathBuf>,
    /// Size of the input file in bytes, used for size ordering
    pub input_size: u64,
}

/// A loaded case with trimmed payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    /// `None` when the case has no `.out` file
    pub expected: Option<String>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl CaseFiles {
    /// Read and trim both files of the pair.
    ///
    /// An empty input is always an error. A missing `.out` file is an error
    /// only when `require_expected` is set.
    pub async fn load(&self, require_expected: bool) -> HarnessResult<TestCase> {
        let input = read_trimmed(&self.input_path).await?;
        if input.is_empty() {
            return Err(HarnessError::EmptyInput {
                path: self.input_path.clone(),
            });
        }

        let expected = match &self.output_path {
            Some(path) => Some(read_trimmed(path).await?),
            None if require_expected => {
                return Err(HarnessError::MissingExpected {
                    path: self.input_path.clone(),
                });
            }
            None => None,
        };

        Ok(TestCase {
            name: self.name.clone(),
            input,
            expected,
            input_path: self.input_path.clone(),
            output_path: self.expected_path(),
        })
    }

    /// Path of the expected-output file, whether or not it exists
    pub fn expected_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| self.input_path.with_extension(OUTPUT_EXTENSION))
    }
}

async fn read_trimmed(path: &Path) -> HarnessResult<String> {
    let bytes = fs::read(path).await.map_err(|source| HarnessError::ReadCase {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_text(&bytes).trim().to_string())
}

/// Lists, orders and truncates the cases of a run
pub struct TestCaseSource {
    selection: CaseSelection,
    ordering: Ordering,
    limit: Option<usize>,
}

impl TestCaseSource {
    /// Create a new test case source
    pub fn new(selection: CaseSelection, ordering: Ordering, limit: Option<usize>) -> Self {
        Self {
            selection,
            ordering,
            limit,
        }
    }

    /// Discover the ordered cases of this run
    pub async fn discover(&self) -> HarnessResult<Vec<CaseFiles>> {
        let mut cases = match &self.selection {
            CaseSelection::Single(base) => vec![self.single(base).await],
            CaseSelection::Directory(dir) => {
                let mut cases = self.scan_directory(dir).await?;
                self.apply_ordering(&mut cases);
                tracing::debug!(
                    "Discovered {} test cases in {} ({} order)",
                    cases.len(),
                    dir.display(),
                    self.ordering
                );
                cases
            }
        };

        if let Some(limit) = self.limit {
            cases.truncate(limit);
        }
        Ok(cases)
    }

    /// A single case named by its path without extension
    async fn single(&self, base: &Path) -> CaseFiles {
        let input_path = with_suffix(base, INPUT_EXTENSION);
        let output_path = with_suffix(base, OUTPUT_EXTENSION);
        let has_output = fs::try_exists(&output_path).await.unwrap_or(false);
        let output_path = has_output.then_some(output_path);
        let input_size = fs::metadata(&input_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        CaseFiles {
            name: base
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| base.display().to_string()),
            input_path,
            output_path,
            input_size,
        }
    }

    /// List every `<name>.in` file of `dir` and pair it with `<name>.out`
    async fn scan_directory(&self, dir: &Path) -> HarnessResult<Vec<CaseFiles>> {
        let read_dir_error = |source: std::io::Error| HarnessError::ReadDirectory {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir).await.map_err(read_dir_error)?;
        let mut file_names = HashSet::new();
        let mut inputs = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            // Hidden files are not test cases
            if file_name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if path.extension() == Some(OsStr::new(INPUT_EXTENSION)) {
                // Follows symlinks, so a linked input counts with its target's size.
                // A dangling link stays a case and fails when it is loaded.
                match fs::metadata(&path).await {
                    Ok(metadata) if metadata.is_file() => inputs.push((path, metadata.len())),
                    Ok(_) => {}
                    Err(_) => inputs.push((path, 0)),
                }
            }
            file_names.insert(file_name);
        }

        let cases = inputs
            .into_iter()
            .filter_map(|(input_path, input_size)| {
                let name = input_path.file_stem()?.to_string_lossy().into_owned();
                let out_name = format!("{}.{}", name, OUTPUT_EXTENSION);
                let output_path = file_names
                    .contains(&out_name)
                    .then(|| dir.join(&out_name));

                Some(CaseFiles {
                    name,
                    input_path,
                    output_path,
                    input_size,
                })
            })
            .collect();

        Ok(cases)
    }

    fn apply_ordering(&self, cases: &mut [CaseFiles]) {
        match self.ordering {
            Ordering::AsDiscovered => {}
            Ordering::Shuffled => cases.shuffle(&mut rand::rng()),
            Ordering::BySize => cases.sort_by_key(|case| case.input_size),
            Ordering::Natural => cases.sort_by_cached_key(|case| natural_key(&case.name)),
        }
    }
}

/// `base` with `.ext` appended (not replacing any existing extension)
fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}
