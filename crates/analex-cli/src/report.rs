//! Loading sources and writing result files.
//!
//! Results for a source named `<base>` are written to `<dir>/<base>_tokens.txt`
//! and `<dir>/<base>_errores.txt`, each list joined with newlines.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use analex_lexer::AnalysisResult;
use log::info;

/// Base name used when the source does not come from a named file.
pub const DEFAULT_BASE_NAME: &str = "analisis";

/// Directory results are written to unless overridden.
pub const DEFAULT_RESULTS_DIR: &str = "resultados";

pub const NO_TOKENS: &str = "no tokens were produced.";
pub const NO_ERRORS: &str = "analysis finished without lexical errors.";

/// Host-side I/O failure.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Source text together with the base name its results are saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub text: String,
    pub base_name: String,
}

impl Source {
    /// Read a file, or stdin when `path` is `None` or `-`.
    pub fn load(path: Option<&Path>) -> Result<Self, ReportError> {
        match path {
            Some(p) if p != Path::new("-") => Self::from_file(p),
            _ => Self::from_reader(io::stdin().lock(), Path::new("<stdin>")),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            text,
            base_name: base_name_for(path),
        })
    }

    fn from_reader(mut reader: impl Read, label: &Path) -> Result<Self, ReportError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| ReportError::Read {
                path: label.to_path_buf(),
                source,
            })?;
        Ok(Self {
            text,
            base_name: DEFAULT_BASE_NAME.to_string(),
        })
    }
}

/// File stem of `path`, or the default base name when it has none.
pub fn base_name_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_NAME)
        .to_string()
}

/// Paths of the two files written by [`save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub tokens_path: PathBuf,
    pub errors_path: PathBuf,
}

/// Write both result lists under `dir`, creating it if needed.
pub fn save(result: &AnalysisResult, dir: &Path, base: &str) -> Result<SavedReport, ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let saved = SavedReport {
        tokens_path: dir.join(format!("{base}_tokens.txt")),
        errors_path: dir.join(format!("{base}_errores.txt")),
    };
    write(&saved.tokens_path, &result.log_text())?;
    write(&saved.errors_path, &result.error_text())?;

    info!(
        "saved results to {} and {}",
        saved.tokens_path.display(),
        saved.errors_path.display()
    );
    Ok(saved)
}

fn write(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Text shown in place of the token log.
pub fn token_panel(result: &AnalysisResult) -> String {
    if result.log_lines.is_empty() {
        NO_TOKENS.to_string()
    } else {
        result.log_text()
    }
}

/// Text shown in place of the error log.
pub fn error_panel(result: &AnalysisResult) -> String {
    if result.error_lines.is_empty() {
        NO_ERRORS.to_string()
    } else {
        result.error_text()
    }
}
