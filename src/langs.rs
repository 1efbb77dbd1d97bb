//! Language index and per-language data loading.
//!
//! `langs/index.json` is an ordered array of languages:
//!
//! ```json
//! [
//!     { "code": "zh", "name": "中文", "displayName": "中文", "file": "zh-CN.json" },
//!     { "code": "en", "name": "English", "displayName": "English", "file": "en-US.json" }
//! ]
//! ```
//!
//! The index order is the page order and the navigation order. Each `file`
//! names a JSON object next to the index; its keys are whatever the template
//! reads, so the data is kept as an untyped map.

use crate::types::Language;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Untyped key/value data for one language.
pub type LanguageData = Map<String, Value>;

#[derive(Error, Debug)]
pub enum LanguageError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no languages configured in {0}")]
    EmptyIndex(PathBuf),
    #[error("language #{position} in {path} has an empty code")]
    EmptyCode { path: PathBuf, position: usize },
    #[error("language code `{code}` appears more than once in {path}")]
    DuplicateCode { path: PathBuf, code: String },
    #[error("no configuration found for language codes: {}", .0.join(", "))]
    UnknownCodes(Vec<String>),
    #[error("unsupported format `{extension}` for {path}, only .json is supported")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// Load and validate `langs/index.json`.
///
/// The result is never empty and every code is non-empty and unique.
pub fn load_index(path: &Path) -> Result<Vec<Language>, LanguageError> {
    let content = fs::read_to_string(path).map_err(|source| LanguageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let languages: Vec<Language> =
        serde_json::from_str(&content).map_err(|source| LanguageError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    if languages.is_empty() {
        return Err(LanguageError::EmptyIndex(path.to_path_buf()));
    }

    let mut seen = HashSet::new();
    for (idx, lang) in languages.iter().enumerate() {
        if lang.code.is_empty() {
            return Err(LanguageError::EmptyCode {
                path: path.to_path_buf(),
                position: idx + 1,
            });
        }
        if !seen.insert(lang.code.as_str()) {
            return Err(LanguageError::DuplicateCode {
                path: path.to_path_buf(),
                code: lang.code.clone(),
            });
        }
    }

    Ok(languages)
}

/// Keep only the requested languages, in index order.
///
/// An empty request keeps everything. Every requested code must exist; the
/// error lists all unmatched codes in request order.
pub fn filter_languages(
    languages: Vec<Language>,
    requested: &[String],
) -> Result<Vec<Language>, LanguageError> {
    if requested.is_empty() {
        return Ok(languages);
    }

    let known: HashSet<&str> = languages.iter().map(|l| l.code.as_str()).collect();
    let mut missing: Vec<String> = Vec::new();
    for code in requested {
        if !known.contains(code.as_str()) && !missing.contains(code) {
            missing.push(code.clone());
        }
    }
    if !missing.is_empty() {
        return Err(LanguageError::UnknownCodes(missing));
    }

    let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
    Ok(languages
        .into_iter()
        .filter(|l| wanted.contains(l.code.as_str()))
        .collect())
}

/// Load one language's data file from `dir`.
///
/// The format is picked by extension; only `.json` is supported.
pub fn load_language_data(dir: &Path, file_name: &str) -> Result<LanguageData, LanguageError> {
    let path = dir.join(file_name);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();

    if !extension.eq_ignore_ascii_case("json") {
        return Err(LanguageError::UnsupportedFormat {
            extension: if extension.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{extension}")
            },
            path,
        });
    }

    let content = fs::read_to_string(&path).map_err(|source| LanguageError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LanguageError::Json { path, source })
}
