//! Project layout, generation options, and the site manifest.
//!
//! A project directory has a fixed shape:
//!
//! ```text
//! project/
//! ├── index.tmpl           # Template (required)
//! ├── manifest.json        # Site metadata (optional)
//! ├── langs/
//! │   ├── index.json       # Ordered language list (required)
//! │   ├── zh-CN.json       # One data file per language
//! │   └── en-US.json
//! └── outputs/             # Created on generate
//! ```
//!
//! ## Manifest
//!
//! ```json
//! {
//!     "baseURL": "https://example.com",
//!     "siteName": "My Website",
//!     "author": "Website Author",
//!     "description": "A multilingual website",
//!     "version": "1.0.0"
//! }
//! ```
//!
//! Every field is optional. A missing file, a file that fails to parse, or a
//! missing field all fall back to the defaults: `siteName = "Website"`,
//! `version = "1.0.0"`, everything else empty. A field set to `""` stays empty.
//! Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Placeholder replaced by the language code in output patterns.
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Output pattern used when none is given.
pub const DEFAULT_OUTPUT_PATTERN: &str = "{lang}.html";

pub const TEMPLATE_FILE: &str = "index.tmpl";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const LANGS_DIR: &str = "langs";
pub const LANG_INDEX_FILE: &str = "index.json";
pub const OUTPUT_DIR: &str = "outputs";

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("project directory does not exist: {0}")]
    MissingProjectDir(PathBuf),
    #[error("template file does not exist: {0}")]
    MissingTemplate(PathBuf),
    #[error("language index does not exist: {0}")]
    MissingLanguageIndex(PathBuf),
}

/// Resolved paths for one project directory.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub template: PathBuf,
    pub manifest: PathBuf,
    pub langs_dir: PathBuf,
    pub lang_index: PathBuf,
    pub output_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path) -> Self {
        let langs_dir = root.join(LANGS_DIR);
        Self {
            root: root.to_path_buf(),
            template: root.join(TEMPLATE_FILE),
            manifest: root.join(MANIFEST_FILE),
            lang_index: langs_dir.join(LANG_INDEX_FILE),
            langs_dir,
            output_dir: root.join(OUTPUT_DIR),
        }
    }

    /// Check that the required inputs exist. The manifest is optional and
    /// the output directory is created later.
    pub fn validate(&self) -> Result<(), ProjectError> {
        if !self.root.is_dir() {
            return Err(ProjectError::MissingProjectDir(self.root.clone()));
        }
        if !self.template.is_file() {
            return Err(ProjectError::MissingTemplate(self.template.clone()));
        }
        if !self.lang_index.is_file() {
            return Err(ProjectError::MissingLanguageIndex(self.lang_index.clone()));
        }
        Ok(())
    }
}

/// Per-call generation parameters.
///
/// Both front ends build one of these and pass it down; nothing is kept in
/// process-wide state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Output file name pattern; every `{lang}` is replaced by the code.
    pub output_pattern: String,
    /// Language codes to render. Empty means all of them.
    pub lang_codes: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            lang_codes: Vec::new(),
        }
    }
}

impl GenerateOptions {
    pub fn with_output_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.output_pattern = pattern.into();
        self
    }

    pub fn with_lang_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lang_codes = codes.into_iter().map(Into::into).collect();
        self
    }
}

/// Substitute `code` for every `{lang}` in `pattern`.
pub fn output_name(pattern: &str, code: &str) -> String {
    pattern.replace(LANG_PLACEHOLDER, code)
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatternError {
    #[error("output pattern `{pattern}` gives language `{code}` an empty file name")]
    Empty { pattern: String, code: String },
    #[error("output `{name}` for language `{code}` is outside the output directory")]
    OutsideOutputDir { name: String, code: String },
    #[error(
        "output pattern `{pattern}` writes languages `{first}` and `{second}` to the same file `{name}`; the pattern needs {{lang}}"
    )]
    Collision {
        pattern: String,
        name: String,
        first: String,
        second: String,
    },
}

/// Check that an expanded output name is a relative path below `outputs/`.
pub fn check_output_name(pattern: &str, code: &str, name: &str) -> Result<(), PatternError> {
    if name.trim().is_empty() {
        return Err(PatternError::Empty {
            pattern: pattern.to_string(),
            code: code.to_string(),
        });
    }
    let escapes = Path::new(name).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(PatternError::OutsideOutputDir {
            name: name.to_string(),
            code: code.to_string(),
        });
    }
    Ok(())
}

/// Site-wide metadata from `manifest.json`, exposed to templates as `base`.
///
/// Missing fields are filled from [`Manifest::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub site_name: String,
    pub author: String,
    pub description: String,
    pub version: String,
}

fn default_site_name() -> String {
    "Website".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            site_name: default_site_name(),
            author: String::new(),
            description: String::new(),
            version: default_version(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ManifestError {
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
}

/// Parse a manifest file strictly. Most callers want [`load_manifest`].
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the manifest, falling back to [`Manifest::default`] with a warning.
pub fn load_manifest(path: &Path) -> Manifest {
    match read_manifest(path) {
        Ok(manifest) => manifest,
        Err(e) => {
            log::warn!("{e}; using default site metadata");
            Manifest::default()
        }
    }
}
