//! Shared test utilities.
//!
//! `lang("zh")` builds a descriptor whose name and display name are the
//! upper-cased code and whose data file is `zh.json`. [`TestProject`] writes a
//! complete throwaway project using the same convention.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let project = TestProject::new(&["zh", "en"]);
//! generate(project.path(), &GenerateOptions::default()).unwrap();
//! assert_eq!(output_files(project.path()), vec!["en.html", "zh.html"]);
//! ```

use crate::langs::LanguageData;
use crate::types::Language;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Value builders
// =========================================================================

pub fn lang(code: &str) -> Language {
    Language {
        code: code.to_string(),
        name: code.to_uppercase(),
        display_name: code.to_uppercase(),
        data_file: format!("{code}.json"),
    }
}

pub fn codes(languages: &[Language]) -> Vec<&str> {
    languages.iter().map(|l| l.code.as_str()).collect()
}

/// Data map with a single `title` entry.
pub fn sample_data(title: &str) -> LanguageData {
    let mut data = LanguageData::new();
    data.insert("title".to_string(), Value::String(title.to_string()));
    data
}

// =========================================================================
// Project fixtures
// =========================================================================

pub const TEST_TEMPLATE: &str = "<title>{{ i18n.title }} - {{ base.siteName }}</title>\n\
{% for l in lang_links %}<a href=\"{{ l.url }}\"{% if l.current %} class=\"current\"{% endif %}>{{ l.displayName }}</a>\n{% endfor %}";

/// A project directory in a temp dir, removed on drop.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Project with a template, a manifest, and one data file per code.
    pub fn new(codes: &[&str]) -> Self {
        let project = Self {
            dir: TempDir::new().unwrap(),
        };
        let index: Vec<Language> = codes.iter().map(|c| lang(c)).collect();
        project.write("index.tmpl", TEST_TEMPLATE);
        project.write(
            "manifest.json",
            &json!({ "siteName": "Test Site", "version": "0.1.0" }).to_string(),
        );
        project.write("langs/index.json", &serde_json::to_string_pretty(&index).unwrap());
        for code in codes {
            project.write(
                &format!("langs/{code}.json"),
                &json!({ "title": format!("Title {code}") }).to_string(),
            );
        }
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel))
            .unwrap_or_else(|e| panic!("cannot read {rel}: {e}"))
    }
}

/// Sorted file names directly inside `<project>/outputs`.
pub fn output_files(project: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(project.join("outputs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
