//! Shared types used across the generation pipeline.
//!
//! `Language` is what `langs/index.json` stores. `LanguageLink` adds the two
//! values that only exist during a render pass: the output URL and whether the
//! link points at the page being rendered.

use serde::{Deserialize, Serialize};

/// One entry of `langs/index.json`.
///
/// Field names follow the JSON file (`displayName`, `file`), and templates see
/// the same names. `code` and `file` are required; the names default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Language code, e.g. `zh` or `en`. Unique within one index.
    pub code: String,
    /// Native language name, e.g. "中文".
    #[serde(default)]
    pub name: String,
    /// Label used for navigation links.
    #[serde(default)]
    pub display_name: String,
    /// Data file name inside `langs/`, e.g. `zh-CN.json`.
    #[serde(rename = "file")]
    pub data_file: String,
}

/// A language descriptor stamped for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    #[serde(flatten)]
    pub language: Language,
    /// Output file name with the code substituted into the pattern.
    pub url: String,
    /// True only for the language whose page is being rendered.
    pub current: bool,
}

impl LanguageLink {
    pub fn code(&self) -> &str {
        &self.language.code
    }
}
