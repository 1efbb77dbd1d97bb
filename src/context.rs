//! Navigation links and per-language render contexts.
//!
//! [`LinkSet`] is built once per run from the selected languages and the
//! output pattern, so every page lists the same siblings with the same URLs.
//! [`build_context`] then stamps it for one language at a time.
//!
//! Templates see the context under these names:
//!
//! | Name | Value |
//! |------|-------|
//! | `lang` | the current language, `current` is true |
//! | `lang_links` | every selected language in index order |
//! | `i18n` | the language's data map |
//! | `i18n_json` | the same map as compact JSON, safe inside `<script>` |
//! | `base` | the site manifest |

use crate::config::{Manifest, PatternError, check_output_name, output_name};
use crate::langs::{self, LanguageData, LanguageError};
use crate::types::{Language, LanguageLink};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("failed to load language data: {0}")]
    Data(#[from] LanguageError),
    #[error("failed to serialize language data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("language `{0}` is not part of the link set")]
    UnknownLanguage(String),
}

/// Output URLs for every selected language, in selection order.
#[derive(Debug, Clone)]
pub struct LinkSet {
    pattern: String,
    links: Vec<LanguageLink>,
}

impl LinkSet {
    pub fn new(languages: &[Language], output_pattern: &str) -> Self {
        let links = languages
            .iter()
            .map(|language| LanguageLink {
                url: output_name(output_pattern, &language.code),
                language: language.clone(),
                current: false,
            })
            .collect();
        Self {
            pattern: output_pattern.to_string(),
            links,
        }
    }

    /// Every URL must be a distinct relative path below the output directory,
    /// otherwise pages would overwrite each other or land outside it.
    pub fn validate(&self) -> Result<(), PatternError> {
        let mut seen: HashMap<&str, &str> = HashMap::with_capacity(self.links.len());
        for link in &self.links {
            check_output_name(&self.pattern, link.code(), &link.url)?;
            if let Some(first) = seen.insert(&link.url, link.code()) {
                return Err(PatternError::Collision {
                    pattern: self.pattern.clone(),
                    name: link.url.clone(),
                    first: first.to_string(),
                    second: link.code().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&LanguageLink> {
        self.links.iter().find(|l| l.code() == code)
    }

    /// Copy of the links with only `code` marked current.
    pub fn for_language(&self, code: &str) -> Vec<LanguageLink> {
        self.links
            .iter()
            .map(|link| LanguageLink {
                current: link.code() == code,
                ..link.clone()
            })
            .collect()
    }
}

/// Everything one page render needs.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub lang: LanguageLink,
    pub lang_links: Vec<LanguageLink>,
    pub i18n: LanguageData,
    pub i18n_json: String,
    pub base: Manifest,
}

impl RenderContext {
    /// Assemble a context from already-loaded data.
    pub fn new(
        language: &Language,
        links: &LinkSet,
        data: LanguageData,
        manifest: &Manifest,
    ) -> Result<Self, ContextError> {
        let own = links
            .get(&language.code)
            .ok_or_else(|| ContextError::UnknownLanguage(language.code.clone()))?;
        let i18n_json = script_safe_json(&data)?;

        Ok(Self {
            lang: LanguageLink {
                language: language.clone(),
                url: own.url.clone(),
                current: true,
            },
            lang_links: links.for_language(&language.code),
            i18n: data,
            i18n_json,
            base: manifest.clone(),
        })
    }

    /// Output file name for this page, relative to the output directory.
    pub fn output_name(&self) -> &str {
        &self.lang.url
    }
}

/// Compact JSON with `<`, `>` and `&` written as `\u` escapes, so a string
/// like `</script>` cannot end an enclosing `<script>` block. The escapes
/// only occur inside JSON strings, where they decode to the same characters.
fn script_safe_json(data: &LanguageData) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(data)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Load `language`'s data from `langs_dir` and build its render context.
pub fn build_context(
    language: &Language,
    links: &LinkSet,
    langs_dir: &Path,
    manifest: &Manifest,
) -> Result<RenderContext, ContextError> {
    let data = langs::load_language_data(langs_dir, &language.data_file)?;
    RenderContext::new(language, links, data, manifest)
}
