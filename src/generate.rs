//! Page generation.
//!
//! Runs the whole pipeline for one project directory:
//!
//! ```text
//! langs/index.json ─→ filter ─→ LinkSet ─┐
//! manifest.json ─────────────────────────┼─→ RenderContext ─→ outputs/<pattern>
//! langs/<file> (per language) ───────────┘        ↑
//! index.tmpl (parsed once) ───────────────────────┘
//! ```
//!
//! Every configuration problem (missing inputs, bad index, unknown language
//! codes, template syntax, output names that collide or leave `outputs/`) is
//! caught before `outputs/` is created. After that,
//! languages render one at a time in index order and the first failure stops
//! the run. Pages already written for earlier languages stay on disk.

use crate::config::{self, GenerateOptions, PatternError, ProjectError, ProjectPaths};
use crate::context::{self, ContextError, LinkSet};
use crate::langs::{self, LanguageError};
use crate::render::{PageTemplate, RenderError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error("failed to load language index: {0}")]
    Index(#[source] LanguageError),
    #[error(transparent)]
    Filter(LanguageError),
    #[error(transparent)]
    OutputPattern(#[from] PatternError),
    #[error("failed to prepare template: {0}")]
    Template(#[source] RenderError),
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to generate language {code}: {source}")]
    Context {
        code: String,
        #[source]
        source: ContextError,
    },
    #[error("failed to generate language {code}: {source}")]
    Render {
        code: String,
        #[source]
        source: RenderError,
    },
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub code: String,
    pub display_name: String,
    pub path: PathBuf,
}

/// What a successful run produced, in render order.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
}

/// Render one page per selected language of the project at `project_dir`.
pub fn generate(
    project_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
    let paths = ProjectPaths::new(project_dir);
    paths.validate()?;

    let manifest = config::load_manifest(&paths.manifest);

    let languages = langs::load_index(&paths.lang_index).map_err(GenerateError::Index)?;
    let languages =
        langs::filter_languages(languages, &options.lang_codes).map_err(GenerateError::Filter)?;
    log::info!(
        "generating {} language(s): {}",
        languages.len(),
        languages
            .iter()
            .map(|l| format!("{}({})", l.display_name, l.code))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let links = LinkSet::new(&languages, &options.output_pattern);
    links.validate()?;
    let template = PageTemplate::load(&paths.template).map_err(GenerateError::Template)?;

    fs::create_dir_all(&paths.output_dir).map_err(|source| GenerateError::OutputDir {
        path: paths.output_dir.clone(),
        source,
    })?;

    let mut report = GenerateReport {
        pages: Vec::with_capacity(languages.len()),
    };

    for language in &languages {
        let ctx = context::build_context(language, &links, &paths.langs_dir, &manifest)
            .map_err(|source| GenerateError::Context {
                code: language.code.clone(),
                source,
            })?;

        let dest = paths.output_dir.join(ctx.output_name());
        template
            .render_to_file(&ctx, &dest)
            .map_err(|source| GenerateError::Render {
                code: language.code.clone(),
                source,
            })?;
        log::debug!("rendered {} -> {}", language.code, dest.display());

        report.pages.push(GeneratedPage {
            code: language.code.clone(),
            display_name: language.display_name.clone(),
            path: dest,
        });
    }

    Ok(report)
}
