//! Template parsing and page rendering.
//!
//! `index.tmpl` is a [minijinja](https://docs.rs/minijinja) template. It is
//! parsed once per run; each language then renders the same template with its
//! own [`RenderContext`].
//!
//! Output is HTML-escaped regardless of the template's file name. `i18n_json`
//! is the one exception: it is passed as a safe string so pages can embed it in
//! a `<script>` block as-is. Undefined names render as empty, so a language file
//! that lacks a key does not fail the build.

use crate::context::RenderContext;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value, context};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
    #[error("cannot create output file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template execution failed: {0}")]
    Execute(#[from] minijinja::Error),
    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),
}

/// A parsed page template.
pub struct PageTemplate {
    env: Environment<'static>,
    name: String,
}

impl PageTemplate {
    /// Parse template `source`; `name` shows up in engine error messages.
    pub fn from_source(name: &str, source: String) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned(name.to_string(), source)?;
        Ok(Self {
            env,
            name: name.to_string(),
        })
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path).map_err(|source| RenderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "template".to_string());
        Self::from_source(&name, source).map_err(|source| RenderError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render into any writer.
    pub fn render_to<W: Write>(&self, ctx: &RenderContext, writer: W) -> Result<(), RenderError> {
        let template = self.env.get_template(&self.name)?;
        template.render_to_write(template_context(ctx), writer)?;
        Ok(())
    }

    pub fn render_to_string(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.render_to(ctx, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Create (or truncate) `dest` and render into it.
    ///
    /// Parent directories are created as needed. On failure the file may be
    /// left partially written.
    pub fn render_to_file(&self, ctx: &RenderContext, dest: &Path) -> Result<(), RenderError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| RenderError::Create {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(dest).map_err(|source| RenderError::Create {
            path: dest.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.render_to(ctx, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn template_context(ctx: &RenderContext) -> Value {
    context! {
        lang => Value::from_serialize(&ctx.lang),
        lang_links => Value::from_serialize(&ctx.lang_links),
        i18n => Value::from_serialize(&ctx.i18n),
        i18n_json => Value::from_safe_string(ctx.i18n_json.clone()),
        base => Value::from_serialize(&ctx.base)
    }
}
