//! Project scaffolding.
//!
//! Writes a ready-to-generate project: a manifest, a two-language index with
//! Chinese and English data files, and a starter template that uses every
//! context variable. Existing files with the same names are overwritten.

use crate::config::{LANG_INDEX_FILE, LANGS_DIR, MANIFEST_FILE, Manifest, TEMPLATE_FILE};
use crate::types::Language;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize {0}: {1}")]
    Serialize(&'static str, #[source] serde_json::Error),
}

const STARTER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang.code }}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="{{ base.description }}">
    <meta name="author" content="{{ base.author }}">
    <title>{{ i18n.title }} - {{ base.siteName }}</title>
</head>
<body>
    <header>
        <h1>{{ i18n.title }}</h1>
        <p>{{ i18n.subtitle }}</p>
    </header>

    <nav>
        <strong>{{ i18n.language_switcher }}:</strong>
        {% for link in lang_links %}
        {% if link.current %}
        <span aria-current="page">{{ link.displayName }}</span>
        {% else %}
        <a href="{{ link.url }}" hreflang="{{ link.code }}" title="{{ i18n.switch_to }} {{ link.name }}">{{ link.displayName }}</a>
        {% endif %}
        {% endfor %}
    </nav>

    <main>
        <p>{{ i18n.welcome }}! {{ i18n.description }}</p>

        <h2>{{ i18n.site_info }}</h2>
        <dl>
            <dt>{{ i18n.site_name }}</dt><dd>{{ base.siteName }}</dd>
            <dt>{{ i18n.version }}</dt><dd>{{ base.version }}</dd>
            <dt>{{ i18n.base_url }}</dt><dd>{{ base.baseURL }}</dd>
            <dt>{{ i18n.author }}</dt><dd>{{ base.author }}</dd>
        </dl>

        <h2>{{ i18n.current_language }}</h2>
        <dl>
            <dt>{{ i18n.language_code }}</dt><dd>{{ lang.code }}</dd>
            <dt>{{ i18n.language_name }}</dt><dd>{{ lang.name }}</dd>
        </dl>
    </main>

    <footer>{{ i18n.footer_text }} &middot; {{ base.siteName }} {{ base.version }}</footer>

    <script>
        window.I18N = {{ i18n_json }};
    </script>
</body>
</html>
"#;

/// Files written by [`initialize`], relative to the target directory.
pub const SCAFFOLD_FILES: &[&str] = &[
    MANIFEST_FILE,
    TEMPLATE_FILE,
    "langs/index.json",
    "langs/zh-CN.json",
    "langs/en-US.json",
];

fn scaffold_manifest() -> Manifest {
    Manifest {
        base_url: "https://example.com".into(),
        site_name: "My Website".into(),
        author: "Website Author".into(),
        description: "A multilingual website".into(),
        version: "1.0.0".into(),
    }
}

fn scaffold_languages() -> Vec<Language> {
    vec![
        Language {
            code: "zh".into(),
            name: "中文".into(),
            display_name: "中文".into(),
            data_file: "zh-CN.json".into(),
        },
        Language {
            code: "en".into(),
            name: "English".into(),
            display_name: "English".into(),
            data_file: "en-US.json".into(),
        },
    ]
}

fn zh_data() -> serde_json::Value {
    json!({
        "title": "我的网站",
        "subtitle": "基于模板的多语言网站",
        "description": "这是一个多语言网站示例",
        "welcome": "欢迎使用",
        "language_switcher": "语言切换",
        "switch_to": "切换到",
        "site_info": "站点信息",
        "site_name": "站点名称",
        "version": "版本",
        "base_url": "基础URL",
        "author": "作者",
        "current_language": "当前语言",
        "language_code": "语言代码",
        "language_name": "语言名称",
        "footer_text": "页脚文本"
    })
}

fn en_data() -> serde_json::Value {
    json!({
        "title": "My Website",
        "subtitle": "Template-based multilingual website",
        "description": "This is a multilingual website example",
        "welcome": "Welcome",
        "language_switcher": "Language Switcher",
        "switch_to": "Switch to",
        "site_info": "Site Information",
        "site_name": "Site Name",
        "version": "Version",
        "base_url": "Base URL",
        "author": "Author",
        "current_language": "Current Language",
        "language_code": "Language Code",
        "language_name": "Language Name",
        "footer_text": "Footer Text"
    })
}

/// Write the starter project into `target_dir`, creating it if needed.
///
/// Returns the written paths in [`SCAFFOLD_FILES`] order.
pub fn initialize(target_dir: &Path) -> Result<Vec<PathBuf>, InitError> {
    let langs_dir = target_dir.join(LANGS_DIR);
    fs::create_dir_all(&langs_dir).map_err(|source| InitError::CreateDir {
        path: langs_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(SCAFFOLD_FILES.len());
    written.push(write_json(&target_dir.join(MANIFEST_FILE), "manifest", &scaffold_manifest())?);
    written.push(write_file(&target_dir.join(TEMPLATE_FILE), STARTER_TEMPLATE)?);
    written.push(write_json(
        &langs_dir.join(LANG_INDEX_FILE),
        "language index",
        &scaffold_languages(),
    )?);
    written.push(write_json(&langs_dir.join("zh-CN.json"), "zh-CN data", &zh_data())?);
    written.push(write_json(&langs_dir.join("en-US.json"), "en-US data", &en_data())?);

    log::debug!("initialized project in {}", target_dir.display());
    Ok(written)
}

fn write_json<T: Serialize>(
    path: &Path,
    what: &'static str,
    value: &T,
) -> Result<PathBuf, InitError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| InitError::Serialize(what, e))?;
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<PathBuf, InitError> {
    fs::write(path, content).map_err(|source| InitError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
