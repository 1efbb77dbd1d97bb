//! # multilang-gen
//!
//! Render one static page per language from a single template.
//!
//! A project is a template, an ordered list of languages, one JSON data file
//! per language, and an optional site manifest. `generate` renders the
//! template once for each language and writes `outputs/<pattern>`, where the
//! pattern's `{lang}` is replaced by the language code. Every page gets the
//! same navigation list with its own entry marked current.
//!
//! # Pipeline
//!
//! ```text
//! langs/index.json → filter → LinkSet ──┐
//! manifest.json ────────────────────────┼→ RenderContext → PageTemplate → outputs/
//! langs/<file>.json (per language) ─────┘
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Project layout, `GenerateOptions`, and the site manifest |
//! | [`langs`] | Language index loading, code filtering, per-language data loading |
//! | [`context`] | Link set and per-language render context |
//! | [`render`] | Template parsing and rendering with minijinja |
//! | [`generate`] | The pipeline: validate, load, render every language |
//! | [`init`] | Starter project scaffolding |
//! | [`output`] | Result formatting for the CLI and the MCP server |
//! | [`mcp`] | JSON-RPC stdio server exposing `init` and `gen` as tools |
//! | [`types`] | `Language` and `LanguageLink` |
//!
//! # Design Decisions
//!
//! ## Options Are Parameters
//!
//! The output pattern and the language filter travel in [`GenerateOptions`].
//! The CLI and the MCP server each build their own per call, so concurrent or
//! successive calls cannot see each other's settings.
//!
//! ## Schema-less Language Data
//!
//! Language files are kept as `serde_json::Map`. The template decides which
//! keys matter; a missing key renders as empty instead of failing.
//!
//! ## Stable Navigation Order
//!
//! Links are always listed in index order (after filtering), never in hash
//! order, so regenerating a site produces identical files.
//!
//! ## Fail Fast, Validate First
//!
//! Everything that can be checked without rendering (inputs exist, index is
//! valid and non-empty, requested codes exist, template parses) is checked
//! before the output directory is touched. Rendering stops at the first
//! failing language; pages already written are left in place.

pub mod config;
pub mod context;
pub mod generate;
pub mod init;
pub mod langs;
pub mod mcp;
pub mod output;
pub mod render;
pub mod types;

pub use config::{GenerateOptions, Manifest};
pub use generate::{GenerateError, GenerateReport, generate};
pub use init::initialize;

#[cfg(test)]
pub(crate) mod test_helpers;
