use clap::{Parser, Subcommand};
use multilang_gen::config::DEFAULT_OUTPUT_PATTERN;
use multilang_gen::{GenerateOptions, generate, init, mcp, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multilang-gen")]
#[command(about = "Multilingual page generator")]
#[command(long_about = "\
Multilingual page generator

Renders one page per language from a single template, per-language JSON
data, and an optional site manifest.

Project structure:

  project/
  ├── index.tmpl          # minijinja template (required)
  ├── manifest.json       # Site metadata (optional)
  ├── langs/
  │   ├── index.json      # Ordered language list (required)
  │   ├── zh-CN.json      # Language data, one file per language
  │   └── en-US.json
  └── outputs/            # Generated pages

Template variables:
  lang         current language (code, name, displayName, url, current)
  lang_links   every language, in index order, current one flagged
  i18n         the current language's data
  i18n_json    the same data as JSON, for <script> blocks
  base         site manifest (baseURL, siteName, author, description, version)

Run 'multilang-gen init my-site' to create a starter project.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one page per language from a project directory
    Gen {
        /// Project directory
        #[arg(default_value = ".")]
        directory: PathBuf,

        /// Output file name pattern; {lang} is replaced by the language code
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATTERN)]
        output: String,

        /// Only generate these languages (comma-separated or repeated)
        #[arg(short, long = "lang", value_delimiter = ',')]
        lang: Vec<String>,
    },
    /// Create a starter project
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        target_dir: PathBuf,
    },
    /// Serve `init` and `gen` as MCP tools over stdio
    Mcp,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(&cli.command);

    match cli.command {
        Command::Gen {
            directory,
            output: pattern,
            lang,
        } => {
            let options = GenerateOptions::default()
                .with_output_pattern(pattern)
                .with_lang_codes(lang);
            let report = generate(&directory, &options)?;
            output::print_generate_output(&report);
        }
        Command::Init { target_dir } => {
            init::initialize(&target_dir)?;
            output::print_init_output(&target_dir);
        }
        Command::Mcp => {
            let stdin = std::io::stdin();
            mcp::serve(stdin.lock(), std::io::stdout())?;
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
///
/// The MCP server owns stdout for protocol traffic, so it only logs errors.
fn init_logger(command: &Command) {
    let default_level = match command {
        Command::Mcp => "error",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
