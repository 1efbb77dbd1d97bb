//! MCP (Model Context Protocol) server over stdio.
//!
//! Speaks newline-delimited JSON-RPC 2.0 on stdin/stdout and exposes the two
//! operations as tools:
//!
//! | Tool | Arguments | Calls |
//! |------|-----------|-------|
//! | `multilang_init` | `target_dir` (default `.`) | [`init::initialize`] |
//! | `multilang_gen` | `directory` (default `.`), `output_pattern` (default `{lang}.html`), `lang_codes` (default `[]`) | [`generate::generate`] |
//!
//! Arguments become a fresh [`GenerateOptions`] per call, so one call never
//! sees another call's pattern or filter. Operation failures come back as a
//! normal result with `isError: true`; only malformed requests get a JSON-RPC
//! error object.

use crate::config::{DEFAULT_OUTPUT_PATTERN, GenerateOptions};
use crate::{generate, init, output};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "multilang-gen";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

const INIT_TOOL: &str = "multilang_init";
const GEN_TOOL: &str = "multilang_gen";

#[derive(Error, Debug)]
pub enum McpError {
    #[error("stdio error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot encode response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    /// Absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl Response {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct InitArgs {
    target_dir: String,
}

impl Default for InitArgs {
    fn default() -> Self {
        Self {
            target_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GenArgs {
    directory: String,
    output_pattern: String,
    lang_codes: Vec<String>,
}

impl Default for GenArgs {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            lang_codes: Vec::new(),
        }
    }
}

/// Serve requests from `reader` until EOF, one JSON message per line.
pub fn serve<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<(), McpError> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = handle_line(&line) {
            serde_json::to_writer(&mut writer, &response)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Handle one raw message. Returns `None` for notifications.
pub fn handle_line(line: &str) -> Option<Response> {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Some(Response::error(Value::Null, PARSE_ERROR, e.to_string())),
    };
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<Request>(value) {
        Ok(request) => handle_request(request),
        Err(e) => Some(Response::error(id, INVALID_REQUEST, e.to_string())),
    }
}

pub fn handle_request(request: Request) -> Option<Response> {
    let Some(id) = request.id else {
        log::debug!("notification: {}", request.method);
        return None;
    };
    if request.jsonrpc != JSONRPC_VERSION {
        return Some(Response::error(
            id,
            INVALID_REQUEST,
            format!("unsupported jsonrpc version `{}`", request.jsonrpc),
        ));
    }

    let response = match request.method.as_str() {
        "initialize" => Response::success(id, initialize_result()),
        "ping" => Response::success(id, json!({})),
        "tools/list" => Response::success(id, json!({ "tools": tool_definitions() })),
        "tools/call" => match call_tool(request.params) {
            Ok(result) => Response::success(id, result),
            Err(message) => Response::error(id, INVALID_PARAMS, message),
        },
        other => Response::error(id, METHOD_NOT_FOUND, format!("method not found: {other}")),
    };
    Some(response)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

fn tool_definitions() -> Value {
    json!([
        {
            "name": INIT_TOOL,
            "description": "Initialize a multilingual project template in a directory",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "target_dir": { "type": "string", "description": "Target directory path" },
                },
            },
        },
        {
            "name": GEN_TOOL,
            "description": "Generate one page per language from a project directory",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "directory": { "type": "string", "description": "Project directory path" },
                    "output_pattern": {
                        "type": "string",
                        "description": "Output file name pattern; {lang} is replaced by the language code. Defaults to {lang}.html",
                    },
                    "lang_codes": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Only generate these language codes",
                    },
                },
            },
        },
    ])
}

/// Run a tool. `Err` means the request itself was unusable.
fn call_tool(params: Option<Value>) -> Result<Value, String> {
    let params: CallParams = params
        .ok_or_else(|| "missing params".to_string())
        .and_then(|p| serde_json::from_value(p).map_err(|e| format!("invalid params: {e}")))?;
    let arguments = params.arguments;
    match params.name.as_str() {
        INIT_TOOL => {
            let args: InitArgs = parse_params(arguments)?;
            let target = PathBuf::from(&args.target_dir);
            Ok(match init::initialize(&target) {
                Ok(_) => tool_text(output::format_init_output(&target).join("\n"), false),
                Err(e) => tool_text(format!("Initialization failed: {e}"), true),
            })
        }
        GEN_TOOL => {
            let args: GenArgs = parse_params(arguments)?;
            let options = GenerateOptions::default()
                .with_output_pattern(args.output_pattern)
                .with_lang_codes(args.lang_codes);
            Ok(
                match generate::generate(&PathBuf::from(&args.directory), &options) {
                    Ok(report) => tool_text(
                        output::format_generate_summary(&report, &options).join("\n"),
                        false,
                    ),
                    Err(e) => tool_text(format!("Generation failed: {e}"), true),
                },
            )
        }
        other => Err(format!("unknown tool: {other}")),
    }
}

fn parse_params<T>(params: Option<Value>) -> Result<T, String>
where
    T: for<'de> Deserialize<'de> + Default,
{
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value).map_err(|e| format!("invalid params: {e}")),
    }
}

fn tool_text(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}
