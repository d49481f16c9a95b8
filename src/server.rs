/*!
 * Line-delimited JSON request loop over stdio.
 *
 * Each input line is one request `{"id", "method", "params"}` and produces one
 * response line. Requests are handled one at a time, in arrival order. A
 * request without an `id` is a client notification and gets no response.
 *
 * Two kinds of failure are kept apart:
 * - protocol errors (unknown method, tool or resource, bad parameters) are
 *   returned as an `error` object
 * - tool failures (unreadable document, missing converter) are successful
 *   responses whose text explains the problem and whose `isError` is set
 *
 * Progress of a `translate_text` call is sent as `notifications/progress`
 * lines before its response, when the request carries a progress token.
 */

use anyhow::Result;
use log::{debug, error, info, warn};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app_controller::{Controller, TranslateRequest};
use crate::errors::ProtocolError;
use crate::terminology::{NoProgress, ProgressSink};

/// URI of the loaded-glossaries resource
pub const GLOSSARY_LIST_URI: &str = "glossary://list";

/// URI of the translation statistics resource
pub const STATS_URI: &str = "stats://translation";

#[derive(Debug, Deserialize)]
struct Request {
    // Absent for client notifications; an explicit null is still an id
    #[serde(default, deserialize_with = "present_id")]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

fn present_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    name: String,
    #[serde(default)]
    arguments: Value,
    #[serde(default, rename = "_meta")]
    meta: Option<ToolCallMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToolCallMeta {
    progress_token: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadGlossaryArgs {
    file_path: String,
    #[serde(default)]
    glossary_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    term: String,
    #[serde(default)]
    context_filter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractArgs {
    file_path: String,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// Sends progress for one request as notifications on the output channel
struct NotificationProgress {
    token: Value,
    sender: UnboundedSender<Value>,
}

impl ProgressSink for NotificationProgress {
    fn report(&self, current: u64, total: u64) {
        let notification = json!({
            "method": "notifications/progress",
            "params": {
                "progressToken": self.token,
                "progress": current,
                "total": total,
            }
        });
        // Best effort: a closed channel only means nobody is listening
        let _ = self.sender.send(notification);
    }
}

/// Request handler around a session controller
pub struct Server {
    controller: Controller,
}

impl Server {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    /// The controller serving requests
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Serve requests from stdin until it closes
    pub async fn run_stdio(&self) -> Result<()> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Value>();

        let writer = tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(message) = receiver.recv().await {
                let mut line = message.to_string();
                line.push('\n');
                if let Err(e) = stdout.write_all(line.as_bytes()).await {
                    error!("Failed to write response: {}", e);
                    break;
                }
                let _ = stdout.flush().await;
            }
        });

        info!("Serving requests on stdio");
        let served = self.serve(BufReader::new(tokio::io::stdin()), &sender).await;

        drop(sender);
        writer.await?;
        served?;
        info!("Input closed, shutting down");
        Ok(())
    }

    /// Answer every request line from `reader` until it ends.
    ///
    /// A line that is not valid UTF-8 gets a parse error response like any
    /// other malformed request; only a failing reader stops the loop.
    pub async fn serve<R>(&self, mut reader: R, sender: &UnboundedSender<Value>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer).await? == 0 {
                return Ok(());
            }

            let response = match std::str::from_utf8(&buffer) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line, sender).await,
                Err(e) => {
                    warn!("Request line is not valid UTF-8: {}", e);
                    Some(error_response(Value::Null, &ProtocolError::ParseError(e.to_string())))
                }
            };

            if let Some(response) = response {
                let _ = sender.send(response);
            }
        }
    }

    /// Handle one request line. Notifications from the client get no response.
    pub async fn handle_line(&self, line: &str, notifications: &UnboundedSender<Value>) -> Option<Value> {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => return Some(error_response(Value::Null, &ProtocolError::ParseError(e.to_string()))),
        };

        let id = match request.id {
            Some(id) => id,
            None => {
                debug!("Ignoring client notification '{}'", request.method);
                return None;
            }
        };

        debug!("Request {}: {}", id, request.method);
        let outcome = match request.method.as_str() {
            "tools/list" => Ok(tools_list()),
            "resources/list" => Ok(resources_list()),
            "resources/read" => self.read_resource(request.params),
            "tools/call" => self.call_tool(request.params, notifications).await,
            other => Err(ProtocolError::MethodNotFound(other.to_string())),
        };

        Some(match outcome {
            Ok(result) => json!({ "id": id, "result": result }),
            Err(e) => error_response(id, &e),
        })
    }

    fn read_resource(&self, params: Value) -> Result<Value, ProtocolError> {
        let params: ReadResourceParams = parse_params(params)?;

        let body = match params.uri.as_str() {
            GLOSSARY_LIST_URI => json!({ "glossaries": self.controller.glossaries() }),
            STATS_URI => json!(self.controller.stats()),
            other => return Err(ProtocolError::UnknownResource(other.to_string())),
        };

        Ok(json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": "application/json",
                "text": pretty(&body),
            }]
        }))
    }

    async fn call_tool(&self, params: Value, notifications: &UnboundedSender<Value>) -> Result<Value, ProtocolError> {
        let call: ToolCall = parse_params(params)?;

        match call.name.as_str() {
            "load_glossary" => {
                let args: LoadGlossaryArgs = parse_params(call.arguments)?;
                Ok(match self.controller.load_glossary(&args.file_path, args.glossary_name.as_deref()).await {
                    Ok(report) => tool_text(
                        format!(
                            "Successfully loaded {} entries into glossary '{}'",
                            report.entries_processed, report.glossary_name
                        ),
                        false,
                    ),
                    Err(e) => tool_text(format!("Error loading glossary: {}", e), true),
                })
            }
            "translate_text" => {
                let request: TranslateRequest = parse_params(call.arguments)?;
                let token = call.meta.and_then(|meta| meta.progress_token);
                let result = match token {
                    Some(token) => {
                        let sink = NotificationProgress { token, sender: notifications.clone() };
                        self.controller.translate_text(&request, &sink)
                    }
                    None => self.controller.translate_text(&request, &NoProgress),
                };
                Ok(tool_text(pretty(&json!(result)), false))
            }
            "search_terminology" => {
                let args: SearchArgs = parse_params(call.arguments)?;
                let matches = self
                    .controller
                    .search_terminology(&args.term, args.context_filter.as_deref());
                Ok(tool_text(pretty(&json!(matches)), false))
            }
            "extract_text" => {
                let args: ExtractArgs = parse_params(call.arguments)?;
                Ok(match self.controller.extract_text(&args.file_path).await {
                    Ok(extracted) => tool_text(extracted.text, false),
                    Err(e) => tool_text(format!("Error extracting text: {}", e), true),
                })
            }
            other => Err(ProtocolError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(params).map_err(|e| ProtocolError::InvalidParams(e.to_string()))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn tool_text(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

fn error_response(id: Value, error: &ProtocolError) -> Value {
    json!({
        "id": id,
        "error": { "code": error.code(), "message": error.to_string() }
    })
}

fn tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": "load_glossary",
                "description": "Load a glossary document (text, PDF, word processor or scanned image) under a name, replacing any glossary of that name",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "filePath": { "type": "string" },
                        "glossaryName": { "type": "string" }
                    },
                    "required": ["filePath"]
                }
            },
            {
                "name": "translate_text",
                "description": "Match glossary terminology against a text; the text itself is returned unchanged",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "text": { "type": "string" },
                        "context": { "type": "string" },
                        "useGlossaries": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["text"]
                }
            },
            {
                "name": "search_terminology",
                "description": "Search every loaded glossary for a term, optionally restricted to a context",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "term": { "type": "string" },
                        "contextFilter": { "type": "string" }
                    },
                    "required": ["term"]
                }
            },
            {
                "name": "extract_text",
                "description": "Extract the text of a document; OCR output is cleaned of historical typesetting artifacts",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "filePath": { "type": "string" }
                    },
                    "required": ["filePath"]
                }
            }
        ]
    })
}

fn resources_list() -> Value {
    json!({
        "resources": [
            {
                "uri": GLOSSARY_LIST_URI,
                "name": "Loaded glossaries",
                "mimeType": "application/json"
            },
            {
                "uri": STATS_URI,
                "name": "Translation statistics",
                "mimeType": "application/json"
            }
        ]
    })
}
