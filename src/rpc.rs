//! Exported call surface
//!
//! Exposes the registry queries as named, JSON-invokable methods:
//!
//! | Method         | Params                          | Result                                  |
//! |----------------|---------------------------------|-----------------------------------------|
//! | `extensions`   | `["<bundleId>"]` or `{bundleId}` | `[{id, path, executable, absolutePath}]` |
//! | `main`         | `["<bundleId>"]` or `{bundleId}` | `"<executable>"`                        |
//! | `applications` | none                            | `[{identifier, name, version, build, path}]` |
//!
//! [`Exports::serve`] reads one request object per line and writes one
//! response object per line, in order, until the input ends.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BundlescopeError, Result, rpc};
use crate::registry::{ApplicationRegistry, BundleId, RegistryClient};

/// Method names accepted by [`Exports::call`]
pub const METHODS: &[&str] = &["extensions", "main", "applications"];

/// A single call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    /// Echoed back verbatim in the response
    #[serde(default)]
    pub id: Value,

    pub method: String,

    #[serde(default)]
    pub params: Value,
}

/// Outcome of a single call; exactly one of `result` and `error` is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Diagnostic code, e.g. `bundlescope::registry::not_found`
    pub code: String,
    pub message: String,
}

impl Response {
    fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, err: &BundlescopeError) -> Self {
        Self {
            id,
            result: None,
            error: Some(ErrorBody {
                code: err.code_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Named registry queries over JSON values
pub struct Exports<R> {
    client: RegistryClient<R>,
}

impl<R: ApplicationRegistry> Exports<R> {
    pub fn new(client: RegistryClient<R>) -> Self {
        Self { client }
    }

    /// Invoke `method` with `params`
    pub fn call(&self, method: &str, params: &Value) -> Result<Value> {
        match method {
            "extensions" => {
                let bundle_id = bundle_id_param(params)?;
                Ok(serde_json::to_value(self.client.extensions(&bundle_id)?)?)
            }
            "main" => {
                let bundle_id = bundle_id_param(params)?;
                Ok(Value::String(self.client.main_executable(&bundle_id)?))
            }
            "applications" => Ok(serde_json::to_value(self.client.applications()?)?),
            other => Err(rpc::unknown_method(other)),
        }
    }

    /// Decode and answer one request line
    pub fn handle_line(&self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                let err = rpc::invalid_request(e.to_string());
                tracing::warn!(error = %err, "Rejected request");
                return Response::failure(Value::Null, &err);
            }
        };

        tracing::debug!(method = %request.method, id = %request.id, "Handling request");

        match self.call(&request.method, &request.params) {
            Ok(result) => Response::success(request.id, result),
            Err(err) => {
                tracing::debug!(method = %request.method, error = %err, "Request failed");
                Response::failure(request.id, &err)
            }
        }
    }

    /// Answer line-delimited requests from `input` until it ends
    ///
    /// Lines that are not UTF-8 are answered with an `invalid_request` error
    /// like any other undecodable line. Returns the number of requests answered.
    pub fn serve<I: BufRead, O: Write>(&self, mut input: I, mut output: O) -> Result<usize> {
        let mut answered = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let response = match std::str::from_utf8(trim_line_ending(&buf)) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line),
                Err(e) => {
                    let err = rpc::invalid_request(format!("request is not valid UTF-8: {e}"));
                    tracing::warn!(error = %err, "Rejected request");
                    Response::failure(Value::Null, &err)
                }
            };

            let encoded = serde_json::to_string(&response).map_err(|e| {
                BundlescopeError::IoError {
                    message: format!("Failed to encode response: {e}"),
                }
            })?;

            writeln!(output, "{encoded}")?;
            output.flush()?;
            answered += 1;
        }

        tracing::info!(requests = answered, "Exports server input closed");

        Ok(answered)
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Extract the bundle id from `["<id>"]`, `{"bundleId": "<id>"}` or `"<id>"`
fn bundle_id_param(params: &Value) -> Result<BundleId> {
    let raw = match params {
        Value::Array(items) => items.first().and_then(Value::as_str),
        Value::Object(map) => map.get("bundleId").and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    };

    let raw = raw.ok_or_else(|| {
        rpc::invalid_request("expected params [\"<bundleId>\"] or {\"bundleId\": \"<bundleId>\"}")
    })?;

    BundleId::parse(raw)
}
