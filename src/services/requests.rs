//! Server requests issued on behalf of the listing
//!
//! Requests are shell commands built from a configurable template (curl by
//! default), the same way the rest of the application shells out.

use crate::model::action_panel::delete_endpoint;
use crate::model::table::RecordKey;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Request template used when none is configured
pub const DEFAULT_REQUEST_COMMAND: &str = "curl -fsS -X POST {url}";

/// Logout form action
pub const LOGOUT_PATH: &str = "/accounts/logout/";

/// Form for logging new hours
pub const ADD_PATH: &str = "/add/";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to start request: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("request rejected by server (exit status {0:?})")]
    Rejected(Option<i32>),
}

/// Join the configured base URL and a server path
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Quote a value for `sh -c`
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Substitute `{url}` and `{pk}` into a request template
pub fn build_request_command(template: &str, url: &str, key: Option<&RecordKey>) -> String {
    let template = if template.trim().is_empty() {
        DEFAULT_REQUEST_COMMAND
    } else {
        template
    };
    let pk = key.map(RecordKey::as_str).unwrap_or("");
    template
        .replace("{url}", &shell_quote(url))
        .replace("{pk}", &shell_quote(pk))
}

/// Full command deleting the record addressed by `key`
pub fn build_delete_command(template: &str, base_url: &str, key: Option<&RecordKey>) -> String {
    let url = absolute_url(base_url, &delete_endpoint(key));
    build_request_command(template, &url, key)
}

/// Full command submitting the logout form
pub fn build_logout_command(template: &str, base_url: &str) -> String {
    build_request_command(template, &absolute_url(base_url, LOGOUT_PATH), None)
}

/// Run a request command to completion; exit status 0 means success
pub fn run_request(command: &str) -> Result<(), RequestError> {
    #[cfg(target_os = "windows")]
    let status = Command::new("cmd")
        .args(["/C", command])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    #[cfg(not(target_os = "windows"))]
    let status = Command::new("sh")
        .args(["-c", command])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(RequestError::Rejected(status.code()))
    }
}
