use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use yansi::Paint;

use crate::config;
use crate::error::SeedError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Build the shared HTTP client: fixed user-agent, 5 second per-request timeout.
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(config::USER_AGENT)
        .timeout(config::REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Echo the outgoing request as a copy-pasteable curl command line.
fn log_request(method: &str, url: &str, body: Option<&Value>) {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));
    if body.is_some() {
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
    }
    if let Some(b) = body {
        let json_str = serde_json::to_string(b).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    log_output(parts.join(" "));
}

/// GET `url`. Fails on connect errors, timeouts and 4xx/5xx statuses alike.
/// With `verbose` a success line is printed.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    verbose: bool,
) -> Result<reqwest::Response, SeedError> {
    log_request("GET", url, None);
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| SeedError::Network(e.to_string()))?;
    let resp = resp
        .error_for_status()
        .map_err(|e| SeedError::from_reqwest(e, url))?;
    if verbose {
        log_output(
            Paint::new(format!("OK ({} response): {}", resp.status().as_u16(), url))
                .green()
                .to_string(),
        );
    }
    Ok(resp)
}

/// POST a JSON `body` to `url`. On success prints a confirmation; on any
/// failure prints the error and propagates it to the caller (logged, never
/// swallowed here).
pub async fn submit(
    client: &reqwest::Client,
    url: &str,
    body: &Value,
) -> Result<reqwest::Response, SeedError> {
    log_request("POST", url, Some(body));
    let result = async {
        let resp = client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SeedError::Network(e.to_string()))?;
        resp.error_for_status()
            .map_err(|e| SeedError::from_reqwest(e, url))
    }
    .await;

    match result {
        Ok(resp) => {
            log_output(
                Paint::new(format!(
                    "+ Status OK ({} response): {}",
                    resp.status().as_u16(),
                    url
                ))
                .green()
                .to_string(),
            );
            Ok(resp)
        }
        Err(e) => {
            println!("{}", Paint::new(format!("+ Error: {}", e)).red());
            Err(e)
        }
    }
}
