use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

async fn ensure_success(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Request failed: {status} {body}");
    }
    Ok(response)
}

/// Pretty-prints a JSON body; anything else is printed as received.
pub(crate) async fn print_json_response(response: reqwest::Response) -> anyhow::Result<()> {
    let body = ensure_success(response).await?.text().await?;
    if body.trim().is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{body}"),
    }
    Ok(())
}

pub(crate) async fn print_empty_response(
    response: reqwest::Response,
    message: &str,
) -> anyhow::Result<()> {
    ensure_success(response).await?;
    println!("{message}");
    Ok(())
}

pub(crate) async fn save_response_body(
    response: reqwest::Response,
    path: &Path,
) -> anyhow::Result<()> {
    let bytes = ensure_success(response).await?.bytes().await?;
    std::fs::write(path, &bytes)
        .map_err(|err| anyhow::anyhow!("failed to write {}: {err}", path.display()))?;
    debug!(path = %path.display(), size = bytes.len(), "saved response body");
    println!("Saved {}", path.display());
    Ok(())
}

/// Reads an entity payload (JSON) from disk. Callers sending it on to the
/// gateway read it as a `serde_json::Value` so it goes out unchanged.
pub(crate) fn read_payload<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|err| anyhow::anyhow!("invalid payload in {}: {err}", path.display()))
}

pub(crate) fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
