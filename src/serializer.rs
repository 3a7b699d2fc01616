//! Rendering of audit results: the manifest artifact, the scan report and the console table.

use crate::extractor::{RouteEntry, ScanEntry};
use crate::manifest::RouteManifest;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// First line of the generated manifest.
pub const MANIFEST_BANNER: &str = "// AUTO-GENERATED — do not edit by hand";

/// Renders the manifest as a JavaScript module exporting a `ROUTES` constant.
///
/// The object literal is pretty-printed JSON, so it stays valid for any JSON or
/// JavaScript consumer.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_manifest(manifest: &RouteManifest) -> Result<String> {
    debug!("Rendering manifest with {} handlers", manifest.len());
    let object = serde_json::to_string_pretty(manifest)
        .context("Failed to serialize route manifest to JSON")?;
    Ok(format!(
        "{}\nexport const ROUTES = {};\n",
        MANIFEST_BANNER, object
    ))
}

/// Serializes the scan report as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_scan_json(entries: &[ScanEntry]) -> Result<String> {
    debug!("Serializing {} scan entries to JSON", entries.len());
    serde_json::to_string_pretty(entries).context("Failed to serialize scan report to JSON")
}

/// Serializes the scan report as a YAML sequence.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_scan_yaml(entries: &[ScanEntry]) -> Result<String> {
    debug!("Serializing {} scan entries to YAML", entries.len());
    serde_yaml::to_string(entries).context("Failed to serialize scan report to YAML")
}

/// Renders the route table printed to standard output, one row per route in discovery order.
pub fn render_table(routes: &[RouteEntry]) -> String {
    let mut table = String::from(
        "URL | Method Name | HTTP Method | \"file:line\" | Uses AuthContext\n\
         --- | ----------- | ----------- | ------------ | ---------------\n",
    );
    for route in routes {
        table.push_str(&format!(
            "{} | {} | {} | \"{}\" | {}\n",
            route.url, route.handler_name, route.method, route.location, route.uses_auth_context
        ));
    }
    table
}

/// Writes string content to a file, creating parent directories and overwriting any
/// existing file.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
