//! Shared test utilities for integration tests

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;

/// Writes a lesson module to `<dir>/<name>.json`
pub fn write_module(dir: &TempDir, name: &str, module: &Value) -> PathBuf {
    let path = dir.path().join(format!("{}.json", name));
    fs::write(&path, serde_json::to_string_pretty(module).expect("serialize module"))
        .expect("Failed to write module file");
    path
}

/// Midday UTC on the given day of 2024
pub fn day_2024(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0)
        .single()
        .expect("valid date")
}
