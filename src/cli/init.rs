//! Init command implementation

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use studyloop::config::Config;

/// Default configuration content for studyloop init
pub const DEFAULT_CONFIG: &str = r#"# studyloop configuration
# =======================

# ============================================================================
# STREAKS - Consecutive-day learning streaks and streak badges
# ============================================================================
#
#   day_boundary        - Where a day ends: "utc" (default), "local", or "offset"
#   utc_offset_minutes  - Offset from UTC when day_boundary = "offset" (e.g. 120, -300)

[streak]
day_boundary = "utc"
utc_offset_minutes = 0

# Badges are awarded when a streak reaches EXACTLY `days`.
# A streak that skips past a threshold does not earn it later.

[[streak.badges]]
days = 3
badge = "streak-3"

[[streak.badges]]
days = 5
badge = "streak-5"

[[streak.badges]]
days = 7
badge = "streak-7"

[[streak.badges]]
days = 14
badge = "streak-14"

[[streak.badges]]
days = 30
badge = "streak-30"

# ============================================================================
# SANITIZER - HTML allow-list
# ============================================================================
#
# Tags kept when sanitizing HTML content. All attributes are removed.
# `script` and `style` are always dropped together with their contents
# and cannot be allowed.

[sanitizer]
allowed_tags = ["p", "br", "strong", "em", "code", "pre", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6"]

# ============================================================================
# STORAGE
# ============================================================================
#
#   database - Progress database path (default: ~/.studyloop/progress.db)

[storage]
# database = "/var/lib/studyloop/progress.db"
"#;

/// Write a default config to `config_path` or `<work_dir>/.studyloop/config.toml`
pub async fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| work_dir.join(".studyloop").join("config.toml"));

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::save_raw(&config_path, DEFAULT_CONFIG)?;
    info!(path = %config_path.display(), "Wrote default configuration");
    println!("Created: {}", config_path.display());

    Ok(())
}
