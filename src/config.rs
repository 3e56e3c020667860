use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;

use crate::models::Config;
use crate::roster::Roster;

pub fn load_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    validate(&config).with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

/// Check what serde cannot: the timezone name and the activity seed.
pub fn validate(config: &Config) -> Result<()> {
    school_timezone(config)?;
    Roster::from_seed(&config.activities)?;
    Ok(())
}

pub fn school_timezone(config: &Config) -> Result<Tz> {
    config
        .school
        .timezone
        .parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("Unknown timezone '{}': {}", config.school.timezone, e))
}
