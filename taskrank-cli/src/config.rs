use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taskrank_core::{ScoringWeights, SortStrategy};

use crate::state::{ensure_taskrank_home, taskrank_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSection,
    pub scoring: ScoringWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// IANA timezone used to decide what "today" is when `--today` is not given.
    pub timezone: String,
    pub default_strategy: SortStrategy,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            default_strategy: SortStrategy::Smart,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(taskrank_home()?.join("config.toml"))
}

/// Load `~/.taskrank/config.toml`; a missing file means defaults.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_taskrank_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.scoring.importance, 6.0);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.general.timezone = "America/Chicago".to_string();
        cfg.general.default_strategy = SortStrategy::Deadline;
        cfg.scoring.quick_win_bonus = 20.0;
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[scoring]\ndependency_blocker = 35.0\n").unwrap();
        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.scoring.dependency_blocker, 35.0);
        assert_eq!(cfg.scoring.urgency_close, 40.0);
        assert_eq!(cfg.general.timezone, "UTC");
    }

    #[test]
    fn bad_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[scoring\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
