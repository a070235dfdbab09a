use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$TASKRANK_HOME`, else `~/.taskrank`.
pub fn taskrank_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TASKRANK_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".taskrank"))
}

pub fn ensure_taskrank_home() -> Result<PathBuf> {
    let dir = taskrank_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
