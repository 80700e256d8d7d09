//! TOML arena configuration. Missing tables and keys fall back to the built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use arena_core::ArenaConfig;

pub fn load_config(path: Option<&Path>) -> Result<ArenaConfig> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            parse_config(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };
    config.validate().context("Arena config is invalid")?;
    Ok(config)
}

fn parse_config(raw: &str) -> Result<ArenaConfig> {
    Ok(toml::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = parse_config(
            "frame_dt = 0.02\n\n[autonomous]\ncount = 3\n\n[projectile]\nmax_bounces = 5\n",
        )
        .unwrap();
        let defaults = ArenaConfig::default();

        assert_eq!(config.frame_dt, 0.02);
        assert_eq!(config.autonomous.count, 3);
        assert_eq!(config.projectile.max_bounces, 5);
        assert_eq!(config.maze, defaults.maze);
        assert_eq!(config.ai, defaults.ai);
    }

    #[test]
    fn absent_path_yields_defaults() {
        assert_eq!(load_config(None).unwrap(), ArenaConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected_after_parsing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        fs::write(&path, "[projectile]\nmax_bounces = 0\n").unwrap();

        let error = load_config(Some(&path)).unwrap_err();
        assert!(format!("{error:#}").contains("invalid"), "{error:#}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let error = load_config(Some(&path)).unwrap_err();
        assert!(error.to_string().contains("nope.toml"));
    }
}
