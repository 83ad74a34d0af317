use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "fixboard.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub min_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub bar_width: usize,
    /// Visual track maximum for the penalty bar; larger penalties pin at full.
    pub penalty_bar_max: u64,
    pub summary_placeholder: String,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: 30,
            penalty_bar_max: 40,
            summary_placeholder: "no details".to_string(),
            color: true,
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
            source: Some(local_path),
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_local_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = load_config(None, dir.path()).expect("defaults");
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.display.bar_width, 30);
        assert_eq!(loaded.config.general.min_score, 0);
    }

    #[test]
    fn partial_config_keeps_defaults_for_other_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[general]\nmin_score = 90\n\n[display]\nbar_width = 12\n",
        )
        .expect("write config");

        let loaded = load_config(None, dir.path()).expect("config loads");
        assert_eq!(loaded.config.general.min_score, 90);
        assert!(!loaded.config.general.json);
        assert_eq!(loaded.config.display.bar_width, 12);
        assert_eq!(loaded.config.display.penalty_bar_max, 40);
        assert_eq!(loaded.config.display.summary_placeholder, "no details");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing), dir.path()).expect_err("missing config");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn default_config_round_trips_and_refuses_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path).expect("first write");
        assert!(write_default_config(&path).is_err());

        let loaded = load_config(Some(&path), dir.path()).expect("written config loads");
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert!(loaded.config.display.color);
    }

    #[test]
    fn malformed_config_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[display]\nbar_width = \"wide\"\n").expect("write config");
        let err = load_config(None, dir.path()).expect_err("bad type");
        assert!(format!("{err:#}").contains("failed parsing config file"));
    }
}
