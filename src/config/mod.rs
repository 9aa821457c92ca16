//! Configuration module for prefix-complete
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "PREFIX_COMPLETE_SETTINGS_PATH";

/// Default locations searched for settings.yml, in order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/prefix-complete/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("prefix-complete/settings.yml"));
    }
    paths
}

/// Load settings from an explicit path, the environment, the default
/// locations, or fall back to defaults. Environment overrides apply last.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }
    }

    let from_env = std::env::var(SETTINGS_PATH_ENV).ok().map(PathBuf::from);

    let candidate = explicit
        .map(Path::to_path_buf)
        .or(from_env)
        .into_iter()
        .chain(default_paths())
        .find(|path| path.exists());

    let mut settings = match candidate {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "prefix-complete-settings-{}.yml",
            std::process::id()
        ));
        std::fs::write(&path, "general:\n  instance_name: Test\n").unwrap();

        let settings = load(Some(&path)).unwrap();
        assert_eq!(settings.general.instance_name, "Test");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(load(Some(Path::new("/nonexistent/prefix-complete.yml"))).is_err());
    }
}
