//! Workbench configuration, persisted as a JSON settings file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_DIR: &str = ".outliner";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Scheme under which body buffers are addressed.
    pub body_scheme: String,
    /// Coalescing window for buffer change notifications, milliseconds.
    pub change_debounce_ms: u64,
    /// Whether defensive flushes also request a durable host save.
    pub save_on_flush: bool,
    /// Document made active at startup.
    pub startup_document: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            body_scheme: crate::host::BODY_SCHEME.to_string(),
            change_debounce_ms: 5,
            save_on_flush: true,
            startup_document: 0,
        }
    }
}

impl WorkbenchConfig {
    pub fn change_debounce(&self) -> Duration {
        Duration::from_millis(self.change_debounce_ms)
    }
}

pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&WorkbenchConfig::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, content)?;
    }
    Ok(path)
}

pub fn load_settings() -> Option<WorkbenchConfig> {
    load_from(&settings_path()?)
}

pub fn load_from(path: &Path) -> Option<WorkbenchConfig> {
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config"));
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WorkbenchConfig::default();
        assert_eq!(config.body_scheme, "outline");
        assert_eq!(config.change_debounce(), Duration::from_millis(5));
        assert!(config.save_on_flush);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let config: WorkbenchConfig =
            serde_json::from_str(r#"{ "save_on_flush": false }"#).unwrap();
        assert!(!config.save_on_flush);
        assert_eq!(config.body_scheme, "outline");
    }

    #[test]
    fn load_from_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let mut config = WorkbenchConfig::default();
        config.change_debounce_ms = 20;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.change_debounce_ms, 20);
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("absent.json")).is_none());
    }
}
