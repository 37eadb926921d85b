//! # Preferences
//!
//! Look-and-feel choices that survive restarts: light/dark mode and the
//! background variant. Stored as JSON at `~/.cours/prefs.json`.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Number of background variants the palette offers.
pub const BACKGROUND_COUNT: usize = 4;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub background: usize,
}

impl Preferences {
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn cycle_background(&mut self) {
        self.background = (self.background + 1) % BACKGROUND_COUNT;
    }

    /// Background index, wrapped into range in case the file was hand-edited.
    pub fn background_index(&self) -> usize {
        self.background % BACKGROUND_COUNT
    }
}

/// Returns `~/.cours/prefs.json`.
pub fn prefs_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cours").join("prefs.json"))
}

/// Load preferences from the default location. Never fails.
pub fn load() -> Preferences {
    match prefs_path() {
        Some(path) => load_from(&path),
        None => {
            warn!("Could not determine home directory, using default preferences");
            Preferences::default()
        }
    }
}

/// Load preferences from `path`. Missing or unreadable files give defaults.
pub fn load_from(path: &Path) -> Preferences {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No preferences at {}, using defaults", path.display());
            return Preferences::default();
        }
        Err(e) => {
            warn!("Failed to read preferences {}: {}", path.display(), e);
            return Preferences::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!("Ignoring corrupt preferences {}: {}", path.display(), e);
            Preferences::default()
        }
    }
}

pub fn save(prefs: &Preferences) -> io::Result<()> {
    let path = prefs_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    save_to(&path, prefs)
}

/// Atomically write `prefs` as JSON to `path` (via `.tmp` + rename).
pub fn save_to(path: &Path, prefs: &Preferences) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(prefs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    debug!("Saved preferences to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cours-prefs-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_toggle_and_cycle() {
        let mut prefs = Preferences::default();
        prefs.toggle_theme();
        assert_eq!(prefs.theme, ThemeMode::Dark);
        prefs.toggle_theme();
        assert_eq!(prefs.theme, ThemeMode::Light);

        for _ in 0..BACKGROUND_COUNT {
            prefs.cycle_background();
        }
        assert_eq!(prefs.background, 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("prefs.json");
        let prefs = Preferences {
            theme: ThemeMode::Dark,
            background: 2,
        };
        save_to(&path, &prefs).unwrap();
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(load_from(&path), prefs);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        assert_eq!(load_from(&dir.join("prefs.json")), Preferences::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_from(&path), Preferences::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_sparse_file_fills_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(prefs.theme, ThemeMode::Dark);
        assert_eq!(prefs.background, 0);
    }

    #[test]
    fn test_out_of_range_background_wraps() {
        let prefs = Preferences {
            theme: ThemeMode::Light,
            background: BACKGROUND_COUNT + 1,
        };
        assert_eq!(prefs.background_index(), 1);
    }
}
