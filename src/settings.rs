use crate::core::{AppError, Result};
use crate::ui::core::style::{Color, Style};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_DIR: &str = ".fjira";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

const DEFAULT_BACKGROUND: Color = Color::Rgb(22, 22, 22);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps: u32,
    pub background: String,
    pub loading_text: String,
    pub spinner: SpinnerSettings,
    pub key_dispatch: KeyDispatchSettings,
    pub error_bar_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerSettings {
    pub frames: Vec<String>,
    pub ticks_per_frame: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyDispatchSettings {
    pub workers: usize,
    pub max_in_flight: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 30,
            background: "#161616".to_string(),
            loading_text: "Fetching".to_string(),
            spinner: SpinnerSettings::default(),
            key_dispatch: KeyDispatchSettings::default(),
            error_bar_ticks: 90,
        }
    }
}

impl Default for SpinnerSettings {
    fn default() -> Self {
        Self {
            frames: ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ticks_per_frame: 3,
        }
    }
}

impl Default for KeyDispatchSettings {
    fn default() -> Self {
        Self {
            workers: 2,
            max_in_flight: 64,
        }
    }
}

impl Settings {
    /// Bring out-of-range values back to something the runtime can use.
    pub fn normalized(mut self) -> Self {
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        self.spinner.ticks_per_frame = self.spinner.ticks_per_frame.max(1);
        if self.spinner.frames.is_empty() {
            self.spinner.frames = SpinnerSettings::default().frames;
        }
        self.key_dispatch.workers = self.key_dispatch.workers.max(1);
        self.key_dispatch.max_in_flight = self.key_dispatch.max_in_flight.max(1);
        self
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.fps.clamp(MIN_FPS, MAX_FPS)
    }

    /// Unparseable colors fall back to the stock dark background.
    pub fn background_color(&self) -> Color {
        Color::parse(&self.background).unwrap_or(DEFAULT_BACKGROUND)
    }

    pub fn background_style(&self) -> Style {
        Style::default().bg(self.background_color())
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

/// Write the defaults to `path` unless a file is already there.
pub fn ensure_settings_file_at(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn load_settings() -> Result<Settings> {
    let path = get_settings_path()
        .ok_or_else(|| AppError::Settings("cannot determine settings directory".to_string()))?;
    load_settings_from(&path)
}

/// A missing file yields the defaults; a malformed one is an error.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(err) => return Err(err.into()),
    };
    let settings: Settings = serde_json::from_str(&data)?;
    Ok(settings.normalized())
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
