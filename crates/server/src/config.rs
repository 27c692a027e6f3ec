use std::{collections::HashMap, fs, path::PathBuf};

use tracing::warn;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub data_path: PathBuf,
    pub page_title: String,
    pub heading: String,
    pub favicon_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8501".into(),
            data_path: PathBuf::from("./data/agenda.csv"),
            page_title: "Speech Information - ILAS2025".into(),
            heading: "ILAS2025 Talk Information".into(),
            favicon_path: Some(PathBuf::from("./data/favicon.ico")),
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml`, then environment; later sources win.
pub(crate) fn settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("data_path") {
                    settings.data_path = PathBuf::from(v);
                }
                if let Some(v) = file_cfg.get("page_title") {
                    settings.page_title = v.clone();
                }
                if let Some(v) = file_cfg.get("heading") {
                    settings.heading = v.clone();
                }
                if let Some(v) = file_cfg.get("favicon_path") {
                    settings.favicon_path = optional_path(v);
                }
            }
            Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unparseable settings file"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("AGENDA_DATA") {
        settings.data_path = PathBuf::from(v);
    }
    if let Some(v) = env("APP__DATA_PATH") {
        settings.data_path = PathBuf::from(v);
    }

    if let Some(v) = env("APP__PAGE_TITLE") {
        settings.page_title = v;
    }
    if let Some(v) = env("APP__HEADING") {
        settings.heading = v;
    }
    if let Some(v) = env("APP__FAVICON_PATH") {
        settings.favicon_path = optional_path(&v);
    }

    settings
}

/// An empty value switches the favicon off.
fn optional_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
