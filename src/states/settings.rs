//! Demo Settings
//!
//! Persisted settings shared by the demo applications: locale, control size,
//! virtualization toggle and the photo list endpoint.

use crate::components::select::SelectSize;
use crate::constants::DEFAULT_PHOTOS_URL;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;
use crate::i18n::Locale;
use gpui::{App, Global, SharedString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};

const CONFIG_FILE_NAME: &str = "select-kit.toml";

fn get_config_path() -> Result<PathBuf> {
    let config_dir = get_or_create_config_dir()?;
    let path = config_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        std::fs::write(&path, "")?;
    }
    Ok(path)
}

/// Persisted demo settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoSettings {
    locale: Option<String>,
    photos_url: Option<String>,
    size: Option<SelectSize>,
    enable_virtual: Option<bool>,
}

impl DemoSettings {
    /// Load settings from the config file
    pub fn try_load() -> Result<Self> {
        let path = get_config_path()?;
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(&path)?;

        let mut settings = Self::parse(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })?;

        // Detect system locale if not set
        if settings.locale.as_ref().is_none_or(|l| l.is_empty()) {
            let system = locale_config::Locale::current().to_string();
            if let Some(lang) = system.split(['-', ',']).next().filter(|l| !l.is_empty()) {
                settings.locale = Some(lang.to_string());
            }
        }

        Ok(settings)
    }

    /// Parse settings from TOML text. Blank text yields defaults.
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(toml::from_str(value)?)
    }

    /// Create new default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Save settings to the config file
    pub fn save(&self) -> Result<()> {
        let path = get_config_path()?;
        std::fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    // ==================== Getters ====================

    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::from_code)
            .unwrap_or_default()
    }

    pub fn photos_url(&self) -> &str {
        self.photos_url.as_deref().unwrap_or(DEFAULT_PHOTOS_URL)
    }

    pub fn size(&self) -> SelectSize {
        self.size.unwrap_or_default()
    }

    pub fn enable_virtual(&self) -> bool {
        self.enable_virtual.unwrap_or(true)
    }

    // ==================== Setters ====================

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = Some(locale.code().to_string());
    }

    pub fn set_size(&mut self, size: SelectSize) {
        self.size = Some(size);
    }

    pub fn set_enable_virtual(&mut self, enable_virtual: bool) {
        self.enable_virtual = Some(enable_virtual);
    }
}

impl Global for DemoSettings {}

/// Translate `key` with the locale of the global settings
pub fn tr(cx: &App, key: &str) -> SharedString {
    let locale = cx
        .try_global::<DemoSettings>()
        .map(DemoSettings::locale)
        .unwrap_or_default();
    crate::i18n::t(locale, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_file_gives_defaults() {
        let settings = DemoSettings::parse("  \n").expect("parse failed");
        assert_eq!(settings, DemoSettings::new());
        assert_eq!(settings.photos_url(), DEFAULT_PHOTOS_URL);
        assert_eq!(settings.size(), SelectSize::Medium);
        assert!(settings.enable_virtual());
        assert_eq!(settings.locale(), Locale::Az);
    }

    #[test]
    fn test_parse_all_keys() {
        let text = r#"
locale = "en"
photos_url = "http://localhost:8080/photos"
size = "sm"
enable_virtual = false
"#;
        let settings = DemoSettings::parse(text).expect("parse failed");
        assert_eq!(settings.locale(), Locale::En);
        assert_eq!(settings.photos_url(), "http://localhost:8080/photos");
        assert_eq!(settings.size(), SelectSize::Small);
        assert!(!settings.enable_virtual());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(DemoSettings::parse("size = [").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut settings = DemoSettings::new();
        settings.set_locale(Locale::En);
        settings.set_size(SelectSize::Large);
        settings.set_enable_virtual(false);

        let text = toml::to_string(&settings).expect("serialize failed");
        let parsed = DemoSettings::parse(&text).expect("parse failed");
        assert_eq!(parsed, settings);
    }
}
