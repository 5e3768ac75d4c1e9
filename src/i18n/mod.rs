//! i18n - Internationalization Module
//!
//! Provides simple translation functions using HashMap-based lookups.

use std::collections::HashMap;
use std::sync::OnceLock;

use gpui::SharedString;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Azerbaijani
    #[default]
    Az,
    /// English
    En,
}

impl Locale {
    /// Parse a language code such as `az`, `en` or `en-US`. Unknown codes fall back to the default.
    pub fn from_code(code: &str) -> Self {
        let lang = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Locale::En,
            _ => Locale::Az,
        }
    }

    /// Short language code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Az => "az",
            Locale::En => "en",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Az => "Azərbaycanca",
            Locale::En => "English",
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> = OnceLock::new();

/// Initialize translations (key -> (az, en))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // Select control
    map.insert("select-placeholder", ("Seçin", "Select"));
    map.insert("select-search-placeholder", ("Axtar", "Search"));
    map.insert("select-empty", ("Seçim yoxdur", "No options"));
    map.insert("select-clear", ("Təmizlə", "Clear"));

    // Demos
    map.insert("demo-none", ("Heç nə seçilməyib", "Nothing selected"));
    map.insert("demo-value", ("Dəyər", "Value"));

    // Photos demo
    map.insert("photos-title", ("Şəkillər", "Photos"));
    map.insert("photos-placeholder", ("Şəkil seçin", "Choose photos"));
    map.insert("photos-loading", ("Yüklənir...", "Loading..."));
    map.insert("photos-selected", ("Seçilmiş şəkillər", "Selected photos"));

    // Demo settings
    map.insert("settings-size", ("Ölçü", "Size"));
    map.insert("settings-virtual", ("Virtual siyahı", "Virtual list"));
    map.insert("settings-language", ("Dil", "Language"));

    // Languages demo
    map.insert("languages-title", ("Dillər", "Languages"));
    map.insert("languages-primary", ("Əsas dil", "Primary language"));
    map.insert("languages-spoken", ("Danışdığınız dillər", "Spoken languages"));
    map.insert("languages-placeholder", ("Dil seçin", "Choose a language"));
    map.insert("languages-level", ("Səviyyə", "Level"));

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> SharedString {
    if let Some(&(az, en)) = translations().get(key) {
        match locale {
            Locale::Az => SharedString::from(az),
            Locale::En => SharedString::from(en),
        }
    } else {
        // Fallback: return the key itself
        SharedString::from(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_code() {
        assert_eq!(Locale::from_code("en"), Locale::En);
        assert_eq!(Locale::from_code("en-US"), Locale::En);
        assert_eq!(Locale::from_code("EN_gb"), Locale::En);
        assert_eq!(Locale::from_code("az"), Locale::Az);
        assert_eq!(Locale::from_code("fr"), Locale::Az);
        assert_eq!(Locale::from_code(""), Locale::Az);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Locale::Az.display_name(), "Azərbaycanca");
        assert_eq!(Locale::En.display_name(), "English");
    }

    #[test]
    fn test_translate_known_key() {
        assert_eq!(t(Locale::Az, "select-placeholder").to_string(), "Seçin");
        assert_eq!(t(Locale::En, "select-empty").to_string(), "No options");
    }

    #[test]
    fn test_translate_unknown_key_falls_back() {
        assert_eq!(t(Locale::En, "no-such-key").to_string(), "no-such-key");
    }
}
