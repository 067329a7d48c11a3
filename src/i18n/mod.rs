//! Internationalization module
//!
//! Provides labels in English (en) and Traditional Chinese (zh-TW).
//! Supports automatic language detection based on system locale.

mod en;
mod zh_tw;

use std::collections::HashMap;

/// Internationalization manager
pub struct I18n {
    current_lang: String,
    translations: HashMap<String, String>,
}

impl I18n {
    /// Create a new I18n instance with the specified language
    pub fn new(lang: &str) -> Self {
        let mut i18n = Self {
            current_lang: String::new(),
            translations: HashMap::new(),
        };
        i18n.set_language(lang);
        i18n
    }

    /// Set the current language
    pub fn set_language(&mut self, lang: &str) {
        let lang = if lang == "auto" {
            Self::detect_system_language()
        } else {
            lang.to_string()
        };

        self.translations = match lang.as_str() {
            "zh-TW" => zh_tw::get_translations(),
            _ => en::get_translations(),
        };
        self.current_lang = if lang == "zh-TW" { lang } else { "en".to_string() };

        log::info!("Language set to: {}", self.current_lang);
    }

    /// Get a translated string by key
    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Get a translated string with `{name}` placeholders filled in
    pub fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        args.iter().fold(self.get(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    /// Get the current language code
    pub fn current_language(&self) -> &str {
        &self.current_lang
    }

    /// Detect system language
    fn detect_system_language() -> String {
        let lang_env = std::env::var("LANG")
            .or_else(|_| std::env::var("LC_ALL"))
            .or_else(|_| std::env::var("LC_MESSAGES"))
            .unwrap_or_else(|_| "en".to_string());

        // "zh_TW.UTF-8" -> "zh_TW"
        let locale = lang_env.split('.').next().unwrap_or("en");

        match locale {
            "zh_TW" | "zh_HK" | "zh-TW" => "zh-TW".to_string(),
            _ => "en".to_string(),
        }
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_languages() {
        let en = I18n::new("en");
        assert_eq!(en.current_language(), "en");
        assert_eq!(en.get("weekday.mon"), "Mon");

        let zh = I18n::new("zh-TW");
        assert_eq!(zh.current_language(), "zh-TW");
        assert_eq!(zh.get("weekday.mon"), "\u{9031}\u{4E00}");
        assert_eq!(zh.get("series.usage"), "\u{7528}\u{96FB}\u{91CF}");
        assert_eq!(zh.get("unit.kilowatt_hours"), en.get("unit.kilowatt_hours"));
        assert_ne!(zh.get("app.title"), en.get("app.title"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let i18n = I18n::new("fr");
        assert_eq!(i18n.current_language(), "en");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let i18n = I18n::new("en");
        assert_eq!(i18n.get("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_format_placeholders() {
        let i18n = I18n::new("en");
        let label = i18n.format(
            "peak.hour_range",
            &[("start", "18".to_string()), ("end", "19".to_string())],
        );
        assert_eq!(label, "18:00 - 19:00");

        let zh = I18n::new("zh-TW");
        assert_eq!(zh.format("series.day", &[("day", "3".to_string())]), "3\u{65E5}");
    }

    #[test]
    fn test_tables_have_same_keys() {
        let en = en::get_translations();
        let zh = zh_tw::get_translations();
        for key in en.keys() {
            assert!(zh.contains_key(key), "missing zh-TW key {}", key);
        }
    }
}
