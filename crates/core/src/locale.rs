//! Key-based string lookup with a current-language -> default-language -> key
//! fallback chain.

use crate::DrawError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LANGUAGE_NAME_KEY: &str = "languageName";

/// Canonical form of a language code: `en`, `en-us` -> `en_US`; `zh`, `zh-hans` -> `zh_CN`.
pub fn normalize_locale(code: &str) -> String {
    let raw = code.trim();
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "zh" | "zh_cn" | "zh_hans" | "zh_hans_cn" => "zh_CN".to_string(),
        "en" | "en_us" => "en_US".to_string(),
        _ => match lowered.split_once('_') {
            Some((lang, region)) if !lang.is_empty() && !region.is_empty() => {
                format!("{lang}_{}", region.to_ascii_uppercase())
            }
            _ => lowered,
        },
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagePacks {
    default_language: String,
    packs: BTreeMap<String, BTreeMap<String, String>>,
}

impl LanguagePacks {
    pub fn new(default_language: &str) -> Self {
        Self {
            default_language: normalize_locale(default_language),
            packs: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, code: &str, strings: BTreeMap<String, String>) {
        self.packs
            .entry(normalize_locale(code))
            .or_default()
            .extend(strings);
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Makes `code` the fallback language. Returns false, leaving the default as it was,
    /// when no pack matches `code`.
    pub fn set_default_language(&mut self, code: &str) -> bool {
        match self.resolve(code) {
            Some(resolved) => {
                self.default_language = resolved;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.packs.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.packs.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// A translation, treating empty strings as missing.
    pub fn get(&self, code: &str, key: &str) -> Option<&str> {
        self.packs
            .get(code)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn language_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code, LANGUAGE_NAME_KEY).unwrap_or(code)
    }

    /// Maps a requested code onto an available pack, if any.
    pub fn resolve(&self, code: &str) -> Option<String> {
        if self.contains(code) {
            return Some(code.to_string());
        }
        let normalized = normalize_locale(code);
        self.contains(&normalized).then_some(normalized)
    }
}

#[derive(Debug, Clone)]
pub struct Localizer {
    packs: LanguagePacks,
    current: String,
}

impl Localizer {
    /// Starts on `preferred` when a pack exists for it, otherwise on the default language.
    pub fn new(packs: LanguagePacks, preferred: Option<&str>) -> Self {
        let current = preferred
            .and_then(|code| packs.resolve(code))
            .unwrap_or_else(|| packs.default_language().to_string());
        Self { packs, current }
    }

    pub fn t(&self, key: &str) -> String {
        self.packs
            .get(&self.current, key)
            .or_else(|| self.packs.get(self.packs.default_language(), key))
            .unwrap_or(key)
            .to_string()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn packs(&self) -> &LanguagePacks {
        &self.packs
    }

    pub fn set_language(&mut self, code: &str) -> Result<&str, DrawError> {
        let resolved = self
            .packs
            .resolve(code)
            .ok_or_else(|| DrawError::UnknownLanguage(code.to_string()))?;
        self.current = resolved;
        Ok(&self.current)
    }

    /// Next available language after the current one, wrapping around.
    pub fn next_language(&self) -> Option<String> {
        let codes: Vec<&str> = self.packs.codes().collect();
        if codes.is_empty() {
            return None;
        }
        let next = codes
            .iter()
            .position(|code| *code == self.current)
            .map(|pos| (pos + 1) % codes.len())
            .unwrap_or(0);
        Some(codes[next].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn packs() -> LanguagePacks {
        let mut packs = LanguagePacks::new("zh_CN");
        packs.insert(
            "zh_CN",
            strings(&[("ticketPrefix", "签"), ("drawnOut", "已抽完"), ("k", "默认")]),
        );
        packs.insert(
            "en_US",
            strings(&[("ticketPrefix", "Ticket"), ("drawnOut", ""), ("extra", "x")]),
        );
        packs
    }

    #[test]
    fn current_language_wins() {
        let loc = Localizer::new(packs(), Some("en_US"));
        assert_eq!(loc.t("ticketPrefix"), "Ticket");
    }

    #[test]
    fn falls_back_to_default_language() {
        let loc = Localizer::new(packs(), Some("en_US"));
        assert_eq!(loc.t("k"), "默认");
    }

    #[test]
    fn empty_translation_counts_as_missing() {
        let loc = Localizer::new(packs(), Some("en_US"));
        assert_eq!(loc.t("drawnOut"), "已抽完");
    }

    #[test]
    fn falls_back_to_raw_key() {
        let loc = Localizer::new(packs(), Some("en_US"));
        assert_eq!(loc.t("nowhere"), "nowhere");
    }

    #[test]
    fn unknown_preference_uses_default() {
        let loc = Localizer::new(packs(), Some("fr_FR"));
        assert_eq!(loc.current(), "zh_CN");
        let loc = Localizer::new(packs(), None);
        assert_eq!(loc.current(), "zh_CN");
    }

    #[test]
    fn preference_codes_are_normalized() {
        let loc = Localizer::new(packs(), Some("en-us"));
        assert_eq!(loc.current(), "en_US");
    }

    #[test]
    fn set_language_rejects_unknown_code() {
        let mut loc = Localizer::new(packs(), Some("en_US"));
        assert_eq!(
            loc.set_language("xx"),
            Err(DrawError::UnknownLanguage("xx".to_string()))
        );
        assert_eq!(loc.current(), "en_US");
        assert_eq!(loc.set_language("zh"), Ok("zh_CN"));
    }

    #[test]
    fn next_language_cycles() {
        let loc = Localizer::new(packs(), Some("en_US"));
        assert_eq!(loc.next_language().as_deref(), Some("zh_CN"));
        let loc = Localizer::new(packs(), Some("zh_CN"));
        assert_eq!(loc.next_language().as_deref(), Some("en_US"));
    }

    #[test]
    fn normalizes_common_codes() {
        assert_eq!(normalize_locale("zh"), "zh_CN");
        assert_eq!(normalize_locale("ZH-Hans"), "zh_CN");
        assert_eq!(normalize_locale(" en "), "en_US");
        assert_eq!(normalize_locale("pt-br"), "pt_BR");
        assert_eq!(normalize_locale("fr"), "fr");
    }
}
