use anyhow::{bail, Context};
use rafflebox_core::{normalize_locale, DrawConfig, LanguagePacks};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE: &str = "config.json";
const LANG_DIR: &str = "lang";

const BUILTIN_PACKS: &[(&str, &str)] = &[
    ("en_US", include_str!("../../../assets/lang/en_US.json")),
    ("zh_CN", include_str!("../../../assets/lang/zh_CN.json")),
];

/// Everything a session needs from the assets directory.
#[derive(Debug, Clone)]
pub struct LoadedAssets {
    pub config: DrawConfig,
    pub packs: LanguagePacks,
    pub warnings: Vec<String>,
}

pub fn default_assets_dir() -> PathBuf {
    std::env::var_os("RAFFLEBOX_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

pub fn load_draw_config(dir: &Path) -> anyhow::Result<DrawConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(DrawConfig::default());
    }
    load_json(path)
}

/// Reads every `lang/<code>.json` file under `dir`. Each file is a flat key/text object.
pub fn load_language_packs(dir: &Path, default_language: &str) -> anyhow::Result<LanguagePacks> {
    let lang_dir = dir.join(LANG_DIR);
    let mut entries: Vec<PathBuf> = fs::read_dir(&lang_dir)
        .with_context(|| format!("read {}", lang_dir.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();
    let mut packs = LanguagePacks::new(default_language);
    for path in entries {
        let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let strings: BTreeMap<String, String> = load_json(&path)?;
        debug!(code, keys = strings.len(), "loaded language pack");
        packs.insert(code, strings);
    }
    if packs.is_empty() {
        bail!("no language packs found in {}", lang_dir.display());
    }
    Ok(packs)
}

/// The packs compiled into the binary.
pub fn builtin_language_packs(default_language: &str) -> LanguagePacks {
    let mut packs = LanguagePacks::new(default_language);
    for (code, body) in BUILTIN_PACKS {
        if let Ok(strings) = serde_json::from_str::<BTreeMap<String, String>>(body) {
            packs.insert(code, strings);
        }
    }
    packs
}

/// Loads config and packs, falling back to defaults and built-in packs with a warning
/// when the assets directory is missing or unreadable.
pub fn load_assets(dir: &Path) -> LoadedAssets {
    let mut warnings = Vec::new();
    let mut config = match load_draw_config(dir) {
        Ok(config) => config,
        Err(err) => {
            warnings.push(format!("config: {err:#}"));
            DrawConfig::default()
        }
    };
    config.default_language = normalize_locale(&config.default_language);
    let packs = match load_language_packs(dir, &config.default_language) {
        Ok(packs) => packs,
        Err(err) => {
            warnings.push(format!("language packs: {err:#}; using built-in packs"));
            builtin_language_packs(&config.default_language)
        }
    };
    if !packs.contains(&config.default_language) {
        warnings.push(format!(
            "default language {} has no pack",
            config.default_language
        ));
    }
    LoadedAssets {
        config,
        packs,
        warnings,
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
