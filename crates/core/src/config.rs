use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "zh_CN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Shuffle parsed options before creating tickets.
    #[serde(default)]
    pub shuffle_on_generate: bool,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            seed: None,
            shuffle_on_generate: false,
        }
    }
}
