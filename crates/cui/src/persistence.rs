use rafflebox_core::Action;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Actions replayed before the interactive loop starts.
#[derive(Debug, Clone)]
pub struct ActionScript {
    pub lang: Option<String>,
    pub seed: Option<u64>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Deserialize)]
struct ActionScriptFile {
    #[serde(default, alias = "locale")]
    lang: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    actions: Vec<Action>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ScriptPayload {
    Script(ActionScriptFile),
    Actions(Vec<Action>),
}

pub fn load_script_file(path: &Path) -> Result<ActionScript, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    parse_script(&body)
}

pub fn parse_script(body: &str) -> Result<ActionScript, String> {
    let payload: ScriptPayload = serde_json::from_str(body).map_err(|err| err.to_string())?;
    let script = match payload {
        ScriptPayload::Script(script) => ActionScript {
            lang: script.lang,
            seed: script.seed,
            actions: script.actions,
        },
        ScriptPayload::Actions(actions) => ActionScript {
            lang: None,
            seed: None,
            actions,
        },
    };
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn parses_bare_action_array() {
        let body = r#"
[
  {"action":"generate","text":"a\nb"},
  {"action":"select","index":1},
  {"action":"draw"}
]
"#;
        let script = parse_script(body).expect("parse");
        assert_eq!(script.seed, None);
        assert_eq!(script.lang, None);
        assert_eq!(script.actions.len(), 3);
        assert_eq!(script.actions[1], Action::Select { index: 1 });
    }

    #[test]
    fn parses_script_object() {
        let body = r#"
{
  "lang":"en_US",
  "seed":99,
  "actions":[{"action":"change_language","code":"zh"}]
}
"#;
        let script = parse_script(body).expect("parse");
        assert_eq!(script.seed, Some(99));
        assert_eq!(script.lang.as_deref(), Some("en_US"));
        assert_eq!(
            script.actions,
            vec![Action::ChangeLanguage {
                code: "zh".to_string()
            }]
        );
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(parse_script(r#"[{"action":"shuffle"}]"#).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let file = unique_temp_file();
        fs::write(&file, r#"[{"action":"reset"}]"#).expect("write");
        let script = load_script_file(&file).expect("load");
        assert_eq!(script.actions, vec![Action::Reset]);
        let _ = fs::remove_file(file);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "rafflebox_cui_script_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
