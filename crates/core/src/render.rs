//! Pure conversion from a session snapshot to display text.

use crate::{Localizer, ResultSlot, Snapshot};
use serde::Serialize;

pub const EMPTY_RESULT: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketView {
    pub index: usize,
    pub text: String,
    pub mark: String,
    pub revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiLabels {
    pub title: String,
    pub options_label: String,
    pub options_placeholder: String,
    pub generate: String,
    pub draw: String,
    pub reset: String,
    pub total: String,
    pub picked: String,
    pub result: String,
    pub history: String,
    pub language: String,
    pub help: String,
    pub quit: String,
    pub log: String,
}

impl UiLabels {
    fn resolve(loc: &Localizer) -> Self {
        Self {
            title: loc.t("title"),
            options_label: loc.t("optionsLabel"),
            options_placeholder: loc.t("optionsPlaceholder"),
            generate: loc.t("generate"),
            draw: loc.t("draw"),
            reset: loc.t("reset"),
            total: loc.t("total"),
            picked: loc.t("picked"),
            result: loc.t("result"),
            history: loc.t("history"),
            language: loc.t("language"),
            help: loc.t("help"),
            quit: loc.t("quit"),
            log: loc.t("log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderView {
    pub language: String,
    pub languages: Vec<LanguageOption>,
    pub labels: UiLabels,
    pub tickets: Vec<TicketView>,
    pub total: usize,
    pub picked: usize,
    pub result: String,
    pub history: Vec<String>,
}

pub fn render(snapshot: &Snapshot, loc: &Localizer) -> RenderView {
    let prefix = loc.t("ticketPrefix");
    let mark = loc.t("ticketPicked");
    let tickets = snapshot
        .tickets
        .iter()
        .map(|ticket| TicketView {
            index: ticket.index,
            text: if ticket.revealed {
                ticket.label.clone()
            } else {
                format!("{prefix} {}", ticket.number())
            },
            mark: mark.clone(),
            revealed: ticket.revealed,
        })
        .collect();
    let result = match &snapshot.last_result {
        ResultSlot::Empty => EMPTY_RESULT.to_string(),
        ResultSlot::Label(label) => label.clone(),
        ResultSlot::Notice(notice) => loc.t(notice.key()),
    };
    let packs = loc.packs();
    let languages = packs
        .codes()
        .map(|code| LanguageOption {
            code: code.to_string(),
            name: packs.language_name(code).to_string(),
        })
        .collect();
    RenderView {
        language: snapshot.language.clone(),
        languages,
        labels: UiLabels::resolve(loc),
        tickets,
        total: snapshot.counts.total,
        picked: snapshot.counts.picked,
        result,
        history: snapshot.history.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, DrawConfig, EventBus, LanguagePacks, Session};
    use std::collections::BTreeMap;

    fn pack(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn session() -> Session {
        let mut packs = LanguagePacks::new("zh_CN");
        packs.insert(
            "zh_CN",
            pack(&[
                ("ticketPrefix", "签"),
                ("ticketPicked", "已抽"),
                ("drawnOut", "已抽完"),
                ("languageName", "中文"),
            ]),
        );
        packs.insert(
            "en_US",
            pack(&[
                ("ticketPrefix", "Ticket"),
                ("ticketPicked", "Picked"),
                ("drawnOut", "All drawn"),
                ("languageName", "English"),
            ]),
        );
        let config = DrawConfig {
            seed: Some(9),
            ..DrawConfig::default()
        };
        Session::new(config, packs)
    }

    fn run(session: &mut Session, action: Action) {
        let mut events = EventBus::default();
        session.dispatch(action, &mut events).expect("dispatch");
    }

    #[test]
    fn hidden_tickets_show_numbered_placeholder() {
        let mut session = session();
        run(
            &mut session,
            Action::Generate {
                text: "Apple\nBanana".to_string(),
            },
        );
        let view = session.view();
        let texts: Vec<&str> = view.tickets.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["签 1", "签 2"]);
        assert_eq!(view.result, EMPTY_RESULT);
        assert_eq!((view.total, view.picked), (2, 0));
    }

    #[test]
    fn language_change_rerenders_only_hidden_tickets() {
        let mut session = session();
        run(
            &mut session,
            Action::Generate {
                text: "Apple\nBanana\nCherry".to_string(),
            },
        );
        run(&mut session, Action::Select { index: 1 });
        run(
            &mut session,
            Action::ChangeLanguage {
                code: "en_US".to_string(),
            },
        );
        let view = session.view();
        let texts: Vec<&str> = view.tickets.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Ticket 1", "Banana", "Ticket 3"]);
        assert!(view.tickets.iter().all(|t| t.mark == "Picked"));
        assert_eq!(view.result, "Banana");
        assert_eq!(view.history, vec!["Banana".to_string()]);
    }

    #[test]
    fn notices_follow_the_active_language() {
        let mut session = session();
        run(&mut session, Action::Draw);
        assert_eq!(session.view().result, "已抽完");
        run(
            &mut session,
            Action::ChangeLanguage {
                code: "en".to_string(),
            },
        );
        assert_eq!(session.view().result, "All drawn");
    }

    #[test]
    fn lists_languages_with_display_names() {
        let view = session().view();
        let names: Vec<(&str, &str)> = view
            .languages
            .iter()
            .map(|l| (l.code.as_str(), l.name.as_str()))
            .collect();
        assert_eq!(names, vec![("en_US", "English"), ("zh_CN", "中文")]);
        assert_eq!(view.language, "zh_CN");
    }

    #[test]
    fn missing_labels_fall_back_to_keys() {
        let view = session().view();
        assert_eq!(view.labels.generate, "generate");
    }
}
