use rafflebox_core::{Action, Event, EventBus, LanguageOption, RenderView, Session, Snapshot};
use serde::Serialize;
use tiny_http::Method;

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");
const STYLES_CSS: &str = include_str!("../static/styles.css");

pub struct AppState {
    session: Session,
    events: EventBus,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            events: EventBus::default(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiResponse {
    ok: bool,
    error: Option<String>,
    view: RenderView,
    state: Snapshot,
    events: Vec<Event>,
}

pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec_pretty(value) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(err) => Self::text(500, format!("serialize error: {err}")),
        }
    }

    fn asset(content_type: &'static str, body: &str) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.as_bytes().to_vec(),
        }
    }

    fn text(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: message.into().into_bytes(),
        }
    }
}

pub fn route(state: &mut AppState, method: &Method, url: &str, body: &str) -> Reply {
    let path = url.split('?').next().unwrap_or(url);
    match (method, path) {
        (&Method::Get, "/") => Reply::asset("text/html; charset=utf-8", INDEX_HTML),
        (&Method::Get, "/app.js") => Reply::asset("application/javascript", APP_JS),
        (&Method::Get, "/styles.css") => Reply::asset("text/css; charset=utf-8", STYLES_CSS),
        (&Method::Get, "/api/state") => Reply::json(200, &build_response(state, None)),
        (&Method::Get, "/api/languages") => {
            let languages: Vec<LanguageOption> = state.session.view().languages;
            Reply::json(200, &languages)
        }
        (&Method::Post, "/api/action") => {
            let action: Action = match serde_json::from_str(body) {
                Ok(action) => action,
                Err(err) => return Reply::text(400, format!("invalid action: {err}")),
            };
            let err = state
                .session
                .dispatch(action, &mut state.events)
                .err()
                .map(|err| err.to_string());
            let status = if err.is_some() { 422 } else { 200 };
            Reply::json(status, &build_response(state, err))
        }
        _ => Reply::text(404, "not found"),
    }
}

fn build_response(state: &mut AppState, error: Option<String>) -> ApiResponse {
    let events: Vec<_> = state.events.drain().collect();
    ApiResponse {
        ok: error.is_none(),
        error,
        view: state.session.view(),
        state: state.session.snapshot(),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rafflebox_core::{DrawConfig, MemoryPreferences, LANGUAGE_KEY};
    use rafflebox_data::builtin_language_packs;
    use serde_json::Value;

    fn state() -> AppState {
        let config = DrawConfig {
            seed: Some(8),
            ..DrawConfig::default()
        };
        let session = Session::new(config, builtin_language_packs("zh_CN"))
            .with_preferences(Box::new(MemoryPreferences::new()));
        AppState::new(session)
    }

    fn post(state: &mut AppState, body: &str) -> (u16, Value) {
        let reply = route(state, &Method::Post, "/api/action", body);
        let value = serde_json::from_slice(&reply.body).unwrap_or(Value::Null);
        (reply.status, value)
    }

    #[test]
    fn generate_then_select_round_trip() {
        let mut state = state();
        let (status, value) = post(
            &mut state,
            r#"{"action":"generate","text":"Apple\n\nBanana\n  Cherry \n"}"#,
        );
        assert_eq!(status, 200);
        assert_eq!(value["view"]["total"], 3);
        assert_eq!(value["view"]["tickets"][0]["text"], "签 1");
        assert_eq!(value["events"][0]["TicketsGenerated"]["total"], 3);

        let (status, value) = post(&mut state, r#"{"action":"select","index":1}"#);
        assert_eq!(status, 200);
        assert_eq!(value["view"]["tickets"][1]["text"], "Banana");
        assert_eq!(value["view"]["result"], "Banana");
        assert_eq!(value["state"]["counts"]["picked"], 1);
    }

    #[test]
    fn bad_index_reports_error() {
        let mut state = state();
        let (status, value) = post(&mut state, r#"{"action":"select","index":0}"#);
        assert_eq!(status, 422);
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], "invalid ticket index 0");
    }

    #[test]
    fn malformed_body_is_rejected() {
        let mut state = state();
        let reply = route(&mut state, &Method::Post, "/api/action", "{nope");
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn language_change_is_saved() {
        let mut state = state();
        let (status, value) = post(&mut state, r#"{"action":"change_language","code":"en"}"#);
        assert_eq!(status, 200);
        assert_eq!(value["view"]["language"], "en_US");
        assert_eq!(value["view"]["labels"]["draw"], "Draw");
        let stored = state
            .session
            .preferences()
            .and_then(|prefs| prefs.get(LANGUAGE_KEY));
        assert_eq!(stored.as_deref(), Some("en_US"));
    }

    #[test]
    fn lists_languages() {
        let mut state = state();
        let reply = route(&mut state, &Method::Get, "/api/languages", "");
        let value: Value = serde_json::from_slice(&reply.body).expect("json");
        assert_eq!(value[0]["code"], "en_US");
        assert_eq!(value[1]["name"], "中文");
    }

    #[test]
    fn serves_the_browser_page() {
        let mut state = state();
        let page = route(&mut state, &Method::Get, "/", "");
        assert_eq!(page.status, 200);
        assert!(page.content_type.starts_with("text/html"));
        let html = String::from_utf8(page.body).expect("utf8");
        assert!(html.contains(r#"<script src="/app.js">"#));
        assert!(html.contains(r#"id="langSelect""#));

        let script = route(&mut state, &Method::Get, "/app.js", "");
        assert_eq!(script.content_type, "application/javascript");
        let js = String::from_utf8(script.body).expect("utf8");
        for action in ["select", "draw", "reset", "generate", "change_language"] {
            assert!(js.contains(&format!("action: '{action}'")), "{action}");
        }

        let css = route(&mut state, &Method::Get, "/styles.css", "");
        assert!(css.content_type.starts_with("text/css"));
        assert!(!css.body.is_empty());
    }

    #[test]
    fn unknown_route_is_404() {
        let mut state = state();
        assert_eq!(route(&mut state, &Method::Get, "/nope", "").status, 404);
        assert_eq!(
            route(&mut state, &Method::Get, "/api/state?x=1", "").status,
            200
        );
    }
}
