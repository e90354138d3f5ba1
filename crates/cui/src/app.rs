use crate::persistence::{load_script_file, ActionScript};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rafflebox_core::{Action, DrawError, Event, EventBus, RenderView, RevealSource, Session};
use rafflebox_data::{default_prefs_path, load_assets, FilePreferences};
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::warn;

const MAX_EVENT_LOG: usize = 200;
pub const TICKET_COLUMNS: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub lang: Option<String>,
    pub seed: Option<u64>,
    pub script: Option<PathBuf>,
    pub assets: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Options,
    Tickets,
    History,
}

pub struct App {
    pub session: Session,
    pub events: EventBus,
    pub focus: FocusPane,
    pub options_input: String,
    pub ticket_cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            events: EventBus::default(),
            focus: FocusPane::Options,
            options_input: String::new(),
            ticket_cursor: 0,
            event_log: VecDeque::new(),
            status_line: String::new(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn bootstrap(options: &LaunchOptions) -> Result<Self> {
        let assets_dir = options
            .assets
            .clone()
            .unwrap_or_else(rafflebox_data::default_assets_dir);
        let mut loaded = load_assets(&assets_dir);
        let mut script: Option<ActionScript> = None;
        if let Some(path) = options.script.as_ref() {
            let parsed = load_script_file(path)
                .map_err(|err| anyhow::anyhow!("load script {}: {err}", path.display()))?;
            script = Some(parsed);
        }
        let script_seed = script.as_ref().and_then(|s| s.seed);
        if let Some(seed) = options.seed.or(script_seed) {
            loaded.config.seed = Some(seed);
        }

        let mut session = Session::new(loaded.config, loaded.packs);
        if let Some(path) = default_prefs_path() {
            session.set_preferences(Some(Box::new(FilePreferences::open(path))));
        }
        let mut app = Self::new(session);
        for warning in loaded.warnings {
            warn!(%warning, "asset warning");
            app.push_event_line(format!("warning: {warning}"));
        }

        let script_lang = script.as_ref().and_then(|s| s.lang.clone());
        if let Some(lang) = options.lang.clone().or(script_lang) {
            if !app.session.prefer_language(&lang) {
                app.push_event_line(format!("warning: unknown language {lang}"));
            }
        }
        if let Some(script) = script {
            app.apply_script(&script.actions)
                .map_err(|err| anyhow::anyhow!(err))?;
        }
        Ok(app)
    }

    pub fn view(&self) -> RenderView {
        self.session.view()
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (FocusPane::Options, true) => FocusPane::Tickets,
            (FocusPane::Tickets, true) => FocusPane::History,
            (FocusPane::History, true) => FocusPane::Options,
            (FocusPane::Options, false) => FocusPane::History,
            (FocusPane::Tickets, false) => FocusPane::Options,
            (FocusPane::History, false) => FocusPane::Tickets,
        };
    }

    pub fn focus_label(&self, pane: FocusPane) -> String {
        match pane {
            FocusPane::Options => self.session.t("optionsLabel"),
            FocusPane::Tickets => self.session.t("ticketPrefix"),
            FocusPane::History => self.session.t("history"),
        }
    }

    pub fn ticket_count(&self) -> usize {
        self.session.store().counts().total
    }

    /// Moves the ticket cursor by `delta` cells, clamped to the grid.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.focus != FocusPane::Tickets {
            return;
        }
        let len = self.ticket_count();
        if len == 0 {
            self.ticket_cursor = 0;
            return;
        }
        let next = self.ticket_cursor as isize + delta;
        if (0..len as isize).contains(&next) {
            self.ticket_cursor = next as usize;
        }
    }

    /// Consumes keys while the option editor has focus. Returns false for keys the
    /// editor leaves to the global key map.
    pub fn handle_editor_key(&mut self, key: KeyEvent) -> bool {
        if self.focus != FocusPane::Options || self.show_help {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('g') if ctrl => self.generate(),
            KeyCode::Char(ch) => {
                if ctrl || key.modifiers.contains(KeyModifiers::ALT) {
                    return false;
                }
                self.options_input.push(ch);
            }
            KeyCode::Enter => self.options_input.push('\n'),
            KeyCode::Backspace => {
                self.options_input.pop();
            }
            KeyCode::Esc => self.focus = FocusPane::Tickets,
            _ => return false,
        }
        true
    }

    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.focus {
            FocusPane::Options => self.generate(),
            FocusPane::Tickets => self.select_ticket(self.ticket_cursor),
            FocusPane::History => {}
        }
    }

    pub fn generate(&mut self) {
        let text = self.options_input.clone();
        self.perform(Action::Generate { text });
        self.ticket_cursor = 0;
        if self.ticket_count() > 0 {
            self.focus = FocusPane::Tickets;
        }
    }

    pub fn draw(&mut self) {
        self.perform(Action::Draw);
    }

    pub fn select_ticket(&mut self, index: usize) {
        if self.ticket_count() == 0 {
            return;
        }
        self.perform(Action::Select { index });
    }

    pub fn reset(&mut self) {
        self.options_input.clear();
        self.ticket_cursor = 0;
        self.perform(Action::Reset);
        self.focus = FocusPane::Options;
    }

    pub fn cycle_language(&mut self) {
        if let Some(code) = self.session.localizer().next_language() {
            self.perform(Action::ChangeLanguage { code });
        }
    }

    fn perform(&mut self, action: Action) {
        match self.session.dispatch(action, &mut self.events) {
            Ok(()) => self.status_line.clear(),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
        self.normalize_cursor();
    }

    pub fn apply_script(&mut self, actions: &[Action]) -> Result<(), String> {
        for (idx, action) in actions.iter().enumerate() {
            if let Action::Generate { text } = action {
                self.options_input = text.clone();
            }
            self.session
                .dispatch(action.clone(), &mut self.events)
                .map_err(|err| format!("script action #{idx} ({}): {err}", action.name()))?;
            self.flush_events();
        }
        if self.ticket_count() > 0 {
            self.focus = FocusPane::Tickets;
        }
        self.normalize_cursor();
        Ok(())
    }

    fn normalize_cursor(&mut self) {
        let len = self.ticket_count();
        if len == 0 {
            self.ticket_cursor = 0;
        } else if self.ticket_cursor >= len {
            self.ticket_cursor = len - 1;
        }
    }

    fn flush_events(&mut self) {
        let drained: Vec<Event> = self.events.drain().collect();
        for event in drained {
            let line = format_event(&self.session, &event);
            self.push_event_line(line);
        }
    }

    fn push_error(&mut self, err: DrawError) {
        self.status_line = err.to_string();
        self.push_event_line(format!("error: {err}"));
    }

    pub fn push_event_line(&mut self, line: impl Into<String>) {
        self.event_log.push_back(line.into());
        while self.event_log.len() > MAX_EVENT_LOG {
            self.event_log.pop_front();
        }
    }
}

fn format_event(session: &Session, event: &Event) -> String {
    match event {
        Event::TicketsGenerated { total } => format!("{}: {total}", session.t("generate")),
        Event::OptionsMissing => session.t("enterOptions"),
        Event::TicketRevealed {
            index,
            label,
            source,
        } => {
            let verb = match source {
                RevealSource::Drawn => session.t("draw"),
                RevealSource::Selected => session.t("ticketPicked"),
            };
            format!("{verb} {} {}: {label}", session.t("ticketPrefix"), index + 1)
        }
        Event::DrawnOut => session.t("drawnOut"),
        Event::Reset => session.t("reset"),
        Event::LanguageChanged { code } => format!(
            "{}: {}",
            session.t("language"),
            session.localizer().packs().language_name(code)
        ),
    }
}
