use crate::{
    draw_random, parse_options, render, Counts, DrawConfig, DrawError, DrawOutcome, Event,
    EventBus, LanguagePacks, Localizer, Notice, PreferenceStore, RenderView, ResultSlot,
    RevealOutcome, RevealSource, RngState, Ticket, TicketStore, LANGUAGE_KEY,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// User commands accepted by [`Session::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Generate { text: String },
    Draw,
    Reset,
    Select { index: usize },
    ChangeLanguage { code: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::Draw => "draw",
            Self::Reset => "reset",
            Self::Select { .. } => "select",
            Self::ChangeLanguage { .. } => "change_language",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tickets: Vec<Ticket>,
    pub counts: Counts,
    pub history: Vec<String>,
    pub last_result: ResultSlot,
    pub language: String,
    pub seed: u64,
}

pub struct Session {
    pub config: DrawConfig,
    store: TicketStore,
    localizer: Localizer,
    rng: RngState,
    prefs: Option<Box<dyn PreferenceStore>>,
}

impl Session {
    /// Starts in `config.default_language`, which also becomes the lookup fallback when a
    /// pack exists for it.
    pub fn new(config: DrawConfig, mut packs: LanguagePacks) -> Self {
        if !packs.set_default_language(&config.default_language) {
            warn!(
                configured = %config.default_language,
                fallback = packs.default_language(),
                "configured default language has no pack"
            );
        }
        let rng = match config.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        Self {
            config,
            store: TicketStore::new(),
            localizer: Localizer::new(packs, None),
            rng,
            prefs: None,
        }
    }

    /// Attaches durable preferences and adopts the stored language when it is available.
    pub fn set_preferences(&mut self, prefs: Option<Box<dyn PreferenceStore>>) {
        if let Some(stored) = prefs.as_ref().and_then(|p| p.get(LANGUAGE_KEY)) {
            if !self.prefer_language(&stored) {
                debug!(code = %stored, "stored language unavailable, keeping default");
            }
        }
        self.prefs = prefs;
    }

    pub fn with_preferences(mut self, prefs: Box<dyn PreferenceStore>) -> Self {
        self.set_preferences(Some(prefs));
        self
    }

    /// Switches language without persisting it. Returns false for codes with no pack.
    pub fn prefer_language(&mut self, code: &str) -> bool {
        self.localizer.set_language(code).is_ok()
    }

    pub fn dispatch(&mut self, action: Action, events: &mut EventBus) -> Result<(), DrawError> {
        debug!(action = action.name(), "dispatch");
        match action {
            Action::Generate { text } => self.generate(&text, events),
            Action::Draw => self.draw(events),
            Action::Reset => self.reset(events),
            Action::Select { index } => return self.select(index, events),
            Action::ChangeLanguage { code } => return self.change_language(&code, events),
        }
        Ok(())
    }

    fn generate(&mut self, text: &str, events: &mut EventBus) {
        let mut options = parse_options(text);
        if options.is_empty() {
            self.store.set_notice(Notice::EnterOptions);
            events.push(Event::OptionsMissing);
            return;
        }
        if self.config.shuffle_on_generate {
            self.rng.shuffle(&mut options);
        }
        self.store.initialize(options);
        let total = self.store.counts().total;
        info!(total, "tickets generated");
        events.push(Event::TicketsGenerated { total });
    }

    fn draw(&mut self, events: &mut EventBus) {
        match draw_random(&mut self.store, &mut self.rng) {
            DrawOutcome::Drawn { index, label } => events.push(Event::TicketRevealed {
                index,
                label,
                source: RevealSource::Drawn,
            }),
            DrawOutcome::NoneAvailable => {
                self.store.set_notice(Notice::DrawnOut);
                events.push(Event::DrawnOut);
            }
        }
    }

    fn select(&mut self, index: usize, events: &mut EventBus) -> Result<(), DrawError> {
        if let RevealOutcome::Revealed(label) = self.store.reveal(index)? {
            events.push(Event::TicketRevealed {
                index,
                label,
                source: RevealSource::Selected,
            });
        }
        Ok(())
    }

    fn reset(&mut self, events: &mut EventBus) {
        self.store.reset();
        info!("tickets reset");
        events.push(Event::Reset);
    }

    fn change_language(&mut self, code: &str, events: &mut EventBus) -> Result<(), DrawError> {
        let code = self.localizer.set_language(code)?.to_string();
        if let Some(prefs) = self.prefs.as_mut() {
            if let Err(err) = prefs.set(LANGUAGE_KEY, &code) {
                warn!(%code, error = %err, "failed to persist language preference");
            }
        }
        events.push(Event::LanguageChanged { code });
        Ok(())
    }

    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn preferences(&self) -> Option<&dyn PreferenceStore> {
        self.prefs.as_deref()
    }

    pub fn t(&self, key: &str) -> String {
        self.localizer.t(key)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tickets: self.store.tickets().to_vec(),
            counts: self.store.counts(),
            history: self.store.history().to_vec(),
            last_result: self.store.last_result().clone(),
            language: self.localizer.current().to_string(),
            seed: self.rng.seed(),
        }
    }

    pub fn view(&self) -> RenderView {
        render(&self.snapshot(), &self.localizer)
    }
}
