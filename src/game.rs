//! Game session: the host-facing wrapper around the simulation
//!
//! The host feeds input events, reports asset loading, calls [`Session::tick`]
//! once per frame and reads back a snapshot, the HUD and the frame's side
//! effects (audio commands, overlay messages).

use crate::audio::{AudioCommand, AudioMixer};
use crate::highscores::{BestRecords, ScoreStore};
use crate::settings::Settings;
use crate::sim::{
    Craft, GameEvent, GamePhase, GameState, InputEvent, RenderSnapshot, RunSummary, TickInput,
    autopilot_input, mark_craft_loaded, tick,
};
use crate::tuning::Tuning;
use crate::ui::{self, HudReadout, UiMessage};

/// Side effects of one tick
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub events: Vec<GameEvent>,
    pub audio: Vec<AudioCommand>,
    pub messages: Vec<UiMessage>,
}

pub struct Session {
    state: GameState,
    tuning: Tuning,
    /// Debris budget from tuning before the quality cap
    base_max_debris: usize,
    settings: Settings,
    store: Box<dyn ScoreStore>,
    input: TickInput,
    best: BestRecords,
    audio: AudioMixer,
    last_run: Option<RunSummary>,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, store: Box<dyn ScoreStore>) -> Self {
        let base_max_debris = tuning.entities.max_debris;
        let best = store.best();
        let mut session = Self {
            state: GameState::new(seed, &tuning),
            tuning,
            base_max_debris,
            audio: AudioMixer::new(&settings),
            settings,
            store,
            input: TickInput::default(),
            best,
            last_run: None,
        };
        session.apply_quality_cap();
        log::info!(
            "Session started (seed {}, quality {})",
            seed,
            session.settings.quality.as_str()
        );
        session
    }

    fn apply_quality_cap(&mut self) {
        self.tuning.entities.max_debris = self
            .base_max_debris
            .min(self.settings.quality.max_debris());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap in new preferences (volumes, shake, quality)
    pub fn apply_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        self.settings = settings;
        self.apply_quality_cap();
    }

    /// Queue an input event for the next tick
    pub fn on_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    /// Report one craft's asset load result
    pub fn craft_loaded(&mut self, craft: Craft, ok: bool) {
        mark_craft_loaded(&mut self.state, craft, ok);
    }

    /// Advance one frame with the queued input
    pub fn tick(&mut self) -> Frame {
        let input = self.input.clone();
        tick(&mut self.state, &input, &self.tuning);
        // One-shots are consumed; held keys carry over
        self.input.clear_one_shots();
        self.collect_frame()
    }

    /// Advance one frame with the built-in pilot instead of queued input
    pub fn tick_autopilot(&mut self) -> Frame {
        let input = autopilot_input(&self.state, &self.tuning);
        tick(&mut self.state, &input, &self.tuning);
        self.collect_frame()
    }

    fn collect_frame(&mut self) -> Frame {
        let events = self.state.drain_events();
        let mut frame = Frame::default();

        for event in &events {
            match event {
                GameEvent::GameOver(summary) => self.record_run(*summary),
                GameEvent::PhaseChanged {
                    to: GamePhase::Menu,
                    ..
                } => self.best = self.store.best(),
                _ => {}
            }
            frame.audio.extend(self.audio.handle(event));
            frame.messages.extend(UiMessage::from_event(event));
        }

        frame.events = events;
        frame
    }

    fn record_run(&mut self, summary: RunSummary) {
        if self.store.record_score(summary.score) {
            log::info!("New best score: {}", summary.score);
        }
        if self.store.record_distance(summary.distance) {
            log::info!("New best distance: {}", summary.distance);
        }
        self.last_run = Some(summary);
    }

    /// Render view of the current frame
    pub fn snapshot(&self) -> RenderSnapshot {
        let mut snapshot = RenderSnapshot::capture(&self.state, &self.tuning);
        if !self.settings.effective_screen_shake() {
            snapshot.shake = 0.0;
        }
        snapshot
    }

    pub fn hud(&self) -> HudReadout {
        HudReadout::capture(&self.state)
    }

    pub fn menu_subtitle(&self) -> &'static str {
        ui::menu_subtitle(&self.state)
    }

    /// Best records as of the last menu entry
    pub fn best(&self) -> BestRecords {
        self.best
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }
}
