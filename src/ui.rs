//! HUD boundary: per-tick readout and one-shot overlay messages

use std::fmt;

use serde::Serialize;

use crate::sim::{GameEvent, GameState, PlayerStatus, RunSummary};
use crate::{format_km, ticks_to_secs};

/// State of the shield or skill indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbilityState {
    Ready,
    Active { secs: u32 },
    Cooldown { secs: u32 },
}

impl AbilityState {
    fn from_timers(active: bool, remaining: u32, cooldown: u32) -> Self {
        if active {
            AbilityState::Active {
                secs: ticks_to_secs(remaining),
            }
        } else if cooldown > 0 {
            AbilityState::Cooldown {
                secs: ticks_to_secs(cooldown),
            }
        } else {
            AbilityState::Ready
        }
    }

    pub fn shield(player: &PlayerStatus) -> Self {
        Self::from_timers(player.shield_active, player.shield_ticks, player.shield_cooldown)
    }

    pub fn skill(player: &PlayerStatus) -> Self {
        Self::from_timers(player.skill_active, player.skill_ticks, player.skill_cooldown)
    }
}

impl fmt::Display for AbilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityState::Ready => write!(f, "READY"),
            AbilityState::Active { secs } => write!(f, "ACTIVE: {}s", secs),
            AbilityState::Cooldown { secs } => write!(f, "COOLDOWN: {}s", secs),
        }
    }
}

/// Numbers shown while playing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudReadout {
    pub visible: bool,
    pub score: u64,
    /// Formatted as kilometres
    pub distance: String,
    pub destroyed: u32,
    pub level: u32,
    pub level_progress_percent: u32,
    pub shield: AbilityState,
    pub skill: AbilityState,
    pub hearts: u8,
}

impl HudReadout {
    pub fn capture(state: &GameState) -> Self {
        let progress = &state.progress;
        Self {
            visible: state.hud_visible,
            score: progress.score,
            distance: format_km(progress.distance),
            destroyed: progress.destroyed,
            level: progress.level,
            level_progress_percent: progress.level_progress.floor() as u32,
            shield: AbilityState::shield(&state.player),
            skill: AbilityState::skill(&state.player),
            hearts: state.player.health,
        }
    }

    pub fn hearts_text(&self) -> String {
        "\u{2764}".repeat(self.hearts as usize)
    }
}

/// Transient overlay raised by an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UiMessage {
    LevelUp { title: String, bonus: String },
    BossWarning,
    GameOver(RunSummary),
}

impl UiMessage {
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LevelUp { level } => Some(UiMessage::LevelUp {
                title: format!("LEVEL {}", level),
                bonus: format!("+{:.1} Speed", *level as f32 * 0.05),
            }),
            GameEvent::BossIncoming { .. } => Some(UiMessage::BossWarning),
            GameEvent::GameOver(summary) => Some(UiMessage::GameOver(*summary)),
            _ => None,
        }
    }

    /// Lines to put on screen
    pub fn lines(&self) -> Vec<String> {
        match self {
            UiMessage::LevelUp { title, bonus } => vec![title.clone(), bonus.clone()],
            UiMessage::BossWarning => vec!["BOSS INCOMING".to_string()],
            UiMessage::GameOver(s) => vec![
                "GAME OVER".to_string(),
                format!("Score: {}", s.score),
                format!("Distance: {}", format_km(s.distance)),
                format!("Asteroids Destroyed: {}", s.destroyed),
                format!("Level Reached: {}", s.level),
            ],
        }
    }
}

/// Title screen subtitle for the current load state
pub fn menu_subtitle(state: &GameState) -> &'static str {
    if state.asset_error {
        "ERROR: COULD NOT LOAD ASSETS"
    } else if state.crafts_loaded.iter().any(Option::is_none) {
        "LOADING ASSETS..."
    } else {
        "A JOURNEY THROUGH THE COSMOS"
    }
}
