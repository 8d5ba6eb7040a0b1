//! Game state and core simulation types
//!
//! Everything the simulation owns lives in [`GameState`]. Collaborators read
//! snapshots and drain events; they never mutate this directly.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::PlayerStatus;
use super::registry::EntityRegistry;
use crate::consts::*;
use crate::tuning::{ShakeTuning, Tuning};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for craft assets
    Loading,
    /// Title screen
    Menu,
    /// Cycling through crafts
    ShipSelection,
    /// Camera swings from the menu to the play position
    Transitioning,
    /// Active gameplay
    Playing,
    /// Camera pulls back for the planet backdrop
    LevelTransitioning,
    Paused,
    /// Run ended, waiting out the display delay
    GameOver,
}

/// Playable craft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Craft {
    Starfire,
    BlueNova,
}

impl Craft {
    pub const ALL: [Craft; 2] = [Craft::Starfire, Craft::BlueNova];
    pub const COUNT: usize = Self::ALL.len();

    pub fn name(&self) -> &'static str {
        match self {
            Craft::Starfire => "STARFIRE",
            Craft::BlueNova => "BLUE NOVA",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Craft::Starfire => 0,
            Craft::BlueNova => 1,
        }
    }

    pub fn from_index(index: usize) -> Craft {
        Self::ALL[index % Self::COUNT]
    }

    /// Step through the roster with wraparound
    pub fn cycle(&self, step: isize) -> Craft {
        let n = Self::COUNT as isize;
        Self::from_index((self.index() as isize + step).rem_euclid(n) as usize)
    }

    /// Weapon used while the skill is active
    pub fn skill_weapon(&self) -> WeaponKind {
        match self {
            Craft::Starfire => WeaponKind::Beam,
            Craft::BlueNova => WeaponKind::MultiShot,
        }
    }
}

/// What fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Standard,
    /// Three-way spread, one volley per fire press
    MultiShot,
    /// Persistent forward beam while fire is held
    Beam,
}

/// An asteroid (or the boss)
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec3,
    pub size: f32,
    /// Fractional so the beam can chip away at it
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub boss: bool,
    /// Cosmetic orientation
    pub rotation: Vec3,
    pub spin: Vec3,
}

impl Obstacle {
    /// Partially damaged obstacles render dimmed
    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage, never raising health
    pub fn damage(&mut self, amount: f32) {
        self.health -= amount.max(0.0);
    }
}

/// A player shot
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec3,
    pub weapon: WeaponKind,
}

/// Explosion fragment
#[derive(Debug, Clone)]
pub struct Debris {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Ticks left
    pub lifespan: f32,
}

impl Debris {
    pub fn opacity(&self, fade_ticks: f32) -> f32 {
        (self.lifespan / fade_ticks).clamp(0.0, 1.0)
    }
}

/// Distance, level and score for the current run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub distance: u64,
    pub level: u32,
    /// Percent of the current level covered
    pub level_progress: f32,
    pub score: u64,
    pub destroyed: u32,
    /// Planet backdrop already triggered this run
    pub planet_level: bool,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            distance: self.distance,
            destroyed: self.destroyed,
            level: self.level,
        }
    }
}

/// Final numbers of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub distance: u64,
    pub destroyed: u32,
    pub level: u32,
}

/// Scene backdrop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backdrop {
    Galaxy,
    Planetscape,
}

/// Camera position animated toward per-phase targets
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub pos: Vec3,
}

impl CameraRig {
    /// Move part of the way toward `target`; true once within the threshold
    pub fn approach(&mut self, target: Vec3) -> bool {
        self.pos = self.pos.lerp(target, CAMERA_LERP);
        self.pos.distance(target) < CAMERA_CONVERGE
    }
}

/// Camera shake countdown
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenShake {
    pub ticks: u32,
    pub intensity: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, shake: ShakeTuning) {
        self.ticks = shake.ticks;
        self.intensity = shake.intensity;
    }

    pub fn decay(&mut self) {
        if self.ticks > 0 {
            self.ticks -= 1;
        }
        if self.ticks == 0 {
            self.intensity = 0.0;
        }
    }
}

/// Events emitted during a tick for collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    Fired(WeaponKind),
    /// Player lost a heart
    PlayerHit { health: u8 },
    ObstacleDestroyed { pos: Vec3, boss: bool, points: u64 },
    LevelUp { level: u32 },
    BossIncoming { level: u32 },
    BackdropChanged(Backdrop),
    ShieldActivated,
    SkillActivated,
    SkillExpired,
    GameOver(RunSummary),
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Ticks since creation
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Craft shown in the menu and flown in the next run
    pub selected_craft: Craft,
    /// Asset result per craft; `None` until reported
    pub crafts_loaded: [Option<bool>; Craft::COUNT],
    /// At least one craft failed to load
    pub asset_error: bool,
    pub player: PlayerStatus,
    pub registry: EntityRegistry,
    pub progress: Progression,
    pub camera: CameraRig,
    pub backdrop: Backdrop,
    pub hud_visible: bool,
    pub shake: ScreenShake,
    /// Ticks left on the game-over screen
    pub gameover_ticks: u32,
    /// Idle spin of the displayed craft in menus
    pub menu_spin: f32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Loading,
            selected_craft: Craft::Starfire,
            crafts_loaded: [None; Craft::COUNT],
            asset_error: false,
            player: PlayerStatus::new(&tuning.player, Craft::Starfire),
            registry: EntityRegistry::default(),
            progress: Progression::new(),
            camera: CameraRig { pos: MENU_CAMERA },
            backdrop: Backdrop::Galaxy,
            hud_visible: false,
            shake: ScreenShake::default(),
            gameover_ticks: 0,
            menu_spin: 0.0,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch phase, announcing the change
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    pub fn set_backdrop(&mut self, backdrop: Backdrop) {
        if self.backdrop != backdrop {
            self.backdrop = backdrop;
            self.emit(GameEvent::BackdropChanged(backdrop));
        }
    }

    /// Start-of-run state: no entities, fresh progression and player
    pub fn reset_run(&mut self, tuning: &Tuning) {
        self.registry.clear();
        self.progress = Progression::new();
        self.player = PlayerStatus::new(&tuning.player, self.selected_craft);
        self.shake = ScreenShake::default();
    }
}
