//! Space Dodger - A side-scrolling arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, difficulty, game phases)
//! - `game`: Session wrapper the host drives once per frame
//! - `audio`, `ui`, `highscores`: collaborator boundaries fed by sim events
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{Error, Result};
pub use game::Session;
pub use highscores::{BestRecords, JsonFileStore, ScoreStore};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec3;

/// World geometry constants
pub mod consts {
    use glam::Vec3;

    /// Simulation ticks per second (one tick per display frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Lateral lanes obstacles spawn on
    pub const LANES: [f32; 5] = [-4.0, -2.0, 0.0, 2.0, 4.0];
    /// Player lateral bounds
    pub const PLAYER_MIN_X: f32 = -5.0;
    pub const PLAYER_MAX_X: f32 = 5.0;

    /// Obstacles appear far ahead and travel toward +z
    pub const OBSTACLE_SPAWN_Z: f32 = -100.0;
    /// Obstacles past this depth have passed the player
    pub const OBSTACLE_DESPAWN_Z: f32 = 10.0;

    /// Projectiles leave the nose of the craft
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 1.5;
    /// Projectiles past this depth are gone
    pub const PROJECTILE_MAX_Z: f32 = -50.0;
    /// Lateral gap between multi-shot projectiles
    pub const MULTI_SHOT_SPREAD: f32 = 0.5;
    /// Beam is drawn centred this far ahead of the player
    pub const BEAM_CENTER_Z: f32 = -50.0;

    /// Boss geometry
    pub const BOSS_SIZE: f32 = 2.5;
    pub const BOSS_SPIN: f32 = 0.01;

    /// Cameras for each phase
    pub const MENU_CAMERA: Vec3 = Vec3::new(0.0, 2.0, 12.0);
    pub const GAME_CAMERA: Vec3 = Vec3::new(0.0, 4.0, 10.0);
    pub const PLANET_CAMERA: Vec3 = Vec3::new(0.0, 4.0, 15.0);
    /// Camera approach factor per tick
    pub const CAMERA_LERP: f32 = 0.05;
    /// Camera counts as arrived inside this distance
    pub const CAMERA_CONVERGE: f32 = 0.1;
    /// Menu idle spin of the displayed craft (radians per tick)
    pub const MENU_SPIN: f32 = 0.005;
}

/// Position of a craft sitting at lateral offset `x`
#[inline]
pub fn player_position(x: f32) -> Vec3 {
    Vec3::new(x, 0.0, 0.0)
}

/// Whole seconds remaining for a tick countdown (rounded up)
#[inline]
pub fn ticks_to_secs(ticks: u32) -> u32 {
    ticks.div_ceil(consts::TICKS_PER_SECOND)
}

/// Format a distance counter as kilometres with one decimal
pub fn format_km(distance: u64) -> String {
    format!("{:.1} km", distance as f64 / 1000.0)
}
