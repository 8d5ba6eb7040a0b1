//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (registration order)
//! - No rendering, audio or platform dependencies

pub mod combat;
pub mod difficulty;
pub mod player;
pub mod registry;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use difficulty::{DifficultyCurve, SizeBucket};
pub use player::{DamageOutcome, PlayerStatus};
pub use registry::EntityRegistry;
pub use snapshot::RenderSnapshot;
pub use state::{
    Backdrop, Craft, Debris, GameEvent, GamePhase, GameState, Obstacle, Progression, Projectile,
    RunSummary, WeaponKind,
};
pub use tick::{Action, InputEvent, TickInput, autopilot_input, mark_craft_loaded, tick};
