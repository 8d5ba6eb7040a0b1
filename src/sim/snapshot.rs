//! Render-facing snapshot of the simulation
//!
//! Published after each tick. Instance structs are `Pod` so a renderer can
//! upload the slices straight into instance buffers.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use super::state::{Backdrop, GamePhase, GameState, WeaponKind};
use crate::tuning::Tuning;

/// Obstacle flag bits
pub const OBSTACLE_BOSS: u32 = 1 << 0;
pub const OBSTACLE_DAMAGED: u32 = 1 << 1;

/// One obstacle instance
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, Serialize)]
pub struct ObstacleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub rotation: [f32; 3],
    /// Remaining health over max health
    pub health_fraction: f32,
    pub flags: u32,
}

/// One projectile instance
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, Serialize)]
pub struct ProjectileInstance {
    pub position: [f32; 3],
    /// 0 = standard, 1 = multi-shot, 2 = beam
    pub kind: u32,
}

/// One debris fragment
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, Serialize)]
pub struct DebrisInstance {
    pub position: [f32; 3],
    pub opacity: f32,
}

/// The player's craft as drawn
#[derive(Copy, Clone, Debug, Serialize)]
pub struct PlayerInstance {
    pub position: [f32; 3],
    /// False during the off half of the damage blink
    pub visible: bool,
    pub invincible: bool,
    pub shield: bool,
    /// Idle rotation shown in menus
    pub spin: f32,
}

/// Everything a renderer needs for one frame
#[derive(Clone, Debug, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub camera: [f32; 3],
    pub backdrop: Backdrop,
    /// Shake intensity for this frame (0 when still)
    pub shake: f32,
    pub player: PlayerInstance,
    pub obstacles: Vec<ObstacleInstance>,
    pub projectiles: Vec<ProjectileInstance>,
    pub debris: Vec<DebrisInstance>,
}

fn weapon_code(weapon: WeaponKind) -> u32 {
    match weapon {
        WeaponKind::Standard => 0,
        WeaponKind::MultiShot => 1,
        WeaponKind::Beam => 2,
    }
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, tuning: &Tuning) -> Self {
        let registry = &state.registry;

        let obstacles = registry
            .obstacles
            .iter()
            .map(|o| {
                let mut flags = 0;
                if o.boss {
                    flags |= OBSTACLE_BOSS;
                }
                if o.is_damaged() {
                    flags |= OBSTACLE_DAMAGED;
                }
                ObstacleInstance {
                    position: o.pos.to_array(),
                    size: o.size,
                    rotation: o.rotation.to_array(),
                    health_fraction: (o.health / o.max_health).clamp(0.0, 1.0),
                    flags,
                }
            })
            .collect();

        let projectiles = registry
            .projectiles
            .iter()
            .map(|p| ProjectileInstance {
                position: p.pos.to_array(),
                kind: weapon_code(p.weapon),
            })
            .collect();

        let fade = tuning.entities.debris_fade_ticks;
        let debris = registry
            .debris
            .iter()
            .map(|d| DebrisInstance {
                position: d.pos.to_array(),
                opacity: d.opacity(fade),
            })
            .collect();

        // Game over hides the wreck
        let visible = state.phase != GamePhase::GameOver && state.player.visible();

        Self {
            phase: state.phase,
            camera: state.camera.pos.to_array(),
            backdrop: state.backdrop,
            shake: state.shake.intensity,
            player: PlayerInstance {
                position: state.player.pos().to_array(),
                visible,
                invincible: state.player.invincible,
                shield: state.player.shield_active,
                spin: state.menu_spin,
            },
            obstacles,
            projectiles,
            debris,
        }
    }

    /// Raw bytes for an obstacle instance buffer
    pub fn obstacle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.obstacles)
    }

    pub fn projectile_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.projectiles)
    }

    pub fn debris_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.debris)
    }
}
