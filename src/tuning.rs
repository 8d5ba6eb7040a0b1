//! Data-driven game balance
//!
//! Every number the simulation uses that a designer might want to tweak.
//! Defaults reproduce the shipped game; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::difficulty::DifficultyCurve;

/// Player timers and movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub start_health: u8,
    /// Lateral units moved per tick while a direction is held
    pub move_speed: f32,
    /// Grace period after a hit
    pub invincibility_ticks: u32,
    /// Full on/off cycle of the damage blink
    pub blink_period: u32,
    pub shield_ticks: u32,
    pub shield_cooldown_ticks: u32,
    pub skill_ticks: u32,
    /// Cooldown after the skill window ends (0 = ready immediately)
    pub skill_cooldown_ticks: u32,
    /// Distance stops accruing after this many ticks without lateral movement
    pub stationary_ticks: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_health: 3,
            move_speed: 0.2,
            invincibility_ticks: 120,
            blink_period: 20,
            shield_ticks: 300,
            shield_cooldown_ticks: 600,
            skill_ticks: 600,
            skill_cooldown_ticks: 0,
            stationary_ticks: 300,
        }
    }
}

/// Camera shake request (duration in ticks, intensity in world units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeTuning {
    pub ticks: u32,
    pub intensity: f32,
}

/// Hit radii, weapon behaviour and scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Obstacle-vs-player radius for a normal obstacle
    pub player_radius: f32,
    /// Obstacle-vs-player radius for a boss
    pub boss_player_radius: f32,
    /// Added to both radii while the shield is up
    pub shield_radius_bonus: f32,
    pub projectile_hit_radius: f32,
    /// Forward speed of bullets (units per tick, toward -z)
    pub projectile_speed: f32,
    pub beam_half_width: f32,
    pub beam_damage_per_tick: f32,
    pub points_per_kill: u64,
    /// Boss kills award this times the level
    pub points_per_boss_level: u64,
    pub hit_shake: ShakeTuning,
    pub explosion_shake: ShakeTuning,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            player_radius: 1.2,
            boss_player_radius: 3.0,
            shield_radius_bonus: 0.8,
            projectile_hit_radius: 1.0,
            projectile_speed: 0.8,
            beam_half_width: 0.5,
            beam_damage_per_tick: 0.1,
            points_per_kill: 50,
            points_per_boss_level: 100,
            hit_shake: ShakeTuning {
                ticks: 20,
                intensity: 0.2,
            },
            explosion_shake: ShakeTuning {
                ticks: 10,
                intensity: 0.05,
            },
        }
    }
}

/// Debris behaviour and budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityTuning {
    pub debris_per_explosion: u32,
    pub debris_speed: f32,
    pub debris_min_lifespan: f32,
    pub debris_lifespan_spread: f32,
    /// Opacity is lifespan divided by this
    pub debris_fade_ticks: f32,
    /// Live debris cap; clusters are truncated once reached
    pub max_debris: usize,
}

impl Default for EntityTuning {
    fn default() -> Self {
        Self {
            debris_per_explosion: 10,
            debris_speed: 0.3,
            debris_min_lifespan: 40.0,
            debris_lifespan_spread: 30.0,
            debris_fade_ticks: 60.0,
            max_debris: 256,
        }
    }
}

/// Phase machine timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTuning {
    /// Reaching this level switches to the planet backdrop once per run
    pub planet_level: u32,
    /// Ticks the game-over screen stays up before returning to the menu
    pub gameover_delay_ticks: u32,
}

impl Default for PhaseTuning {
    fn default() -> Self {
        Self {
            planet_level: 11,
            gameover_delay_ticks: 30,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: DifficultyCurve,
    pub player: PlayerTuning,
    pub combat: CombatTuning,
    pub entities: EntityTuning,
    pub phases: PhaseTuning,
}

impl Tuning {
    /// Parse and validate a JSON document (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults when it is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(Error::InvalidTuning { field, reason })
            }
        }

        let d = &self.difficulty;
        check(d.min_spawn_interval >= 1.0, "difficulty.min_spawn_interval", "must be at least 1")?;
        check(d.distance_per_interval_step > 0, "difficulty.distance_per_interval_step", "must be positive")?;
        check(d.base_speed > 0.0, "difficulty.base_speed", "must be positive")?;
        check(d.speed_per_level >= 0.0, "difficulty.speed_per_level", "must not be negative")?;
        check(d.speed_jitter >= 0.0, "difficulty.speed_jitter", "must not be negative")?;
        check(d.level_distance > 0, "difficulty.level_distance", "must be positive")?;
        check(d.boss_level_interval > 0, "difficulty.boss_level_interval", "must be positive")?;
        check(
            d.boss_speed_factor > 0.0,
            "difficulty.boss_speed_factor",
            "must be positive",
        )?;

        let p = &self.player;
        check(p.start_health > 0, "player.start_health", "must be positive")?;
        check(p.blink_period >= 2, "player.blink_period", "must be at least 2")?;
        check(p.shield_ticks > 0, "player.shield_ticks", "must be positive")?;
        check(p.skill_ticks > 0, "player.skill_ticks", "must be positive")?;

        let c = &self.combat;
        check(c.projectile_speed > 0.0, "combat.projectile_speed", "must be positive")?;
        check(c.projectile_hit_radius > 0.0, "combat.projectile_hit_radius", "must be positive")?;

        let e = &self.entities;
        check(e.debris_fade_ticks > 0.0, "entities.debris_fade_ticks", "must be positive")?;
        Ok(())
    }
}
