//! Player status: health, grace period, shield, skill and lateral position

use glam::Vec3;

use super::state::{Craft, WeaponKind};
use crate::consts::{PLAYER_MAX_X, PLAYER_MIN_X};
use crate::player_position;
use crate::tuning::PlayerTuning;

/// Result of an obstacle reaching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Shield or invincibility absorbed it
    Blocked,
    /// Lost a heart, grace period started
    Hit { health: u8 },
    /// Last heart gone
    Fatal,
}

/// What expired while decaying timers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerExpiry {
    pub shield: bool,
    pub skill: bool,
}

/// The player's craft state
#[derive(Debug, Clone)]
pub struct PlayerStatus {
    /// Lateral position, always within [-5, 5]
    pub x: f32,
    pub health: u8,
    pub invincible: bool,
    pub invincible_ticks: u32,
    pub shield_active: bool,
    pub shield_ticks: u32,
    pub shield_cooldown: u32,
    pub skill_active: bool,
    pub skill_ticks: u32,
    pub skill_cooldown: u32,
    pub craft: Craft,
    /// Consecutive ticks without lateral movement
    pub stationary_ticks: u32,
    blink_period: u32,
}

impl PlayerStatus {
    pub fn new(tuning: &PlayerTuning, craft: Craft) -> Self {
        Self {
            x: 0.0,
            health: tuning.start_health,
            invincible: false,
            invincible_ticks: 0,
            shield_active: false,
            shield_ticks: 0,
            shield_cooldown: 0,
            skill_active: false,
            skill_ticks: 0,
            skill_cooldown: 0,
            craft,
            stationary_ticks: 0,
            blink_period: tuning.blink_period.max(2),
        }
    }

    pub fn pos(&self) -> Vec3 {
        player_position(self.x)
    }

    /// Apply held movement for one tick and track stalling
    pub fn steer(&mut self, left: bool, right: bool, tuning: &PlayerTuning) {
        let prev = self.x;
        if left {
            self.x -= tuning.move_speed;
        }
        if right {
            self.x += tuning.move_speed;
        }
        self.x = self.x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);

        if self.x == prev {
            self.stationary_ticks = self.stationary_ticks.saturating_add(1);
        } else {
            self.stationary_ticks = 0;
        }
    }

    /// Distance stops accruing while the player camps in one spot
    pub fn is_stalling(&self, tuning: &PlayerTuning) -> bool {
        self.stationary_ticks >= tuning.stationary_ticks
    }

    pub fn damage_suppressed(&self) -> bool {
        self.shield_active || self.invincible
    }

    pub fn take_damage(&mut self, tuning: &PlayerTuning) -> DamageOutcome {
        if self.damage_suppressed() {
            return DamageOutcome::Blocked;
        }

        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            return DamageOutcome::Fatal;
        }

        self.invincible = true;
        self.invincible_ticks = tuning.invincibility_ticks;
        DamageOutcome::Hit {
            health: self.health,
        }
    }

    /// Raise the shield; false if already up or cooling down
    pub fn activate_shield(&mut self, tuning: &PlayerTuning) -> bool {
        if self.shield_active || self.shield_cooldown > 0 {
            return false;
        }
        self.shield_active = true;
        self.shield_ticks = tuning.shield_ticks;
        true
    }

    /// Start the skill window; false if already running or cooling down
    pub fn activate_skill(&mut self, tuning: &PlayerTuning) -> bool {
        if self.skill_active || self.skill_cooldown > 0 {
            return false;
        }
        self.skill_active = true;
        self.skill_ticks = tuning.skill_ticks;
        true
    }

    /// Weapon for a fire press right now
    pub fn active_weapon(&self) -> WeaponKind {
        if self.skill_active {
            self.craft.skill_weapon()
        } else {
            WeaponKind::Standard
        }
    }

    /// Count down shield, skill and invincibility by one tick
    pub fn decay_timers(&mut self, tuning: &PlayerTuning) -> TimerExpiry {
        let mut expiry = TimerExpiry::default();

        if self.shield_active {
            self.shield_ticks = self.shield_ticks.saturating_sub(1);
            if self.shield_ticks == 0 {
                self.shield_active = false;
                self.shield_cooldown = tuning.shield_cooldown_ticks;
                expiry.shield = true;
            }
        } else if self.shield_cooldown > 0 {
            self.shield_cooldown -= 1;
        }

        if self.skill_active {
            self.skill_ticks = self.skill_ticks.saturating_sub(1);
            if self.skill_ticks == 0 {
                self.skill_active = false;
                self.skill_cooldown = tuning.skill_cooldown_ticks;
                expiry.skill = true;
            }
        } else if self.skill_cooldown > 0 {
            self.skill_cooldown -= 1;
        }

        if self.invincible {
            self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
            if self.invincible_ticks == 0 {
                self.invincible = false;
            }
        }

        expiry
    }

    /// Blink while invincible: visible for the first half of each period
    pub fn visible(&self) -> bool {
        !self.invincible || self.invincible_ticks % self.blink_period < self.blink_period / 2
    }
}
