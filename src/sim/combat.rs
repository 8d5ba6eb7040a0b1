//! Combat resolution
//!
//! Two passes per tick, in this order:
//! 1. obstacles reaching the player (damage, obstacle removed, no score)
//! 2. projectiles and the beam hitting obstacles (damage, kills, score)

use glam::Vec3;

use super::player::DamageOutcome;
use super::state::{GameEvent, GameState, WeaponKind};
use crate::tuning::Tuning;

/// Damage dealt by one bullet
pub const PROJECTILE_DAMAGE: f32 = 1.0;

/// Obstacle-vs-player radius
pub fn player_hit_radius(boss: bool, shield_active: bool, tuning: &Tuning) -> f32 {
    let c = &tuning.combat;
    let base = if boss {
        c.boss_player_radius
    } else {
        c.player_radius
    };
    if shield_active {
        base + c.shield_radius_bonus
    } else {
        base
    }
}

/// Remove every obstacle touching the player, damaging the player for each.
///
/// Returns true if the player lost their last heart.
pub fn resolve_player_collisions(state: &mut GameState, tuning: &Tuning) -> bool {
    let GameState {
        registry,
        player,
        events,
        shake,
        ..
    } = state;

    let player_pos = player.pos();
    let mut fatal = false;

    registry.obstacles.retain(|o| {
        let radius = player_hit_radius(o.boss, player.shield_active, tuning);
        if player_pos.distance(o.pos) >= radius {
            return true;
        }
        if fatal {
            return false;
        }
        match player.take_damage(&tuning.player) {
            DamageOutcome::Blocked => {}
            DamageOutcome::Hit { health } => {
                log::debug!("Player hit, {} hearts left", health);
                events.push(GameEvent::PlayerHit { health });
                shake.trigger(tuning.combat.hit_shake);
            }
            DamageOutcome::Fatal => {
                events.push(GameEvent::PlayerHit { health: 0 });
                shake.trigger(tuning.combat.hit_shake);
                fatal = true;
            }
        }
        false
    });

    fatal
}

/// Resolve bullets and the beam against obstacles.
///
/// Each bullet stops at the first obstacle it touches in registration order.
/// The beam damages every obstacle in its column and persists.
/// Returns the number of obstacles destroyed.
pub fn resolve_projectile_hits(state: &mut GameState, tuning: &Tuning) -> usize {
    let c = &tuning.combat;
    let mut kills: Vec<(Vec3, bool)> = Vec::new();

    {
        let registry = &mut state.registry;
        let beam_x = registry.beam().map(|b| b.pos.x);
        let obstacles = &mut registry.obstacles;

        registry.projectiles.retain(|p| {
            if p.weapon == WeaponKind::Beam {
                return true;
            }
            for o in obstacles.iter_mut() {
                if o.is_destroyed() {
                    continue;
                }
                if p.pos.distance(o.pos) < c.projectile_hit_radius {
                    o.damage(PROJECTILE_DAMAGE);
                    if o.is_destroyed() {
                        kills.push((o.pos, o.boss));
                    }
                    return false;
                }
            }
            true
        });

        if let Some(beam_x) = beam_x {
            for o in obstacles.iter_mut() {
                if o.is_destroyed() || (o.pos.x - beam_x).abs() >= c.beam_half_width {
                    continue;
                }
                o.damage(c.beam_damage_per_tick);
                if o.is_destroyed() {
                    kills.push((o.pos, o.boss));
                }
            }
        }

        obstacles.retain(|o| !o.is_destroyed());
    }

    for &(pos, boss) in &kills {
        let level = state.progress.level;
        let points = if boss {
            level as u64 * c.points_per_boss_level
        } else {
            c.points_per_kill
        };
        state.progress.score += points;
        state.progress.destroyed += 1;
        log::debug!("Destroyed {} at {:?} (+{})", if boss { "boss" } else { "obstacle" }, pos, points);

        let count = tuning.entities.debris_per_explosion;
        state
            .registry
            .spawn_debris_cluster(pos, count, &tuning.entities, &mut state.rng);
        state.shake.trigger(c.explosion_shake);
        state.emit(GameEvent::ObstacleDestroyed { pos, boss, points });
    }

    kills.len()
}
