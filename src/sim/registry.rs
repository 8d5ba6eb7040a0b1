//! Entity registry: live obstacles, projectiles and debris
//!
//! Collections are plain vectors in registration order. Removal compacts with
//! `retain`, which keeps that order stable for the combat tie-break.

use glam::Vec3;
use rand::Rng;

use super::difficulty::{DifficultyCurve, obstacle_health};
use super::state::{Debris, Obstacle, Projectile, WeaponKind};
use crate::consts::*;
use crate::tuning::{CombatTuning, EntityTuning};

/// Owner of every live entity
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub debris: Vec<Debris>,
    /// Ticks since the last regular spawn
    pub spawn_counter: u32,
}

impl EntityRegistry {
    /// Drop everything (quit to menu, new run)
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.projectiles.clear();
        self.debris.clear();
        self.spawn_counter = 0;
    }

    pub fn live_count(&self) -> usize {
        self.obstacles.len() + self.projectiles.len() + self.debris.len()
    }

    pub fn has_boss(&self) -> bool {
        self.obstacles.iter().any(|o| o.boss)
    }

    /// Count one tick and spawn a regular obstacle once the interval is exceeded
    pub fn tick_spawner(
        &mut self,
        curve: &DifficultyCurve,
        level: u32,
        distance: u64,
        rng: &mut impl Rng,
    ) -> bool {
        self.spawn_counter += 1;
        if self.spawn_counter as f32 > curve.spawn_interval(level, distance) {
            self.spawn_obstacle(curve, level, distance, rng);
            self.spawn_counter = 0;
            true
        } else {
            false
        }
    }

    /// Spawn a regular obstacle on a random lane
    pub fn spawn_obstacle(
        &mut self,
        curve: &DifficultyCurve,
        level: u32,
        distance: u64,
        rng: &mut impl Rng,
    ) {
        let lane = LANES[rng.random_range(0..LANES.len())];
        let (bucket, size) = curve.obstacle_size(level, rng);
        let health = obstacle_health(size) as f32;
        let speed = curve.obstacle_speed(level, distance, rng);
        let spin = Vec3::new(
            rng.random::<f32>() * 0.02 - 0.01,
            rng.random::<f32>() * 0.02 - 0.01,
            rng.random::<f32>() * 0.02 - 0.01,
        );

        log::debug!("Spawn {:?} obstacle (size {:.2}) in lane {}", bucket, size, lane);
        self.obstacles.push(Obstacle {
            pos: Vec3::new(lane, 0.0, OBSTACLE_SPAWN_Z),
            size,
            health,
            max_health: health,
            speed,
            boss: false,
            rotation: Vec3::ZERO,
            spin,
        });
    }

    /// Spawn the boss in the centre lane; false if one is already live.
    ///
    /// Leaves the regular spawn counter alone.
    pub fn spawn_boss(
        &mut self,
        curve: &DifficultyCurve,
        level: u32,
        distance: u64,
        rng: &mut impl Rng,
    ) -> bool {
        if self.has_boss() {
            return false;
        }
        let health = curve.boss_health(level) as f32;
        log::info!("Boss spawned at level {} with {} health", level, health);
        self.obstacles.push(Obstacle {
            pos: Vec3::new(0.0, 0.0, OBSTACLE_SPAWN_Z),
            size: BOSS_SIZE,
            health,
            max_health: health,
            speed: curve.boss_speed(level, distance, rng),
            boss: true,
            rotation: Vec3::ZERO,
            spin: Vec3::splat(BOSS_SPIN),
        });
        true
    }

    /// Fire from lateral position `origin_x`.
    ///
    /// Multi-shot adds a three-way volley. The beam is a single persistent
    /// projectile that is re-aimed rather than duplicated.
    pub fn spawn_projectile(&mut self, weapon: WeaponKind, origin_x: f32) {
        let z = -PROJECTILE_SPAWN_OFFSET;
        match weapon {
            WeaponKind::Standard => self.projectiles.push(Projectile {
                pos: Vec3::new(origin_x, 0.0, z),
                weapon,
            }),
            WeaponKind::MultiShot => {
                for i in -1..=1 {
                    self.projectiles.push(Projectile {
                        pos: Vec3::new(origin_x + i as f32 * MULTI_SHOT_SPREAD, 0.0, z),
                        weapon,
                    });
                }
            }
            WeaponKind::Beam => {
                let pos = Vec3::new(origin_x, 0.0, BEAM_CENTER_Z);
                match self.beam_mut() {
                    Some(beam) => beam.pos = pos,
                    None => self.projectiles.push(Projectile { pos, weapon }),
                }
            }
        }
    }

    pub fn beam(&self) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.weapon == WeaponKind::Beam)
    }

    fn beam_mut(&mut self) -> Option<&mut Projectile> {
        self.projectiles
            .iter_mut()
            .find(|p| p.weapon == WeaponKind::Beam)
    }

    /// Remove the beam if present; true if one was removed
    pub fn remove_beam(&mut self) -> bool {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.weapon != WeaponKind::Beam);
        self.projectiles.len() != before
    }

    /// Burst of fragments at `pos`, truncated at the debris budget
    pub fn spawn_debris_cluster(
        &mut self,
        pos: Vec3,
        count: u32,
        tuning: &EntityTuning,
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            if self.debris.len() >= tuning.max_debris {
                break;
            }
            let dir = Vec3::new(
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
            )
            .normalize_or_zero();
            self.debris.push(Debris {
                pos,
                vel: dir * tuning.debris_speed,
                lifespan: tuning.debris_min_lifespan
                    + rng.random::<f32>() * tuning.debris_lifespan_spread,
            });
        }
    }

    /// Move obstacles toward the player and drop those that slipped past.
    ///
    /// Returns how many were despawned (no score for these).
    pub fn advance_and_prune(&mut self) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.pos.z += obstacle.speed;
            obstacle.rotation += obstacle.spin;
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.pos.z <= OBSTACLE_DESPAWN_Z);
        before - self.obstacles.len()
    }

    /// Move bullets forward and drop those past the travel bound.
    ///
    /// The beam does not travel.
    pub fn advance_projectiles(&mut self, tuning: &CombatTuning) {
        for projectile in &mut self.projectiles {
            if projectile.weapon != WeaponKind::Beam {
                projectile.pos.z -= tuning.projectile_speed;
            }
        }
        self.projectiles
            .retain(|p| p.weapon == WeaponKind::Beam || p.pos.z >= PROJECTILE_MAX_Z);
    }

    /// Drift and fade debris
    pub fn advance_debris(&mut self) {
        for piece in &mut self.debris {
            piece.pos += piece.vel;
            piece.lifespan -= 1.0;
        }
        self.debris.retain(|d| d.lifespan > 0.0);
    }
}
