//! Difficulty curve
//!
//! Pure functions of `(level, distance)` that parameterize spawning. Level is
//! the discrete milestone, distance the continuous pressure inside a level.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Obstacle size class chosen at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeBucket {
    /// Fast, fragile rocks (level 5+)
    Small,
    /// Level 3+
    Medium,
    /// Slow, tough rocks
    Large,
}

/// Balance knobs for the difficulty model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Spawn interval at level 0 before any reduction (ticks)
    pub base_spawn_interval: f32,
    /// Interval shaved off per level
    pub spawn_interval_per_level: f32,
    /// Floor applied to the level-based interval
    pub level_interval_floor: f32,
    /// One tick shaved off per this much distance
    pub distance_per_interval_step: u64,
    /// Absolute floor on the spawn interval
    pub min_spawn_interval: f32,

    /// Obstacle speed at level 0
    pub base_speed: f32,
    /// Speed added per level
    pub speed_per_level: f32,
    /// Speed added per unit distance
    pub speed_per_distance: f32,
    /// Cap on the distance speed bonus
    pub max_distance_speed_bonus: f32,
    /// Upper bound of the uniform speed jitter
    pub speed_jitter: f32,

    /// Distance covered per level
    pub level_distance: u64,
    /// Boss levels are multiples of this
    pub boss_level_interval: u32,
    /// Level progress (percent) needed before a boss appears
    pub boss_progress_threshold: f32,
    /// Boss health per level
    pub boss_health_per_level: u32,
    /// Boss speed relative to a normal obstacle
    pub boss_speed_factor: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base_spawn_interval: 50.0,
            spawn_interval_per_level: 1.5,
            level_interval_floor: 10.0,
            distance_per_interval_step: 800,
            min_spawn_interval: 8.0,

            base_speed: 0.2,
            speed_per_level: 0.02,
            speed_per_distance: 0.00002,
            max_distance_speed_bonus: 0.1,
            speed_jitter: 0.02,

            level_distance: 1000,
            boss_level_interval: 5,
            boss_progress_threshold: 90.0,
            boss_health_per_level: 2,
            boss_speed_factor: 0.5,
        }
    }
}

impl DifficultyCurve {
    /// Level for a cumulative distance (starts at 1)
    pub fn level_for(&self, distance: u64) -> u32 {
        (distance / self.level_distance) as u32 + 1
    }

    /// Percentage of the current level bracket covered, in [0, 100)
    pub fn level_progress(&self, distance: u64) -> f32 {
        (distance % self.level_distance) as f32 * 100.0 / self.level_distance as f32
    }

    /// Ticks between obstacle spawns
    pub fn spawn_interval(&self, level: u32, distance: u64) -> f32 {
        let base = (self.base_spawn_interval - level as f32 * self.spawn_interval_per_level)
            .max(self.level_interval_floor);
        let reduction = (distance / self.distance_per_interval_step) as f32;
        (base - reduction).max(self.min_spawn_interval)
    }

    /// Deterministic part of the obstacle speed
    pub fn base_obstacle_speed(&self, level: u32, distance: u64) -> f32 {
        let base = self.base_speed + level as f32 * self.speed_per_level;
        let bonus = (self.speed_per_distance * distance as f32).min(self.max_distance_speed_bonus);
        base + bonus
    }

    /// Obstacle speed including jitter
    pub fn obstacle_speed(&self, level: u32, distance: u64, rng: &mut impl Rng) -> f32 {
        self.base_obstacle_speed(level, distance) + rng.random::<f32>() * self.speed_jitter
    }

    /// Pick a size bucket and a size inside it.
    ///
    /// A single roll is shared by both checks, so at level 3-4 the medium
    /// bucket takes 60% and at level 5+ each of small and medium take 30%.
    pub fn obstacle_size(&self, level: u32, rng: &mut impl Rng) -> (SizeBucket, f32) {
        let roll: f32 = rng.random();
        if level >= 5 && roll < 0.3 {
            (SizeBucket::Small, rng.random::<f32>() * 0.3 + 0.3)
        } else if level >= 3 && roll < 0.6 {
            (SizeBucket::Medium, rng.random::<f32>() * 0.4 + 0.6)
        } else {
            (SizeBucket::Large, rng.random::<f32>() * 0.5 + 0.8)
        }
    }

    /// Whether a boss should be live at this level and progress
    pub fn boss_trigger(&self, level: u32, level_progress: f32) -> bool {
        level.is_multiple_of(self.boss_level_interval)
            && level_progress >= self.boss_progress_threshold
    }

    pub fn boss_health(&self, level: u32) -> u32 {
        level * self.boss_health_per_level
    }

    pub fn boss_speed(&self, level: u32, distance: u64, rng: &mut impl Rng) -> f32 {
        self.obstacle_speed(level, distance, rng) * self.boss_speed_factor
    }
}

/// Hit points for an obstacle of the given size
pub fn obstacle_health(size: f32) -> u32 {
    if size < 0.6 {
        1
    } else if size < 1.0 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_interval_level_one() {
        let curve = DifficultyCurve::default();
        let interval = curve.spawn_interval(1, 0);
        assert!((48.0..=49.0).contains(&interval), "got {}", interval);
    }

    #[test]
    fn test_spawn_interval_floors() {
        let curve = DifficultyCurve::default();
        // Level floor kicks in at high levels
        assert_eq!(curve.spawn_interval(40, 0), 10.0);
        // Distance eats into it down to the absolute floor
        assert_eq!(curve.spawn_interval(40, 800 * 5), 8.0);
        assert_eq!(curve.spawn_interval(1, 1_000_000), 8.0);
    }

    #[test]
    fn test_speed_level_one() {
        let curve = DifficultyCurve::default();
        let base = curve.base_obstacle_speed(1, 0);
        assert!((base - 0.22).abs() < 1e-6);

        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let speed = curve.obstacle_speed(1, 0, &mut rng);
            assert!(speed >= base && speed < base + 0.02 + 1e-6);
        }
    }

    #[test]
    fn test_distance_bonus_is_capped() {
        let curve = DifficultyCurve::default();
        let far = curve.base_obstacle_speed(1, 10_000_000);
        assert!((far - (0.22 + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_obstacle_health_buckets() {
        assert_eq!(obstacle_health(0.3), 1);
        assert_eq!(obstacle_health(0.59), 1);
        assert_eq!(obstacle_health(0.6), 2);
        assert_eq!(obstacle_health(0.99), 2);
        assert_eq!(obstacle_health(1.0), 3);
        assert_eq!(obstacle_health(1.3), 3);
    }

    #[test]
    fn test_size_buckets_by_level() {
        let curve = DifficultyCurve::default();
        let mut rng = Pcg32::seed_from_u64(1234);
        for _ in 0..500 {
            let (bucket, size) = curve.obstacle_size(1, &mut rng);
            assert_eq!(bucket, SizeBucket::Large);
            assert!((0.8..1.3).contains(&size));
        }
        let mut saw_small = false;
        let mut saw_medium = false;
        for _ in 0..500 {
            match curve.obstacle_size(5, &mut rng) {
                (SizeBucket::Small, s) => {
                    saw_small = true;
                    assert!((0.3..0.6).contains(&s));
                }
                (SizeBucket::Medium, s) => {
                    saw_medium = true;
                    assert!((0.6..1.0).contains(&s));
                }
                (SizeBucket::Large, _) => {}
            }
        }
        assert!(saw_small && saw_medium);
    }

    #[test]
    fn test_boss_trigger() {
        let curve = DifficultyCurve::default();
        assert!(curve.boss_trigger(5, 90.0));
        assert!(curve.boss_trigger(10, 99.9));
        assert!(!curve.boss_trigger(5, 89.9));
        assert!(!curve.boss_trigger(4, 95.0));
        assert_eq!(curve.boss_health(5), 10);
    }

    #[test]
    fn test_level_and_progress() {
        let curve = DifficultyCurve::default();
        assert_eq!(curve.level_for(0), 1);
        assert_eq!(curve.level_for(999), 1);
        assert_eq!(curve.level_for(1000), 2);
        assert!((curve.level_progress(4950) - 95.0).abs() < 1e-4);
    }
}
