//! Per-frame simulation tick
//!
//! Phase state machine plus the ordered gameplay pipeline:
//! input -> level -> spawn -> advance -> obstacles vs player ->
//! projectiles vs obstacles -> timers -> debris -> distance.

use super::combat::{player_hit_radius, resolve_player_collisions, resolve_projectile_hits};
use super::state::{Backdrop, Craft, GameEvent, GamePhase, GameState, WeaponKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Named input actions, independent of device or key mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Shield,
    Skill,
    /// Toggle pause while playing
    Pause,
    Resume,
    QuitToMenu,
    StartGame,
    PrevCraft,
    NextCraft,
    ConfirmCraft,
}

/// Raw input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement
    pub move_left: bool,
    pub move_right: bool,
    /// Fire button currently down (drives the beam)
    pub fire_held: bool,
    /// Fire pressed since the last tick
    pub fire: bool,
    pub shield: bool,
    pub skill: bool,
    pub pause: bool,
    pub resume: bool,
    pub quit_to_menu: bool,
    pub start: bool,
    pub prev_craft: bool,
    pub next_craft: bool,
    pub confirm: bool,
}

impl TickInput {
    /// Fold one host event into this tick's input
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(action) => match action {
                Action::MoveLeft => self.move_left = true,
                Action::MoveRight => self.move_right = true,
                Action::Fire => {
                    // Key repeat does not refire
                    if !self.fire_held {
                        self.fire = true;
                    }
                    self.fire_held = true;
                }
                Action::Shield => self.shield = true,
                Action::Skill => self.skill = true,
                Action::Pause => self.pause = true,
                Action::Resume => self.resume = true,
                Action::QuitToMenu => self.quit_to_menu = true,
                Action::StartGame => self.start = true,
                Action::PrevCraft => self.prev_craft = true,
                Action::NextCraft => self.next_craft = true,
                Action::ConfirmCraft => self.confirm = true,
            },
            InputEvent::Released(action) => match action {
                Action::MoveLeft => self.move_left = false,
                Action::MoveRight => self.move_right = false,
                Action::Fire => self.fire_held = false,
                _ => {}
            },
        }
    }

    /// Clear one-shot inputs after they have been consumed; held state stays
    pub fn clear_one_shots(&mut self) {
        *self = Self {
            move_left: self.move_left,
            move_right: self.move_right,
            fire_held: self.fire_held,
            ..Default::default()
        };
    }
}

/// Record that a craft's assets finished loading (or failed).
///
/// Once every craft has reported, loading gives way to the menu even if some
/// failed; the failure only shows up as `asset_error`.
pub fn mark_craft_loaded(state: &mut GameState, craft: Craft, ok: bool) {
    state.crafts_loaded[craft.index()] = Some(ok);
    if !ok {
        log::warn!("Failed to load craft {}", craft.name());
        state.asset_error = true;
    }
    if state.phase == GamePhase::Loading && state.crafts_loaded.iter().all(Option::is_some) {
        state.selected_craft = Craft::Starfire;
        state.set_phase(GamePhase::Menu);
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Loading => {}

        GamePhase::Menu => {
            idle_menu(state);
            cycle_craft(state, input);
            if input.start {
                state.set_phase(GamePhase::ShipSelection);
            }
        }

        GamePhase::ShipSelection => {
            idle_menu(state);
            cycle_craft(state, input);
            if input.confirm {
                log::info!("Selected craft {}", state.selected_craft.name());
                state.set_phase(GamePhase::Transitioning);
            }
        }

        GamePhase::Transitioning => {
            state.menu_spin = 0.0;
            if state.camera.approach(GAME_CAMERA) {
                state.camera.pos = GAME_CAMERA;
                state.reset_run(tuning);
                state.hud_visible = true;
                state.set_phase(GamePhase::Playing);
            }
        }

        GamePhase::LevelTransitioning => {
            if state.camera.approach(PLANET_CAMERA) {
                state.camera.pos = PLANET_CAMERA;
                state.set_phase(GamePhase::Playing);
            }
        }

        GamePhase::Playing => {
            if input.pause {
                state.set_phase(GamePhase::Paused);
                return;
            }
            step_playing(state, input, tuning);
        }

        GamePhase::Paused => {
            if input.quit_to_menu {
                quit_to_menu(state, tuning);
            } else if input.pause || input.resume {
                state.set_phase(GamePhase::Playing);
            }
            // Frozen: nothing else advances
            return;
        }

        GamePhase::GameOver => {
            state.gameover_ticks = state.gameover_ticks.saturating_sub(1);
            if state.gameover_ticks == 0 {
                quit_to_menu(state, tuning);
            }
        }
    }

    state.shake.decay();
}

fn idle_menu(state: &mut GameState) {
    state.menu_spin += MENU_SPIN;
    state.camera.approach(MENU_CAMERA);
}

fn cycle_craft(state: &mut GameState, input: &TickInput) {
    let step = input.next_craft as isize - input.prev_craft as isize;
    if step != 0 {
        state.selected_craft = state.selected_craft.cycle(step);
        state.player.craft = state.selected_craft;
    }
}

/// Unconditional full reset back to the title screen
fn quit_to_menu(state: &mut GameState, tuning: &Tuning) {
    state.reset_run(tuning);
    state.hud_visible = false;
    state.gameover_ticks = 0;
    state.camera.pos = MENU_CAMERA;
    state.selected_craft = Craft::Starfire;
    state.player.craft = Craft::Starfire;
    state.set_backdrop(Backdrop::Galaxy);
    state.set_phase(GamePhase::Menu);
}

fn game_over(state: &mut GameState, tuning: &Tuning) {
    let summary = state.progress.summary();
    log::info!(
        "Game over: score {}, distance {}, destroyed {}, level {}",
        summary.score,
        summary.distance,
        summary.destroyed,
        summary.level
    );
    state.registry.remove_beam();
    state.gameover_ticks = tuning.phases.gameover_delay_ticks.max(1);
    state.set_phase(GamePhase::GameOver);
    state.emit(GameEvent::GameOver(summary));
}

/// One tick of active play
fn step_playing(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    // Input
    state.player.steer(input.move_left, input.move_right, &tuning.player);
    if input.shield && state.player.activate_shield(&tuning.player) {
        state.emit(GameEvent::ShieldActivated);
    }
    if input.skill && state.player.activate_skill(&tuning.player) {
        state.emit(GameEvent::SkillActivated);
    }
    fire(state, input);

    update_level(state, tuning);

    // Spawning
    let level = state.progress.level;
    let distance = state.progress.distance;
    let curve = &tuning.difficulty;
    state.registry.tick_spawner(curve, level, distance, &mut state.rng);
    if curve.boss_trigger(level, state.progress.level_progress)
        && state.registry.spawn_boss(curve, level, distance, &mut state.rng)
    {
        state.emit(GameEvent::BossIncoming { level });
    }

    state.registry.advance_and_prune();

    if resolve_player_collisions(state, tuning) {
        game_over(state, tuning);
        return;
    }

    state.registry.advance_projectiles(&tuning.combat);
    resolve_projectile_hits(state, tuning);

    let expiry = state.player.decay_timers(&tuning.player);
    if expiry.skill {
        state.registry.remove_beam();
        state.emit(GameEvent::SkillExpired);
    }

    state.registry.advance_debris();

    if !state.player.is_stalling(&tuning.player) {
        state.progress.distance += 1;
    }
}

/// Handle fire for the equipped weapon
fn fire(state: &mut GameState, input: &TickInput) {
    let x = state.player.x;
    let weapon = state.player.active_weapon();

    if weapon == WeaponKind::Beam {
        if input.fire_held {
            let starting = state.registry.beam().is_none();
            state.registry.spawn_projectile(WeaponKind::Beam, x);
            if starting {
                state.emit(GameEvent::Fired(WeaponKind::Beam));
            }
        } else {
            state.registry.remove_beam();
        }
    } else if input.fire {
        state.registry.spawn_projectile(weapon, x);
        state.emit(GameEvent::Fired(weapon));
    }
}

/// Recompute level from distance; level-ups and the planet milestone
fn update_level(state: &mut GameState, tuning: &Tuning) {
    let curve = &tuning.difficulty;
    let level = curve.level_for(state.progress.distance);

    if level > state.progress.level {
        state.progress.level = level;
        log::info!("Level up: {}", level);
        state.emit(GameEvent::LevelUp { level });

        if level == tuning.phases.planet_level && !state.progress.planet_level {
            state.progress.planet_level = true;
            state.set_backdrop(Backdrop::Planetscape);
            state.set_phase(GamePhase::LevelTransitioning);
        }
    }
    state.progress.level_progress = curve.level_progress(state.progress.distance);
}

/// Demo/attract-mode pilot: dodges, shoots and keeps moving
pub fn autopilot_input(state: &GameState, tuning: &Tuning) -> TickInput {
    let mut input = TickInput::default();

    match state.phase {
        GamePhase::Menu => input.start = true,
        GamePhase::ShipSelection => input.confirm = true,
        GamePhase::Playing => {
            let x = state.player.x;

            // Closest obstacle that will reach us in our current column
            let threat = state
                .registry
                .obstacles
                .iter()
                .filter(|o| o.pos.z > -40.0 && o.pos.z < 1.0)
                .filter(|o| (o.pos.x - x).abs() < player_hit_radius(o.boss, false, tuning) + 0.6)
                .max_by(|a, b| {
                    a.pos
                        .z
                        .partial_cmp(&b.pos.z)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            if let Some(o) = threat {
                // Dodge away from it, bouncing off the walls
                let mut go_left = if o.pos.x == x { x > 0.0 } else { o.pos.x > x };
                if go_left && x <= PLAYER_MIN_X + 0.5 {
                    go_left = false;
                } else if !go_left && x >= PLAYER_MAX_X - 0.5 {
                    go_left = true;
                }
                input.move_left = go_left;
                input.move_right = !go_left;
                if o.pos.z > -8.0 {
                    input.shield = true;
                }
            } else {
                // Weave so distance keeps counting
                let t = state.time_ticks as f32 * 0.02;
                let target = t.sin() * 3.0 + (t * 0.37).sin();
                input.move_left = target < x - 0.2;
                input.move_right = target > x + 0.2;
            }

            input.fire_held = true;
            input.fire = state.time_ticks.is_multiple_of(12);
            input.skill = state.registry.has_boss();
        }
        _ => {}
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning);
        mark_craft_loaded(&mut state, Craft::Starfire, true);
        mark_craft_loaded(&mut state, Craft::BlueNova, true);
        state.reset_run(tuning);
        state.set_phase(GamePhase::Playing);
        state.drain_events();
        state
    }

    fn press(action: Action) -> TickInput {
        let mut input = TickInput::default();
        input.apply(InputEvent::Pressed(action));
        input
    }

    #[test]
    fn test_loading_waits_for_all_crafts() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.phase, GamePhase::Loading);

        mark_craft_loaded(&mut state, Craft::Starfire, true);
        assert_eq!(state.phase, GamePhase::Loading);
        mark_craft_loaded(&mut state, Craft::BlueNova, false);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.asset_error);
    }

    #[test]
    fn test_menu_to_playing() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        mark_craft_loaded(&mut state, Craft::Starfire, true);
        mark_craft_loaded(&mut state, Craft::BlueNova, true);

        // Confirm outside ship selection is ignored
        tick(&mut state, &press(Action::ConfirmCraft), &tuning);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &press(Action::StartGame), &tuning);
        assert_eq!(state.phase, GamePhase::ShipSelection);

        tick(&mut state, &press(Action::NextCraft), &tuning);
        assert_eq!(state.selected_craft, Craft::BlueNova);

        tick(&mut state, &press(Action::ConfirmCraft), &tuning);
        assert_eq!(state.phase, GamePhase::Transitioning);

        let mut ticks = 0;
        while state.phase == GamePhase::Transitioning {
            tick(&mut state, &TickInput::default(), &tuning);
            ticks += 1;
            assert!(ticks < 500);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.hud_visible);
        assert_eq!(state.player.craft, Craft::BlueNova);
        assert_eq!(state.progress.distance, 0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let tuning = Tuning::default();
        let mut state = playing_state(&tuning);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), &tuning);
        }
        let distance = state.progress.distance;
        let obstacles: Vec<f32> = state.registry.obstacles.iter().map(|o| o.pos.z).collect();

        tick(&mut state, &press(Action::Pause), &tuning);
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..50 {
            tick(&mut state, &press(Action::Fire), &tuning);
        }
        assert_eq!(state.progress.distance, distance);
        let after: Vec<f32> = state.registry.obstacles.iter().map(|o| o.pos.z).collect();
        assert_eq!(obstacles, after);
        assert!(state.registry.projectiles.is_empty());

        tick(&mut state, &press(Action::Pause), &tuning);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_from_pause_resets() {
        let tuning = Tuning::default();
        let mut state = playing_state(&tuning);
        for _ in 0..200 {
            tick(&mut state, &press(Action::Fire), &tuning);
        }
        tick(&mut state, &press(Action::Pause), &tuning);
        tick(&mut state, &press(Action::QuitToMenu), &tuning);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.registry.live_count(), 0);
        assert_eq!(state.progress.distance, 0);
        assert!(!state.hud_visible);
    }

    #[test]
    fn test_stalling_freezes_distance() {
        let tuning = Tuning::default();
        let mut state = playing_state(&tuning);
        // Keep the field empty so nothing ends the run
        for _ in 0..400 {
            state.registry.obstacles.clear();
            tick(&mut state, &TickInput::default(), &tuning);
        }
        assert_eq!(state.progress.distance, 299);

        let mut input = TickInput::default();
        input.apply(InputEvent::Pressed(Action::MoveLeft));
        state.registry.obstacles.clear();
        tick(&mut state, &input, &tuning);
        assert_eq!(state.progress.distance, 300);
    }

    #[test]
    fn test_fatal_hit_goes_to_gameover_then_menu() {
        let tuning = Tuning::default();
        let mut state = playing_state(&tuning);
        state.player.health = 1;
        state.progress.score = 250;
        state.registry.spawn_obstacle(&tuning.difficulty, 1, 0, &mut state.rng);
        state.registry.obstacles[0].pos = glam::Vec3::new(0.0, 0.0, -0.3);
        state.registry.obstacles[0].speed = 0.2;

        tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver(s) if s.score == 250)));

        for _ in 0..tuning.phases.gameover_delay_ticks {
            tick(&mut state, &TickInput::default(), &tuning);
        }
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.progress.score, 0);
        assert_eq!(state.registry.live_count(), 0);
    }

    #[test]
    fn test_level_up_and_planet_transition() {
        let tuning = Tuning::default();
        let mut state = playing_state(&tuning);
        state.progress.level = 10;
        state.progress.distance = 10_000;

        tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.progress.level, 11);
        assert_eq!(state.phase, GamePhase::LevelTransitioning);
        assert_eq!(state.backdrop, Backdrop::Planetscape);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelUp { level: 11 }));

        let mut ticks = 0;
        while state.phase == GamePhase::LevelTransitioning {
            tick(&mut state, &TickInput::default(), &tuning);
            ticks += 1;
            assert!(ticks < 500);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        // Progression survives the transition
        assert_eq!(state.progress.level, 11);
        assert!(state.progress.distance >= 10_000);
    }

    #[test]
    fn test_boss_incoming_once() {
        let tuning = Tuning::default();
        let mut state = playing_state(&tuning);
        state.progress.level = 5;
        state.progress.distance = 4_950;
        state.player.activate_shield(&tuning.player);

        let mut incoming = 0;
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), &tuning);
            incoming += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::BossIncoming { .. }))
                .count();
            assert!(state.registry.obstacles.iter().filter(|o| o.boss).count() <= 1);
        }
        assert_eq!(incoming, 1);
    }

    #[test]
    fn test_starfire_beam_follows_fire_and_skill() {
        let tuning = Tuning::default();
        let mut state = playing_state(&tuning);

        tick(&mut state, &press(Action::Skill), &tuning);
        assert!(state.player.skill_active);

        let mut held = press(Action::Fire);
        tick(&mut state, &held, &tuning);
        assert!(state.registry.beam().is_some());
        held.clear_one_shots();
        tick(&mut state, &held, &tuning);
        assert!(state.registry.beam().is_some());

        held.apply(InputEvent::Released(Action::Fire));
        tick(&mut state, &held, &tuning);
        assert!(state.registry.beam().is_none());

        // Skill expiry also removes it
        let mut held = press(Action::Fire);
        held.clear_one_shots();
        held.fire_held = true;
        state.player.skill_ticks = 1;
        state.registry.obstacles.clear();
        tick(&mut state, &held, &tuning);
        assert!(!state.player.skill_active);
        assert!(state.registry.beam().is_none());
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut input = TickInput::default();
        input.apply(InputEvent::Pressed(Action::Fire));
        assert!(input.fire);
        input.clear_one_shots();
        input.apply(InputEvent::Pressed(Action::Fire));
        assert!(!input.fire);
        assert!(input.fire_held);
    }

    #[test]
    fn test_autopilot_starts_and_plays() {
        let tuning = Tuning::default();
        let mut state = GameState::new(777, &tuning);
        mark_craft_loaded(&mut state, Craft::Starfire, true);
        mark_craft_loaded(&mut state, Craft::BlueNova, true);

        let mut max_distance = 0;
        for _ in 0..2_000 {
            let input = autopilot_input(&state, &tuning);
            tick(&mut state, &input, &tuning);
            max_distance = max_distance.max(state.progress.distance);
        }
        // Weaving keeps the distance counter running
        assert!(max_distance > 100);
    }
}
