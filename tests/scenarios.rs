//! End-to-end scenarios through the session and the simulation core.
//!
//! Covered:
//! 1. Difficulty at the start of a run.
//! 2. Obstacle contact costs a heart and starts the grace period.
//! 3. Two bullets destroy a 2-health obstacle; the first only chips it.
//! 4. Losing the last heart ends the run and updates the best score only when beaten.
//! 5. Full phase flow from loading to play and back.
//! 6. Planet backdrop at level 11.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use space_dodger::audio::{AudioCommand, MusicTrack};
use space_dodger::sim::combat::{resolve_player_collisions, resolve_projectile_hits};
use space_dodger::sim::{
    Action, Backdrop, Craft, DifficultyCurve, GameEvent, GamePhase, GameState, InputEvent,
    Obstacle, Projectile, WeaponKind,
};
use space_dodger::{BestRecords, ScoreStore, Session, Settings, Tuning};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn obstacle(x: f32, z: f32, health: f32) -> Obstacle {
    Obstacle {
        pos: Vec3::new(x, 0.0, z),
        size: 0.8,
        health,
        max_health: health,
        speed: 0.2,
        boss: false,
        rotation: Vec3::ZERO,
        spin: Vec3::ZERO,
    }
}

fn bullet_at(pos: Vec3) -> Projectile {
    Projectile {
        pos,
        weapon: WeaponKind::Standard,
    }
}

/// Store shared with the test so writes can be observed after the session owns it
#[derive(Clone, Default)]
struct SharedStore(std::rc::Rc<std::cell::RefCell<BestRecords>>);

impl ScoreStore for SharedStore {
    fn best(&self) -> BestRecords {
        *self.0.borrow()
    }

    fn record_score(&mut self, score: u64) -> bool {
        self.0.borrow_mut().record_score(score)
    }

    fn record_distance(&mut self, distance: u64) -> bool {
        self.0.borrow_mut().record_distance(distance)
    }
}

fn loaded_session(store: SharedStore) -> Session {
    let mut session = Session::new(7, Tuning::default(), Settings::default(), Box::new(store));
    session.craft_loaded(Craft::Starfire, true);
    session.craft_loaded(Craft::BlueNova, true);
    session
}

fn tap(session: &mut Session, action: Action) {
    session.on_input(InputEvent::Pressed(action));
    session.tick();
    session.on_input(InputEvent::Released(action));
}

fn play(session: &mut Session) {
    tap(session, Action::StartGame);
    tap(session, Action::ConfirmCraft);
    for _ in 0..500 {
        if session.state().phase == GamePhase::Playing {
            return;
        }
        session.tick();
    }
    panic!("transition never finished");
}

/// Sweep back and forth without dodging until the run ends
fn crash(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..20_000 {
        if session.state().phase == GamePhase::GameOver {
            return events;
        }
        // Keep moving so distance accrues, but never dodge
        let action = if session.state().time_ticks % 40 < 20 {
            Action::MoveLeft
        } else {
            Action::MoveRight
        };
        session.on_input(InputEvent::Pressed(action));
        events.extend(session.tick().events);
        session.on_input(InputEvent::Released(action));
    }
    panic!("run never ended");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn opening_difficulty() {
    let curve = DifficultyCurve::default();
    let interval = curve.spawn_interval(1, 0);
    assert!((48.0..=49.0).contains(&interval));

    let mut rng = Pcg32::seed_from_u64(3);
    for _ in 0..100 {
        let speed = curve.obstacle_speed(1, 0, &mut rng);
        assert!((0.219..0.241).contains(&speed));
    }
}

#[test]
fn contact_costs_a_heart() {
    let tuning = Tuning::default();
    let mut state = GameState::new(1, &tuning);
    state.registry.obstacles.push(obstacle(0.0, 0.0, 3.0));

    assert!(!resolve_player_collisions(&mut state, &tuning));
    assert_eq!(state.player.health, 2);
    assert!(state.player.invincible);
    assert_eq!(state.player.invincible_ticks, 120);
    assert!(state.registry.obstacles.is_empty());
}

#[test]
fn two_bullets_destroy_a_medium_obstacle() {
    let tuning = Tuning::default();
    let mut state = GameState::new(1, &tuning);
    state.registry.obstacles.push(obstacle(2.0, -20.0, 2.0));

    state.registry.projectiles.push(bullet_at(Vec3::new(2.0, 0.0, -20.5)));
    resolve_projectile_hits(&mut state, &tuning);
    assert_eq!(state.registry.obstacles.len(), 1);
    assert_eq!(state.registry.obstacles[0].health, 1.0);
    assert_eq!(state.progress.score, 0);

    state.registry.projectiles.push(bullet_at(Vec3::new(2.0, 0.0, -20.5)));
    resolve_projectile_hits(&mut state, &tuning);
    assert!(state.registry.obstacles.is_empty());
    assert_eq!(state.progress.score, 50);
    assert_eq!(state.progress.destroyed, 1);
    let destroyed = state
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::ObstacleDestroyed { points: 50, .. }))
        .count();
    assert_eq!(destroyed, 1);
}

#[test]
fn game_over_records_only_better_runs() {
    let shared = SharedStore::default();
    shared.0.borrow_mut().best_score = Some(u64::MAX);
    let mut session = loaded_session(shared.clone());

    play(&mut session);
    let events = crash(&mut session);
    assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver(_))));
    // A lower score never overwrites the best
    assert_eq!(shared.0.borrow().best_score, Some(u64::MAX));

    // Wait out the delay; the menu shows the stored records
    for _ in 0..60 {
        session.tick();
    }
    assert_eq!(session.state().phase, GamePhase::Menu);
    assert_eq!(session.best(), *shared.0.borrow());
    assert_eq!(session.state().selected_craft, Craft::Starfire);
}

#[test]
fn game_over_beats_empty_store() {
    let shared = SharedStore::default();
    let mut session = loaded_session(shared.clone());

    play(&mut session);
    crash(&mut session);
    let run = session.last_run().unwrap_or_else(|| panic!("no run recorded"));
    assert!(run.distance > 0);
    assert_eq!(shared.0.borrow().best_distance, Some(run.distance));
    if run.score > 0 {
        assert_eq!(shared.0.borrow().best_score, Some(run.score));
    } else {
        assert_eq!(shared.0.borrow().best_score, None);
    }
}

#[test]
fn phase_flow_and_music() {
    let mut session = Session::new(
        11,
        Tuning::default(),
        Settings::default(),
        Box::new(BestRecords::default()),
    );
    assert_eq!(session.state().phase, GamePhase::Loading);
    assert_eq!(session.menu_subtitle(), "LOADING ASSETS...");

    session.craft_loaded(Craft::Starfire, true);
    session.craft_loaded(Craft::BlueNova, true);
    let frame = session.tick();
    assert_eq!(session.state().phase, GamePhase::Menu);
    assert!(frame.audio.iter().any(|c| matches!(
        c,
        AudioCommand::PlayMusic {
            track: MusicTrack::Menu,
            ..
        }
    )));

    play(&mut session);
    assert!(session.hud().visible);

    tap(&mut session, Action::Pause);
    assert_eq!(session.state().phase, GamePhase::Paused);
    tap(&mut session, Action::Resume);
    assert_eq!(session.state().phase, GamePhase::Playing);

    tap(&mut session, Action::Pause);
    tap(&mut session, Action::QuitToMenu);
    assert_eq!(session.state().phase, GamePhase::Menu);
    assert!(!session.hud().visible);
    assert_eq!(session.state().registry.live_count(), 0);
}

#[test]
fn resume_ignored_while_playing() {
    let mut session = loaded_session(SharedStore::default());
    play(&mut session);
    tap(&mut session, Action::Resume);
    tap(&mut session, Action::QuitToMenu);
    assert_eq!(session.state().phase, GamePhase::Playing);
}

#[test]
fn planet_level_switches_backdrop_once() {
    let tuning = Tuning::default();
    let mut state = GameState::new(5, &tuning);
    for craft in Craft::ALL {
        space_dodger::sim::mark_craft_loaded(&mut state, craft, true);
    }
    state.reset_run(&tuning);
    state.set_phase(GamePhase::Playing);
    state.progress.level = 10;
    state.progress.distance = 9_999;

    let input = space_dodger::sim::TickInput {
        move_left: true,
        ..Default::default()
    };
    let mut backdrop_changes = 0;
    for _ in 0..400 {
        state.registry.obstacles.clear();
        space_dodger::sim::tick(&mut state, &input, &tuning);
        backdrop_changes += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::BackdropChanged(Backdrop::Planetscape)))
            .count();
    }
    assert_eq!(backdrop_changes, 1);
    assert_eq!(state.backdrop, Backdrop::Planetscape);
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.progress.planet_level);
}
