//! Audio boundary
//!
//! The game never touches an audio device. [`AudioMixer`] turns simulation
//! events into [`AudioCommand`]s that the host plays however it likes.

use crate::settings::Settings;
use crate::sim::{Backdrop, GameEvent, GamePhase, WeaponKind};

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Standard shot
    Laser,
    /// Starfire beam ignition
    LaserStarfire,
    /// BlueNova volley
    LaserBlueNova,
    /// Player lost a heart
    Hit,
    /// Obstacle destroyed
    Pop,
    /// Boss on its way; the impact sample played quieter
    BossWarning,
}

impl SoundCue {
    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::Laser => "laser.mp3",
            SoundCue::LaserStarfire => "laserstarfire.mp3",
            SoundCue::LaserBlueNova => "laserbluenova.wav",
            SoundCue::Hit | SoundCue::BossWarning => "hit.mp3",
            SoundCue::Pop => "pop.mp3",
        }
    }

    fn base_volume(&self) -> f32 {
        match self {
            // Volley is loud
            SoundCue::LaserBlueNova => 0.5,
            SoundCue::BossWarning => 0.6,
            _ => 1.0,
        }
    }
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    InGame,
    /// Replaces the in-game track once the planet backdrop is up
    PlanetAmbience,
}

impl MusicTrack {
    pub fn asset(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "mainmenu.ogg",
            MusicTrack::InGame => "bgmingame.wav",
            MusicTrack::PlanetAmbience => "ingame.mp3",
        }
    }

    fn base_volume(&self) -> f32 {
        match self {
            MusicTrack::Menu => 1.0,
            MusicTrack::InGame => 0.95,
            MusicTrack::PlanetAmbience => 0.6,
        }
    }
}

/// Instruction for the host's audio backend
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    PlaySfx { asset: &'static str, volume: f32 },
    /// Stop whatever is playing and start `track` from the beginning
    PlayMusic { track: MusicTrack, asset: &'static str, volume: f32 },
    PauseMusic(MusicTrack),
    ResumeMusic(MusicTrack),
    StopMusic,
}

/// Event-to-sound mapping with volume settings applied
#[derive(Debug, Clone)]
pub struct AudioMixer {
    current: Option<MusicTrack>,
    sfx_gain: f32,
    music_gain: f32,
}

impl AudioMixer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            current: None,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
        }
    }

    /// Pick up changed volumes or mute
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_gain = settings.sfx_gain();
        self.music_gain = settings.music_gain();
    }

    /// Track that is playing or paused
    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current
    }

    fn sfx(&self, cue: SoundCue) -> Option<AudioCommand> {
        let volume = cue.base_volume() * self.sfx_gain;
        if volume <= 0.0 {
            return None;
        }
        Some(AudioCommand::PlaySfx {
            asset: cue.asset(),
            volume,
        })
    }

    fn music(&mut self, track: MusicTrack) -> AudioCommand {
        self.current = Some(track);
        AudioCommand::PlayMusic {
            track,
            asset: track.asset(),
            volume: track.base_volume() * self.music_gain,
        }
    }

    /// Commands for one event, in the order they should run
    pub fn handle(&mut self, event: &GameEvent) -> Vec<AudioCommand> {
        let mut out = Vec::new();

        match event {
            GameEvent::Fired(weapon) => {
                let cue = match weapon {
                    WeaponKind::Standard => SoundCue::Laser,
                    WeaponKind::Beam => SoundCue::LaserStarfire,
                    WeaponKind::MultiShot => SoundCue::LaserBlueNova,
                };
                out.extend(self.sfx(cue));
            }
            GameEvent::PlayerHit { .. } => out.extend(self.sfx(SoundCue::Hit)),
            GameEvent::ObstacleDestroyed { .. } => out.extend(self.sfx(SoundCue::Pop)),
            GameEvent::BossIncoming { .. } => out.extend(self.sfx(SoundCue::BossWarning)),

            GameEvent::PhaseChanged { from, to } => match (from, to) {
                (_, GamePhase::Menu) => out.push(self.music(MusicTrack::Menu)),
                (GamePhase::Transitioning, GamePhase::Playing) => {
                    out.push(self.music(MusicTrack::InGame))
                }
                (_, GamePhase::Paused) => out.extend(self.current.map(AudioCommand::PauseMusic)),
                (GamePhase::Paused, GamePhase::Playing) => {
                    out.extend(self.current.map(AudioCommand::ResumeMusic))
                }
                _ => {}
            },
            GameEvent::BackdropChanged(Backdrop::Planetscape) => {
                out.push(self.music(MusicTrack::PlanetAmbience))
            }
            GameEvent::GameOver(_) => {
                self.current = None;
                out.push(AudioCommand::StopMusic);
            }
            _ => {}
        }

        out
    }
}
