//! Read-only views of the game for the renderer and the HUD
//!
//! Snapshots are plain serializable data. The browser host hands them to
//! JavaScript as JSON; nothing flows back through them.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{EnemyKind, GamePhase, GameState, Owner};

/// Health bar coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    High,
    Medium,
    Low,
}

impl HealthBand {
    /// Low at or below 30%, Medium at or below 60%
    pub fn from_percent(percent: f32) -> Self {
        if percent <= 30.0 {
            HealthBand::Low
        } else if percent <= 60.0 {
            HealthBand::Medium
        } else {
            HealthBand::High
        }
    }
}

/// Modal overlay shown while the simulation is suspended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub title: String,
    pub message: String,
}

impl Overlay {
    pub fn for_state(state: &GameState) -> Option<Self> {
        match state.phase {
            GamePhase::Playing => None,
            GamePhase::Paused => Some(Self {
                title: "Game Paused".to_string(),
                message: "Press ESC to resume".to_string(),
            }),
            GamePhase::GameOver => Some(Self {
                title: "Game Over".to_string(),
                message: format!("Final Score: {}", state.score),
            }),
        }
    }
}

/// Everything the HUD text binder displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub health: i32,
    pub max_health: i32,
    pub health_band: HealthBand,
    pub ammo: u32,
    pub max_ammo: u32,
    pub weapon_name: &'static str,
    pub reloading: bool,
    pub score: u32,
    pub kills: u32,
    pub wave: u32,
    pub enemy_count: usize,
    pub phase: GamePhase,
    pub overlay: Option<Overlay>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let player = &state.player;
        let weapon = player.current_weapon();
        let health = player.health.max(0);
        let percent = health as f32 / player.max_health as f32 * 100.0;
        Self {
            health,
            max_health: player.max_health,
            health_band: HealthBand::from_percent(percent),
            ammo: weapon.ammo,
            max_ammo: weapon.max_ammo(),
            weapon_name: weapon.name(),
            reloading: player.is_reloading(),
            score: state.score,
            kills: state.kills,
            wave: state.wave(),
            enemy_count: state.enemies.len(),
            phase: state.phase,
            overlay: Overlay::for_state(state),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    /// False on the off-beats of the invulnerability blink
    pub visible: bool,
    pub reloading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
    /// Present only once the enemy has taken damage
    pub health_fraction: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub size: Vec2,
    pub owner: Owner,
    /// Where the faint trail square is drawn
    pub trail: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    pub frame: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    pub hud: HudSnapshot,
}

impl RenderSnapshot {
    pub fn from_state(state: &GameState, include_particles: bool) -> Self {
        let player = &state.player;
        let particles = if include_particles {
            state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    alpha: p.alpha(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            width: state.width,
            height: state.height,
            frame: state.frame,
            player: PlayerView {
                pos: player.pos,
                size: player.size,
                visible: !player.is_flashing(),
                reloading: player.is_reloading(),
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    kind: e.kind,
                    pos: e.pos,
                    size: e.size,
                    color: e.color(),
                    health_fraction: (e.health < e.max_health).then(|| e.health_fraction()),
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    size: p.size,
                    owner: p.owner,
                    trail: p.pos - p.vel / 2.0,
                })
                .collect(),
            particles,
            hud: HudSnapshot::from_state(state),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
