//! Frame driver
//!
//! `GameRunner` is what a host calls once per animation frame. It samples
//! input, ticks the simulation, routes events to audio, and produces the
//! snapshots the renderer and HUD read.

use glam::Vec2;

use crate::audio::AudioManager;
use crate::platform::{Command, InputState};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::snapshot::{HudSnapshot, RenderSnapshot};

/// Enemies closer than this make the autopilot back off
const DEMO_KEEP_AWAY: f32 = 120.0;

pub struct GameRunner {
    pub state: GameState,
    pub input: InputState,
    pub settings: Settings,
    audio: AudioManager,
    /// Autopilot plays instead of the held input
    pub demo: bool,
    /// Events from the most recent frame
    last_events: Vec<GameEvent>,
}

impl GameRunner {
    /// Seed from settings, falling back to `fallback_seed`
    pub fn new(settings: Settings, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        let audio = AudioManager::new(settings.effective_sfx_volume());
        Self {
            state: GameState::new(seed),
            input: InputState::new(),
            settings,
            audio,
            demo: false,
            last_events: Vec::new(),
        }
    }

    /// Run one frame and return the HUD for it
    pub fn frame(&mut self) -> HudSnapshot {
        let mut input = self.input.take_tick_input();
        if self.demo {
            input = TickInput {
                toggle_pause: input.toggle_pause,
                restart: input.restart,
                ..demo_input(&self.state)
            };
        }

        tick(&mut self.state, &input);

        self.last_events = self.state.drain_events();
        self.audio.play_events(&self.last_events);
        HudSnapshot::from_state(&self.state)
    }

    /// Events raised during the most recent `frame`
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::from_state(&self.state, self.settings.particles)
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }

    /// UI "restart" button; applied at the start of the next frame
    pub fn restart(&mut self) {
        self.input.push_command(Command::Restart);
    }

    /// UI "resume" button and the pause key
    pub fn toggle_pause(&mut self) {
        self.input.push_command(Command::TogglePause);
    }

    /// Pause now if playing (focus loss); returns whether it paused
    pub fn auto_pause(&mut self) -> bool {
        self.input.release_all();
        if self.settings.pause_on_blur && self.state.is_playing() {
            self.state.toggle_pause();
            log::info!("Auto-paused (focus lost)");
            return true;
        }
        false
    }

    pub fn resume_audio(&self) {
        self.audio.resume();
    }
}

/// Simple autopilot: face the nearest enemy, shoot, and back away when crowded
pub fn demo_input(state: &GameState) -> TickInput {
    let player = &state.player;
    let center = player.center();

    let nearest = state.enemies.iter().min_by(|a, b| {
        a.center()
            .distance_squared(center)
            .partial_cmp(&b.center().distance_squared(center))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(target) = nearest else {
        // Nothing to shoot: top up and drift back to the middle
        let home = Vec2::new(state.width, state.height) / 2.0;
        return TickInput {
            movement: axis_signs(home - center),
            reload: !player.current_weapon().is_full(),
            ..Default::default()
        };
    };

    let to_target = target.center() - center;
    let movement = if to_target.length() < DEMO_KEEP_AWAY {
        axis_signs(-to_target)
    } else {
        Vec2::ZERO
    };

    TickInput {
        movement,
        // Aim is measured from the player's corner, so offset the target to match
        pointer: player.pos + to_target,
        fire: true,
        reload: player.current_weapon().is_empty(),
        ..Default::default()
    }
}

/// Per-axis sign with a small dead zone
fn axis_signs(v: Vec2) -> Vec2 {
    let sign = |c: f32| {
        if c > 1.0 {
            1.0
        } else if c < -1.0 {
            -1.0
        } else {
            0.0
        }
    };
    Vec2::new(sign(v.x), sign(v.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, EnemyKind, GamePhase};

    fn runner() -> GameRunner {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        GameRunner::new(settings, 2024)
    }

    #[test]
    fn test_settings_seed_wins() {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        assert_eq!(GameRunner::new(settings, 1).state.seed, 7);
        assert_eq!(runner().state.seed, 2024);
    }

    #[test]
    fn test_frame_applies_held_input() {
        let mut runner = runner();
        let start = runner.state.player.pos;
        runner.input.key_down("KeyD");
        runner.frame();
        runner.frame();
        assert_eq!(runner.state.player.pos, start + Vec2::new(6.0, 0.0));
        assert_eq!(runner.state.frame, 2);
    }

    #[test]
    fn test_fire_reports_shoot_event() {
        let mut runner = runner();
        runner.input.pointer_move(0.0, 0.0);
        runner.input.pointer_down(0);
        let hud = runner.frame();
        assert_eq!(hud.ammo, 11);
        assert!(runner.last_events().contains(&GameEvent::Shoot));
    }

    #[test]
    fn test_pause_and_restart_buttons() {
        let mut runner = runner();
        runner.toggle_pause();
        let hud = runner.frame();
        assert_eq!(hud.phase, GamePhase::Paused);
        assert!(hud.overlay.is_some());

        runner.state.score = 90;
        runner.state.game_over();
        runner.restart();
        let hud = runner.frame();
        assert_eq!(hud.phase, GamePhase::Playing);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.enemy_count, 3);
    }

    #[test]
    fn test_auto_pause_respects_setting() {
        let mut runner = runner();
        assert!(runner.auto_pause());
        assert_eq!(runner.state.phase, GamePhase::Paused);
        // Already paused
        assert!(!runner.auto_pause());

        let mut runner = GameRunner::new(
            Settings {
                pause_on_blur: false,
                ..Default::default()
            },
            1,
        );
        assert!(!runner.auto_pause());
        assert_eq!(runner.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_particles_setting_filters_snapshot() {
        let mut runner = runner();
        runner.state.enemies.clear();
        runner.state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(100.0, 100.0)));
        runner.state.projectiles.push(crate::sim::Projectile::new(
            Vec2::new(110.0, 110.0),
            Vec2::ZERO,
            25,
            crate::sim::Owner::Player,
        ));
        runner.frame();
        assert_eq!(runner.render_snapshot().particles.len(), 5);

        runner.settings.particles = false;
        assert!(runner.render_snapshot().particles.is_empty());
    }

    #[test]
    fn test_demo_aims_at_nearest_enemy() {
        let mut state = GameState::new(1);
        state.enemies.clear();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(700.0, 300.0)));
        state.enemies.push(Enemy::new(EnemyKind::Basic, state.player.pos + Vec2::new(60.0, 4.0)));

        let input = demo_input(&state);
        assert!(input.fire);
        // Centers level and too close: back straight off to the left
        assert_eq!(input.movement, Vec2::new(-1.0, 0.0));
        assert!(input.pointer.x > state.player.pos.x);
    }

    #[test]
    fn test_demo_survives_a_while() {
        let mut runner = runner();
        runner.demo = true;
        for _ in 0..600 {
            runner.frame();
        }
        assert!(runner.state.frame > 0);
        assert!(runner.state.player.health >= 0);
    }
}
