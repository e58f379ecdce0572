//! Fixed-step simulation tick
//!
//! One call advances the game by exactly one frame, in a fixed order:
//! input, entity updates, collisions, spawning.

use glam::Vec2;

use super::collision::{Bounded, is_colliding};
use super::particle::{ParticleBurst, emit_burst};
use super::projectile::Owner;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::{aim_angle, direction_to};

/// Input sampled for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held direction, each axis in {-1, 0, 1}
    pub movement: Vec2,
    /// Last known pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Pointer button held
    pub fire: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Select weapon by loadout index
    pub switch_weapon: Option<usize>,
    pub reload: bool,
    /// Start a fresh run
    pub restart: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
        return;
    }
    if input.toggle_pause {
        state.toggle_pause();
    }
    apply_weapon_commands(state, input);
    // Paused and GameOver suspend the whole simulation
    if !state.is_playing() {
        return;
    }

    apply_input(state, input);
    advance_entities(state);

    resolve_player_projectiles(state);
    resolve_enemy_projectiles(state);
    resolve_enemy_contact(state);

    run_spawner(state);

    state.frame += 1;
}

/// Loadout commands work in every phase, like the keys that send them
fn apply_weapon_commands(state: &mut GameState, input: &TickInput) {
    if let Some(index) = input.switch_weapon {
        state.player.switch_weapon(index);
    }
    if input.reload {
        state.player.reload();
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    player.move_by(input.movement.x, input.movement.y);

    if input.fire {
        let angle = aim_angle(player.pos, input.pointer);
        if let Some(shot) = player.shoot(angle) {
            state.projectiles.push(shot);
            state.events.push(GameEvent::Shoot);
        }
    }
}

fn advance_entities(state: &mut GameState) {
    let (width, height) = (state.width, state.height);

    state.player.update(width, height);

    for projectile in &mut state.projectiles {
        projectile.update();
    }
    state.projectiles.retain(|p| !p.is_off_screen(width, height));

    // Shots fired here start moving next frame
    for enemy in &mut state.enemies {
        enemy.update(&state.player);
        if let Some(shot) = enemy.shoot(&state.player) {
            state.projectiles.push(shot);
        }
    }

    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());
}

/// Player shots vs enemies. Each shot hits at most one enemy, the most
/// recently spawned one when several overlap.
fn resolve_player_projectiles(state: &mut GameState) {
    let mut spent = vec![false; state.projectiles.len()];

    for (i, projectile) in state.projectiles.iter().enumerate() {
        if projectile.owner != Owner::Player {
            continue;
        }
        let Some(j) = state.enemies.iter().rposition(|e| is_colliding(projectile, e)) else {
            continue;
        };
        spent[i] = true;

        let enemy = &mut state.enemies[j];
        enemy.take_damage(projectile.damage);
        let center = enemy.center();
        emit_burst(&mut state.particles, center, ParticleBurst::Hit, &mut state.rng);

        if enemy.is_dead() {
            let points = enemy.points;
            state.score += points;
            state.kills += 1;
            state.enemies.remove(j);
            emit_burst(&mut state.particles, center, ParticleBurst::Death, &mut state.rng);
            state.events.push(GameEvent::EnemyDeath { points });
        } else {
            state.events.push(GameEvent::Hit);
        }
    }

    let mut spent = spent.into_iter();
    state.projectiles.retain(|_| !spent.next().unwrap_or(false));
}

/// Enemy shots vs the player
fn resolve_enemy_projectiles(state: &mut GameState) {
    let player_box = state.player.bounds();
    let mut damage = Vec::new();
    state.projectiles.retain(|p| {
        let hit = p.owner == Owner::Enemy && p.bounds().intersects(&player_box);
        if hit {
            damage.push(p.damage);
        }
        !hit
    });

    for amount in damage {
        state.player.take_damage(amount);
        state.events.push(GameEvent::PlayerHit);
        if !state.player.is_alive() {
            state.game_over();
        }
    }
}

/// Body contact: flat damage and a shove away from the first overlapping enemy
fn resolve_enemy_contact(state: &mut GameState) {
    let Some(enemy_pos) = state
        .enemies
        .iter()
        .find(|e| is_colliding(&state.player, *e))
        .map(|e| e.pos)
    else {
        return;
    };

    state.player.take_damage(CONTACT_DAMAGE);
    state.events.push(GameEvent::PlayerHit);

    let away = direction_to(enemy_pos, state.player.pos);
    state.player.pos += away * CONTACT_KNOCKBACK;
    state.player.clamp_to(state.width, state.height);

    if !state.player.is_alive() {
        state.game_over();
    }
}

fn run_spawner(state: &mut GameState) {
    let result = state.spawner.tick(state.enemies.len());
    if result.spawn {
        state.spawn_random_enemy();
    }
    if result.wave_advanced {
        let wave = state.spawner.wave;
        log::info!(
            "Wave {} begins (spawn every {} frames)",
            wave,
            state.spawner.spawn_interval
        );
        state.events.push(GameEvent::WaveAdvanced { wave });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::projectile::Projectile;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    /// Fresh game with the opening enemies removed
    fn empty_state() -> GameState {
        let mut state = GameState::new(12345);
        state.enemies.clear();
        state
    }

    fn still_projectile(x: f32, y: f32, damage: i32, owner: Owner) -> Projectile {
        Projectile::new(Vec2::new(x, y), Vec2::ZERO, damage, owner)
    }

    #[test]
    fn test_fire_spawns_moving_projectile() {
        let mut state = empty_state();
        let center = state.player.center();
        let input = TickInput {
            pointer: state.player.pos + Vec2::new(100.0, 0.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert_eq!(shot.owner, Owner::Player);
        // Fired from the center, then advanced once in the same frame
        assert!((shot.pos - (center + Vec2::new(8.0, 0.0))).length() < 1e-4);
        assert_eq!(state.player.current_weapon().ammo, 11);
        assert_eq!(state.drain_events(), vec![GameEvent::Shoot]);

        // Held fire respects the cooldown
        tick(&mut state, &input);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_switch_and_reload_commands() {
        let mut state = empty_state();
        state.player.weapons[1].ammo = 2;
        tick(
            &mut state,
            &TickInput {
                switch_weapon: Some(1),
                reload: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.current_weapon().name(), "Hay Rifle");
        assert_eq!(state.player.current_weapon().ammo, 30);
        // Countdown was set to 90, then ticked once
        assert_eq!(state.player.reloading, 89);

        tick(
            &mut state,
            &TickInput {
                switch_weapon: Some(7),
                ..Default::default()
            },
        );
        assert_eq!(state.player.current_weapon, 1);
    }

    #[test]
    fn test_basic_enemy_dies_after_two_hits() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 100.0)));

        state.projectiles.push(still_projectile(110.0, 110.0, 25, Owner::Player));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].health, 25);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.particles.len(), 5);
        assert_eq!(state.drain_events(), vec![GameEvent::Hit]);

        state.projectiles.push(still_projectile(110.0, 110.0, 25, Owner::Player));
        tick(&mut state, &TickInput::default());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.kills, 1);
        assert_eq!(state.particles.len(), 5 + 5 + 10);
        assert_eq!(state.drain_events(), vec![GameEvent::EnemyDeath { points: 10 }]);
    }

    #[test]
    fn test_two_hits_in_one_frame() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 100.0)));
        state.projectiles.push(still_projectile(108.0, 108.0, 25, Owner::Player));
        state.projectiles.push(still_projectile(112.0, 112.0, 25, Owner::Player));
        tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 10);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_hits_only_one_enemy() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(100.0, 100.0)));
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(104.0, 104.0)));
        state.projectiles.push(still_projectile(115.0, 115.0, 60, Owner::Player));
        tick(&mut state, &TickInput::default());

        let damaged = state.enemies.iter().filter(|e| e.health < e.max_health).count();
        assert_eq!(damaged, 1);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_overlapping_enemies_newest_takes_the_hit() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 100.0)));
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(104.0, 104.0)));
        state.projectiles.push(still_projectile(115.0, 115.0, 25, Owner::Player));
        tick(&mut state, &TickInput::default());

        assert_eq!(state.enemies[0].health, 50);
        assert_eq!(state.enemies[1].health, 75);
    }

    #[test]
    fn test_enemy_shots_ignore_enemies() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 100.0)));
        state.projectiles.push(still_projectile(110.0, 110.0, 15, Owner::Enemy));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].health, 50);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_enemy_shot_damages_player() {
        let mut state = empty_state();
        let center = state.player.center();
        state.projectiles.push(still_projectile(center.x, center.y, 15, Owner::Enemy));
        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.health, 85);
        assert!(state.player.invulnerable > 0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerHit]);
    }

    #[test]
    fn test_contact_damage_and_knockback() {
        let mut state = empty_state();
        let start = state.player.pos;
        let mut enemy = Enemy::new(EnemyKind::Basic, start + Vec2::new(10.0, 0.0));
        enemy.shoot_cooldown = 100;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, 90);
        assert!((state.player.pos - (start - Vec2::new(20.0, 0.0))).length() < 1e-4);
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerHit]);
    }

    #[test]
    fn test_knockback_stays_inside_margins() {
        let mut state = empty_state();
        state.player.pos = Vec2::new(PLAYER_EDGE_MARGIN, 300.0);
        let mut enemy = Enemy::new(EnemyKind::Basic, Vec2::new(20.0, 300.0));
        enemy.shoot_cooldown = 100;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, 90);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_EDGE_MARGIN, 300.0));
    }

    #[test]
    fn test_weapon_commands_apply_while_paused() {
        let mut state = empty_state();
        state.toggle_pause();
        state.player.weapons[2].ammo = 1;
        tick(
            &mut state,
            &TickInput {
                switch_weapon: Some(2),
                reload: true,
                ..Default::default()
            },
        );

        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.frame, 0);
        assert_eq!(state.player.current_weapon().name(), "Cheese Blaster");
        assert_eq!(state.player.current_weapon().ammo, 8);
        // Countdown does not run until play resumes
        assert_eq!(state.player.reloading, 120);
    }

    #[test]
    fn test_lethal_hit_ends_game_and_freezes() {
        let mut state = empty_state();
        state.player.health = 10;
        let center = state.player.center();
        state.projectiles.push(still_projectile(center.x, center.y, 15, Owner::Enemy));
        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.health, 0);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        let frame = state.frame;
        let pos = state.player.pos;
        for _ in 0..10 {
            tick(
                &mut state,
                &TickInput {
                    movement: Vec2::new(1.0, 0.0),
                    toggle_pause: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(state.frame, frame);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(5);
        state.score = 120;
        state.spawner.wave = 3;
        state.game_over();

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave(), 1);
        assert_eq!(state.enemies.len(), 3);
        assert!(state.projectiles.is_empty());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_pause_suspends_simulation() {
        let mut state = GameState::new(8);
        let pause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let enemy_positions: Vec<_> = state.enemies.iter().map(|e| e.pos).collect();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.frame, 0);
        let after: Vec<_> = state.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(enemy_positions, after);

        // Unpausing resumes in the same frame
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_projectile_culled_off_screen() {
        let mut state = empty_state();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(845.0, 300.0), Vec2::new(8.0, 0.0), 25, Owner::Player));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(400.0, -45.0), Vec2::new(0.0, -4.0), 15, Owner::Enemy));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &TickInput::default());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_particles_expire() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(100.0, 100.0)));
        state.projectiles.push(still_projectile(110.0, 110.0, 25, Owner::Player));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.particles.len(), 5);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_spawner_runs_inside_tick() {
        let mut state = empty_state();
        for _ in 0..INITIAL_SPAWN_INTERVAL - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                movement: Vec2::new(1.0, 0.0),
                pointer: Vec2::new(0.0, 0.0),
                fire: true,
                ..Default::default()
            },
            TickInput {
                movement: Vec2::new(0.0, -1.0),
                pointer: Vec2::new(800.0, 600.0),
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..900 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.particles.len(), state2.particles.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.player.health, state2.player.health);
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside_margins(
            seed in any::<u64>(),
            moves in proptest::collection::vec((-1i8..=1, -1i8..=1), 1..300),
        ) {
            let mut state = GameState::new(seed);
            // Crowd the player so contact knockback happens
            for offset in [-20.0, 20.0] {
                let pos = state.player.pos + Vec2::new(offset, offset / 2.0);
                state.enemies.push(Enemy::new(EnemyKind::Tank, pos));
            }
            let max = Vec2::new(state.width, state.height) - state.player.size - PLAYER_EDGE_MARGIN;
            for (dx, dy) in moves {
                let input = TickInput {
                    movement: Vec2::new(dx as f32, dy as f32),
                    ..Default::default()
                };
                tick(&mut state, &input);
                let pos = state.player.pos;
                prop_assert!(pos.x >= PLAYER_EDGE_MARGIN && pos.x <= max.x, "x = {}", pos.x);
                prop_assert!(pos.y >= PLAYER_EDGE_MARGIN && pos.y <= max.y, "y = {}", pos.y);
            }
        }
    }
}
