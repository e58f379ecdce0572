//! Held-key map and pointer state

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pause,
    /// Loadout slot, 0-based
    Weapon(usize),
    Reload,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::Up),
            "KeyS" | "ArrowDown" => Some(Key::Down),
            "KeyA" | "ArrowLeft" => Some(Key::Left),
            "KeyD" | "ArrowRight" => Some(Key::Right),
            "Escape" => Some(Key::Pause),
            "Digit1" => Some(Key::Weapon(0)),
            "Digit2" => Some(Key::Weapon(1)),
            "Digit3" => Some(Key::Weapon(2)),
            "KeyR" => Some(Key::Reload),
            _ => None,
        }
    }

    /// One-shot command triggered when this key goes down
    fn command(self) -> Option<Command> {
        match self {
            Key::Pause => Some(Command::TogglePause),
            Key::Weapon(slot) => Some(Command::SwitchWeapon(slot)),
            Key::Reload => Some(Command::Reload),
            Key::Up | Key::Down | Key::Left | Key::Right => None,
        }
    }
}

/// Discrete actions queued until the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    SwitchWeapon(usize),
    Reload,
    Restart,
}

/// Last known input state, updated by host callbacks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pointer: Vec2,
    pointer_down: bool,
    pending: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses of a held key are ignored.
    /// Returns false for codes the game does not use.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        if self.held.insert(key) {
            if let Some(command) = key.command() {
                self.pending.push(command);
            }
        }
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.held.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Pointer position in playfield coordinates
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Only the primary button fires
    pub fn pointer_down(&mut self, button: i16) {
        if button == 0 {
            self.pointer_down = true;
        }
    }

    pub fn pointer_up(&mut self, button: i16) {
        if button == 0 {
            self.pointer_down = false;
        }
    }

    /// Queue a command from outside the keyboard (UI buttons)
    pub fn push_command(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Drop held keys and the pointer button, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pointer_down = false;
    }

    /// Held direction, each axis in {-1, 0, 1}
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_held(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_held(Key::Down) {
            dir.y += 1.0;
        }
        if self.is_held(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_held(Key::Right) {
            dir.x += 1.0;
        }
        dir
    }

    /// Build this frame's input and clear the queued one-shot commands
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut input = TickInput {
            movement: self.movement(),
            pointer: self.pointer,
            fire: self.pointer_down,
            ..Default::default()
        };
        for command in self.pending.drain(..) {
            match command {
                // Two presses in one frame cancel out
                Command::TogglePause => input.toggle_pause = !input.toggle_pause,
                Command::SwitchWeapon(slot) => input.switch_weapon = Some(slot),
                Command::Reload => input.reload = true,
                Command::Restart => input.restart = true,
            }
        }
        input
    }
}
