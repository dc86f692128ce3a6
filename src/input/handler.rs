use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::sim::ControlInput;

/// Pedal or steering command from one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveKey {
    Gas,
    Brake,
    SteerLeft,
    SteerRight,
}

impl DriveKey {
    /// Merge this key into the control input for the next tick
    pub fn apply(self, control: &mut ControlInput) {
        match self {
            DriveKey::Gas => control.gas = 1.0,
            DriveKey::Brake => control.brake = 1.0,
            DriveKey::SteerLeft => control.steering = 1.0,
            DriveKey::SteerRight => control.steering = -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Drive(DriveKey),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Drive(DriveKey::Gas),
            KeyCode::Down => KeyAction::Drive(DriveKey::Brake),
            KeyCode::Left => KeyAction::Drive(DriveKey::SteerLeft),
            KeyCode::Right => KeyAction::Drive(DriveKey::SteerRight),

            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Drive(DriveKey::Gas),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Drive(DriveKey::Brake),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Drive(DriveKey::SteerLeft),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Drive(DriveKey::SteerRight),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
