use knotwork_engine::input::{
    InputEvent, Key, KeyState, MouseButtonState, PointerButtonEvent,
};

use crate::geometry::Vec2d;

/// What a single input event asks the screensaver to do.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    Quit,
    Restart,
    TogglePause,
    ToggleHelp,
    NewFigure,
    IncreaseResolution,
    DecreaseResolution,
    /// Add an anchor to the latest figure.
    AddPoint(Vec2d),
    /// Remove a matching anchor from every figure.
    RemovePoint(Vec2d),
}

impl Command {
    /// Maps an input event to a command. Releases, key repeats and unbound
    /// keys map to `None`.
    pub fn from_event(event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::CloseRequested => Some(Command::Quit),

            InputEvent::Key { key, state: KeyState::Pressed, repeat: false } => match key {
                Key::Escape => Some(Command::Quit),
                Key::R => Some(Command::Restart),
                Key::P => Some(Command::TogglePause),
                Key::F1 => Some(Command::ToggleHelp),
                Key::N => Some(Command::NewFigure),
                Key::NumpadAdd => Some(Command::IncreaseResolution),
                Key::NumpadSubtract => Some(Command::DecreaseResolution),
                _ => None,
            },

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state: MouseButtonState::Pressed,
                x,
                y,
            }) => {
                let at = Vec2d::from((*x, *y));
                if button.is_primary() {
                    Some(Command::AddPoint(at))
                } else {
                    Some(Command::RemovePoint(at))
                }
            }

            _ => None,
        }
    }
}
