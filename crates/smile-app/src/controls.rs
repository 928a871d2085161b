use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// What a key or button press asks the host to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trigger {
    Start,
    Stop,
    Close,
}

pub fn trigger_for_key(code: KeyCode) -> Option<Trigger> {
    match code {
        KeyCode::KeyS | KeyCode::Enter | KeyCode::NumpadEnter => Some(Trigger::Start),
        KeyCode::KeyX | KeyCode::Space => Some(Trigger::Stop),
        KeyCode::Escape => Some(Trigger::Close),
        _ => None,
    }
}

pub fn trigger_for_button(button: MouseButton) -> Option<Trigger> {
    match button {
        MouseButton::Left => Some(Trigger::Start),
        MouseButton::Right => Some(Trigger::Stop),
        _ => None,
    }
}

/// Presses only; releases and key repeats are ignored.
pub fn trigger_for_event(event: &WindowEvent) -> Option<Trigger> {
    match event {
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed && !event.repeat =>
        {
            match event.physical_key {
                PhysicalKey::Code(code) => trigger_for_key(code),
                PhysicalKey::Unidentified(_) => None,
            }
        }
        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button,
            ..
        } => trigger_for_button(*button),
        _ => None,
    }
}
