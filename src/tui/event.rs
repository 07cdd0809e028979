use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global
    ForceQuit,   // Ctrl+C / Ctrl+Q
    OpenRides,   // Ctrl+R
    OpenBooking, // Ctrl+H
    SubmitBooking, // Ctrl+B
    ToggleTrip,  // Ctrl+T
    Resize,

    // Focus / navigation
    Tab,
    BackTab,
    Escape,
    Submit,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,

    // Text editing
    InputChar(char),
    Backspace,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event(timeout: std::time::Duration) -> Option<TuiEvent> {
    if event::poll(timeout).unwrap() {
        match event::read().unwrap() {
            Event::Key(key_event) => {
                match (key_event.modifiers, key_event.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                    (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(TuiEvent::ForceQuit),
                    (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::OpenRides),
                    (KeyModifiers::CONTROL, KeyCode::Char('h')) => Some(TuiEvent::OpenBooking),
                    (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(TuiEvent::SubmitBooking),
                    (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(TuiEvent::ToggleTrip),
                    (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(TuiEvent::BackTab),
                    // Regular key handling
                    (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                    (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                    (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                    (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                    (_, KeyCode::Tab) => Some(TuiEvent::Tab),
                    (_, KeyCode::BackTab) => Some(TuiEvent::BackTab),
                    (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                    (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                    (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                    (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                    _ => None,
                }
            }
            Event::Resize(_, _) => Some(TuiEvent::Resize),
            _ => None,
        }
    } else {
        None
    }
}
