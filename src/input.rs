use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusInput,
    BlurInput,
    Type(char),
    Backspace,
    Submit,
    Escape,
    Toggle,
    HighlightNext,
    HighlightPrev,
    Click { column: u16, row: u16 },
    ToggleUnit,
    Refresh,
}

/// Translates a terminal event. Keys mean different things depending on
/// whether the search input has focus.
pub fn map_event_to_action(input_focused: bool, ev: &Event) -> Option<Action> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat => {
            map_key(input_focused, k)
        }
        Event::Mouse(m) => match m.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
                column: m.column,
                row: m.row,
            }),
            _ => None,
        },
        _ => None,
    }
}

fn map_key(input_focused: bool, k: &KeyEvent) -> Option<Action> {
    // Global
    if k.modifiers.contains(KeyModifiers::CONTROL) {
        return match k.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::Toggle),
            _ => None,
        };
    }

    if input_focused {
        return match k.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Escape),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Tab => Some(Action::BlurInput),
            KeyCode::Down => Some(Action::HighlightNext),
            KeyCode::Up => Some(Action::HighlightPrev),
            KeyCode::Char(ch) if !ch.is_control() => Some(Action::Type(ch)),
            _ => None,
        };
    }

    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('/') | KeyCode::Tab => Some(Action::FocusInput),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::ToggleUnit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Refresh),
        KeyCode::Esc => Some(Action::Escape),
        _ => None,
    }
}
