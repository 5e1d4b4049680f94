use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::{Message, SelectionDirection};

pub fn to_message(event: &KeyEvent) -> Option<Message> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Message::Quit),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Char('j') | KeyCode::Down => {
            Some(Message::MoveSelection(SelectionDirection::Down))
        }
        KeyCode::Char('k') | KeyCode::Up => Some(Message::MoveSelection(SelectionDirection::Up)),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Some(Message::Open),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Some(Message::Back),
        KeyCode::Char('g') => Some(Message::GotoCrumb(0)),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char(char) => char
            .to_digit(10)
            .filter(|digit| *digit > 0)
            .map(|digit| Message::GotoCrumb(digit as usize - 1)),
        _ => None,
    }
}
