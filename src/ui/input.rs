use crate::{library::filter::View, ui::message::AppMessage};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent, editing_search: bool) -> Option<AppMessage> {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            return Some(AppMessage::Quit);
        }

        if editing_search {
            return Self::handle_search_key(key);
        }

        match key.code {
            KeyCode::Char('q') => Some(AppMessage::Quit),
            KeyCode::Char(' ') => Some(AppMessage::TogglePlayPause),
            KeyCode::Char('n') => Some(AppMessage::NextTrack),
            KeyCode::Char('p') => Some(AppMessage::PreviousTrack),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(AppMessage::VolumeUp),
            KeyCode::Char('-') => Some(AppMessage::VolumeDown),
            KeyCode::Char('H') | KeyCode::Left => Some(AppMessage::SeekBackward),
            KeyCode::Char('L') | KeyCode::Right => Some(AppMessage::SeekForward),
            KeyCode::Char(c @ '0'..='9') => {
                let tenth = c.to_digit(10).unwrap_or(0) as f64;
                Some(AppMessage::SeekTo(tenth / 10.0))
            }
            KeyCode::Char('j') | KeyCode::Down => Some(AppMessage::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(AppMessage::SelectPrevious),
            KeyCode::Char('g') | KeyCode::Home => Some(AppMessage::SelectFirst),
            KeyCode::Char('G') | KeyCode::End => Some(AppMessage::SelectLast),
            KeyCode::Enter => Some(AppMessage::PlaySelected),
            KeyCode::Char('f') => Some(AppMessage::ToggleLikeSelected),
            KeyCode::Char('/') => Some(AppMessage::StartSearch),
            KeyCode::Esc => Some(AppMessage::ClearSearch),
            KeyCode::Tab => Some(AppMessage::NextView),
            KeyCode::BackTab => Some(AppMessage::PreviousView),
            KeyCode::F(n @ 1..=3) => View::from_index(n as usize - 1).map(AppMessage::SetView),
            _ => None,
        }
    }

    fn handle_search_key(key: KeyEvent) -> Option<AppMessage> {
        match key.code {
            KeyCode::Enter => Some(AppMessage::FinishSearch),
            KeyCode::Esc => Some(AppMessage::ClearSearch),
            KeyCode::Backspace => Some(AppMessage::SearchBackspace),
            KeyCode::Char(c) => Some(AppMessage::SearchInput(c)),
            KeyCode::Down => Some(AppMessage::SelectNext),
            KeyCode::Up => Some(AppMessage::SelectPrevious),
            _ => None,
        }
    }
}
