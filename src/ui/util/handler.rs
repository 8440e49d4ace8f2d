use ratatui::crossterm::event::KeyEvent;

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

enum Incoming {
    Terminal(TerminalEvent),
    Background(Event),
}

impl EventHandler {
    /// Waits for the next terminal or background event, then drains whatever
    /// else the background tasks have queued.
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<()> {
        let incoming = tokio::select! {
            Some(evt) = tui.next() => Some(Incoming::Terminal(evt)),
            Ok(evt) = app.event_rx.recv_async() => Some(Incoming::Background(evt)),
            else => None,
        };

        match incoming {
            Some(Incoming::Terminal(evt)) => Self::handle_event(app, evt, tui)?,
            Some(Incoming::Background(evt)) => app.on_event(evt),
            None => app.should_quit = true,
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            app.on_event(evt);
        }

        Ok(())
    }

    fn handle_event(app: &mut App, evt: TerminalEvent, tui: &mut Tui) -> color_eyre::Result<()> {
        match evt {
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::FocusGained => {
                app.on_terminal_event(&evt);
                tui.clear()?;
            }
            _ => app.on_terminal_event(&evt),
        }

        Ok(())
    }

    fn handle_key_event(app: &mut App, key: KeyEvent) {
        if let Some(msg) = InputHandler::handle_key(key, app.state.ui.editing_search) {
            app.update(msg);
        }
    }
}
