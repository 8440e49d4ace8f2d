use std::sync::Arc;

use flume::Receiver;
use ratatui::Frame;
use tracing::{info, warn};

use crate::{
    audio::system::AudioSystem,
    event::events::Event,
    http::{ApiService, SongSource},
    library::{
        catalog::Catalog,
        favorites::{FavoritesStore, JsonFileRepository},
        filter::{View, ViewState},
    },
    ui::{
        context::AppContext,
        layout::AppLayout,
        message::AppMessage,
        state::{AppState, UiState},
        tui::{self, TerminalEvent},
        util::handler::EventHandler,
    },
    util::{config::AppConfig, task::TaskManager},
};

pub struct App {
    pub ctx: AppContext,
    pub state: AppState,
    pub event_rx: Receiver<Event>,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new(&config.api_url)?);
        let audio_system = AudioSystem::new(event_tx.clone(), &api, config.audio.clone())?;
        let favorites = FavoritesStore::new(JsonFileRepository::new(config.storage_path()));

        info!(api = %api.base_url(), storage = %config.storage_path().display(), "client ready");

        Ok(Self {
            ctx: AppContext {
                api,
                catalog: Catalog::new(),
                favorites,
                audio_system,
                event_tx,
            },
            state: AppState::default(),
            event_rx,
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&self, frame: &mut Frame) {
        if self.has_focus {
            AppLayout::new(self).render(frame, frame.area());
        }
    }

    pub fn fetch_catalog(&mut self) {
        self.state.ui.is_loading = true;
        let api = self.ctx.api.clone();
        let tx = self.ctx.event_tx.clone();

        self.task_manager.spawn(
            "catalog_fetch",
            tokio::spawn(async move {
                let result = api.fetch_songs().await.map_err(|e| e.to_string());
                let _ = tx.send(Event::CatalogFetched(result));
            }),
        );
    }

    pub fn on_terminal_event(&mut self, evt: &TerminalEvent) {
        match evt {
            TerminalEvent::Init => self.fetch_catalog(),
            TerminalEvent::Tick => {
                self.state.ui.time_display = self.ctx.audio_system.time_display();
            }
            TerminalEvent::FocusGained => self.has_focus = true,
            TerminalEvent::FocusLost => self.has_focus = false,
            _ => {}
        }
    }

    pub fn update(&mut self, msg: AppMessage) {
        let ctx = &mut self.ctx;
        let ui = &mut self.state.ui;
        let view = &mut self.state.view;

        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::TogglePlayPause => {
                let _ = ctx.audio_system.play_pause(&ctx.catalog);
            }
            AppMessage::NextTrack => {
                let _ = ctx.audio_system.play_next(&ctx.catalog);
            }
            AppMessage::PreviousTrack => {
                let _ = ctx.audio_system.play_previous(&ctx.catalog);
            }
            AppMessage::VolumeUp => {
                let _ = ctx.audio_system.volume_up();
            }
            AppMessage::VolumeDown => {
                let _ = ctx.audio_system.volume_down();
            }
            AppMessage::SeekForward => {
                let _ = ctx.audio_system.seek_forwards();
            }
            AppMessage::SeekBackward => {
                let _ = ctx.audio_system.seek_backwards();
            }
            AppMessage::SeekTo(fraction) => {
                let _ = ctx.audio_system.seek_to(fraction);
            }
            AppMessage::SelectNext => {
                let last = ctx.visible_count(view).saturating_sub(1);
                ui.selected = (ui.selected + 1).min(last);
            }
            AppMessage::SelectPrevious => {
                ui.selected = ui.selected.saturating_sub(1);
            }
            AppMessage::SelectFirst => ui.selected = 0,
            AppMessage::SelectLast => {
                ui.selected = ctx.visible_count(view).saturating_sub(1);
            }
            AppMessage::PlaySelected => {
                let index = ctx
                    .visible_song(view, ui.selected)
                    .and_then(|song| ctx.catalog.index_of(song));
                if let Some(index) = index {
                    let _ = ctx.audio_system.play(&ctx.catalog, index);
                }
            }
            AppMessage::ToggleLikeSelected => {
                let Some(id) = ctx.visible_song(view, ui.selected).map(|s| s.id.clone()) else {
                    return;
                };
                match ctx.favorites.toggle(&id) {
                    Ok(liked) => {
                        info!(%id, liked, "favorite toggled");
                        ui.notice = None;
                    }
                    Err(e) => {
                        warn!(%id, error = %e, "failed to save favorites");
                        ui.notice = Some(format!("Could not save favorites: {e}"));
                    }
                }
                let last = ctx.visible_count(view).saturating_sub(1);
                ui.selected = ui.selected.min(last);
            }
            AppMessage::SetView(next) => Self::switch_view(view, ui, next),
            AppMessage::NextView => {
                let next = View::from_index((view.active_view.index() + 1) % View::ALL.len())
                    .unwrap_or_default();
                Self::switch_view(view, ui, next);
            }
            AppMessage::PreviousView => {
                let count = View::ALL.len();
                let next = View::from_index((view.active_view.index() + count - 1) % count)
                    .unwrap_or_default();
                Self::switch_view(view, ui, next);
            }
            AppMessage::StartSearch => ui.editing_search = true,
            AppMessage::SearchInput(c) => {
                view.search_term.push(c);
                ui.selected = 0;
            }
            AppMessage::SearchBackspace => {
                view.search_term.pop();
                ui.selected = 0;
            }
            AppMessage::FinishSearch => ui.editing_search = false,
            AppMessage::ClearSearch => {
                ui.editing_search = false;
                if !view.search_term.is_empty() {
                    view.search_term.clear();
                    ui.selected = 0;
                }
            }
        }
    }

    fn switch_view(view: &mut ViewState, ui: &mut UiState, next: View) {
        if view.active_view != next {
            view.active_view = next;
            ui.selected = 0;
        }
    }

    pub fn on_event(&mut self, evt: Event) {
        match evt {
            Event::CatalogFetched(result) => {
                self.state.ui.is_loading = false;
                if self.ctx.catalog.apply_fetch(result).is_ok() {
                    self.state.ui.selected = 0;
                }
                let _ = self.ctx.audio_system.on_catalog_replaced(&self.ctx.catalog);
            }
            Event::TrackEnded { generation } => {
                let _ = self
                    .ctx
                    .audio_system
                    .on_track_ended(&self.ctx.catalog, generation);
            }
        }
    }
}
