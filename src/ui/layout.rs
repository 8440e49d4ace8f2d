use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    library::catalog::LoadStatus,
    ui::{
        app::App,
        components::{
            controls::VolumeWidget, progress::ProgressWidget, sidebar::Sidebar,
            song_list::SongList, spinner::Spinner,
        },
    },
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        f.buffer_mut()
            .set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(1)])
            .split(chunks[0]);

        self.render_sidebar(f, main_chunks[0]);
        self.render_content(f, main_chunks[1]);
        self.render_player(f, chunks[1]);
    }

    fn render_sidebar(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title("songdeck")
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);

        f.render_widget(block, area);
        f.render_widget(Sidebar::new(self.app.state.view.active_view), inner);
    }

    fn render_content(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        self.render_search(f, chunks[0]);

        let view = &self.app.state.view;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(view.active_view.title());
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        let ctx = &self.app.ctx;
        let ui = &self.app.state.ui;

        if ui.is_loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading songs...");
            f.render_widget(spinner, inner);
            return;
        }

        if let LoadStatus::Failed(message) = ctx.catalog.status() {
            let text = vec![
                Line::from(Span::styled(
                    "Error loading songs",
                    Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(colors::NEUTRAL),
                )),
            ];
            f.render_widget(Paragraph::new(text), inner);
            return;
        }

        let favorites = ctx.favorites.ids();
        let groups = ctx.visible_groups(view);
        if groups.is_empty() {
            f.render_widget(
                Paragraph::new("No songs found").style(Style::default().fg(colors::TEXT)),
                inner,
            );
            return;
        }

        let visible: usize = groups.iter().map(|g| g.songs.len()).sum();
        let list = SongList::new(&groups, &ctx.catalog, &favorites)
            .active(
                ctx.audio_system.current_index(),
                ctx.audio_system.is_playing(),
            )
            .selected(ui.selected.min(visible.saturating_sub(1)));
        f.render_widget(list, inner);
    }

    fn render_search(&self, f: &mut Frame, area: Rect) {
        let ui = &self.app.state.ui;
        let term = &self.app.state.view.search_term;

        let border_style = if ui.editing_search {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(border_style)
            .title(" / search ");

        let line = match (&ui.notice, term.is_empty(), ui.editing_search) {
            (Some(notice), _, false) => {
                Line::from(Span::styled(notice.as_str(), Style::default().fg(colors::ACCENT)))
            }
            (_, true, false) => Line::from(Span::styled(
                "Search songs or artists",
                Style::default().fg(colors::NEUTRAL),
            )),
            (_, _, editing) => {
                let mut spans = vec![Span::raw(term.as_str())];
                if editing {
                    spans.push(Span::styled("▏", Style::default().fg(colors::PRIMARY)));
                }
                Line::from(spans)
            }
        };

        f.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_player(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(14)])
            .split(area);

        let ctx = &self.app.ctx;
        let audio = &ctx.audio_system;

        let player = ProgressWidget::new(
            audio.current_song(&ctx.catalog),
            self.app.state.ui.time_display.as_ref(),
            audio.track_progress().get_buffered_ratio(),
            audio.is_playing(),
        );
        f.render_widget(player, chunks[0]);
        f.render_widget(VolumeWidget::new(audio.volume()), chunks[1]);
    }
}
