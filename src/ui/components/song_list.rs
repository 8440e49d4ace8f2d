use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    library::{catalog::Catalog, filter::ArtistGroup, song::Song},
    ui::util::get_active_track_icon,
    util::colors,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Row<'a> {
    Header(&'a str),
    Song { song: &'a Song, position: usize },
}

/// Flattens groups into header and song rows. `position` counts songs only.
pub fn build_rows<'a>(groups: &[ArtistGroup<'a>]) -> Vec<Row<'a>> {
    let mut rows = Vec::new();
    let mut position = 0;
    for group in groups {
        rows.push(Row::Header(group.artist));
        for song in group.songs.iter().copied() {
            rows.push(Row::Song { song, position });
            position += 1;
        }
    }
    rows
}

pub fn row_of_position(rows: &[Row<'_>], selected: usize) -> Option<usize> {
    rows.iter()
        .position(|row| matches!(row, Row::Song { position, .. } if *position == selected))
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

pub struct SongList<'a> {
    groups: &'a [ArtistGroup<'a>],
    catalog: &'a Catalog,
    favorites: &'a HashSet<String>,
    active_index: Option<usize>,
    is_playing: bool,
    selected: usize,
}

impl<'a> SongList<'a> {
    pub fn new(
        groups: &'a [ArtistGroup<'a>],
        catalog: &'a Catalog,
        favorites: &'a HashSet<String>,
    ) -> Self {
        Self {
            groups,
            catalog,
            favorites,
            active_index: None,
            is_playing: false,
            selected: 0,
        }
    }

    pub fn active(mut self, active_index: Option<usize>, is_playing: bool) -> Self {
        self.active_index = active_index;
        self.is_playing = is_playing;
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    fn song_item(&self, song: &Song, width: usize) -> ListItem<'static> {
        let is_active =
            self.active_index.is_some() && self.catalog.index_of(song) == self.active_index;
        let prefix = if is_active {
            format!(" {} ", get_active_track_icon(self.is_playing))
        } else {
            "   ".to_string()
        };
        let heart = if self.favorites.contains(&song.id) {
            Span::styled(" ♥", Style::default().fg(colors::ACCENT))
        } else {
            Span::styled(" ♡", Style::default().fg(colors::NEUTRAL))
        };

        let name = truncate(&song.name, width.saturating_sub(8));
        let mut item = ListItem::new(Line::from(vec![Span::raw(prefix), Span::raw(name), heart]));
        if is_active {
            item = item.style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            );
        }
        item
    }
}

impl Widget for SongList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = build_rows(self.groups);
        let width = area.width as usize;

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| match row {
                Row::Header(artist) => ListItem::new(truncate(artist, width)).style(
                    Style::default()
                        .fg(colors::TEXT)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                Row::Song { song, .. } => self.song_item(song, width),
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(colors::NEUTRAL))
            .highlight_symbol(">");

        let mut state = ListState::default().with_selected(row_of_position(&rows, self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_interleave_headers_and_count_songs() {
        let a = Song::new("1", "One", Some("A"));
        let b = Song::new("2", "Two", Some("B"));
        let c = Song::new("3", "Three", Some("A"));
        let groups = vec![
            ArtistGroup {
                artist: "A",
                songs: vec![&a, &c],
            },
            ArtistGroup {
                artist: "B",
                songs: vec![&b],
            },
        ];

        let rows = build_rows(&groups);
        assert_eq!(
            rows,
            vec![
                Row::Header("A"),
                Row::Song { song: &a, position: 0 },
                Row::Song { song: &c, position: 1 },
                Row::Header("B"),
                Row::Song { song: &b, position: 2 },
            ]
        );
        assert_eq!(row_of_position(&rows, 2), Some(4));
        assert_eq!(row_of_position(&rows, 3), None);
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
    }
}
