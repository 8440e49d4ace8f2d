use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    symbols::{self, border},
    text::ToSpan,
    widgets::{Block, Borders, Widget},
};

use crate::{
    audio::progress::TimeDisplay, library::song::Song, ui::components::gauge::PlaybackGauge,
    util::colors,
};

pub struct ProgressWidget<'a> {
    song: Option<&'a Song>,
    time: Option<&'a TimeDisplay>,
    buffered_ratio: f64,
    is_playing: bool,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(
        song: Option<&'a Song>,
        time: Option<&'a TimeDisplay>,
        buffered_ratio: f64,
        is_playing: bool,
    ) -> Self {
        Self {
            song,
            time,
            buffered_ratio,
            is_playing,
        }
    }

    fn title(&self) -> String {
        match self.song {
            Some(song) => format!(
                "{}  {} · {}",
                if self.is_playing { "▶" } else { "⏸" },
                song.name,
                song.display_artist()
            ),
            None => "No song selected".to_string(),
        }
    }
}

/// `elapsed / duration  -remaining`.
fn time_label(time: Option<&TimeDisplay>) -> String {
    match time {
        Some(time) => format!("{} / {}  -{}", time.elapsed, time.duration, time.remaining),
        None => "0:00 / 0:00".to_string(),
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ratio = self.time.map_or(0.0, TimeDisplay::ratio);
        let label = time_label(self.time);

        let buffered = if self.song.is_some() {
            self.buffered_ratio
        } else {
            0.0
        };

        PlaybackGauge::default()
            .block(
                Block::default()
                    .title_top(self.title())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_set(border::Set {
                        top_right: symbols::line::ROUNDED.horizontal_down,
                        bottom_right: symbols::line::ROUNDED.horizontal_up,
                        ..symbols::border::ROUNDED
                    }),
            )
            .ratios(ratio, buffered)
            .label(label.to_span().fg(Color::White))
            .played_style(Style::default().fg(colors::PRIMARY).bg(colors::BACKGROUND))
            .buffered_style(Style::default().fg(colors::NEUTRAL).bg(colors::BACKGROUND))
            .remaining_style(Style::default().bg(colors::BACKGROUND))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn label_shows_elapsed_total_and_remaining() {
        let time = TimeDisplay::new(Duration::from_secs(59), Duration::from_secs(125));
        assert_eq!(time_label(time.as_ref()), "0:59 / 2:05  -1:06");
        assert_eq!(time_label(None), "0:00 / 0:00");
    }
}
