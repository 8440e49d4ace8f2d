use ratatui::{
    layout::Rect,
    buffer::Buffer,
    style::{Style, Stylize},
    symbols::{self, border},
    text::ToSpan,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::util::colors;

pub struct VolumeWidget {
    volume: u8,
}

impl VolumeWidget {
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(100),
        }
    }
}

impl Widget for VolumeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = format!("vol {}%", self.volume);

        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM | Borders::RIGHT)
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.horizontal_down,
                bottom_left: symbols::line::ROUNDED.horizontal_up,
                ..symbols::border::ROUNDED
            });

        Gauge::default()
            .block(block)
            .gauge_style(Style::new().fg(colors::SECONDARY).bg(colors::BACKGROUND))
            .ratio(self.volume as f64 / 100.0)
            .label(label.to_span().fg(colors::TEXT))
            .render(area, buf);
    }
}
