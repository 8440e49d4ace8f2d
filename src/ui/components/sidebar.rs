use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Widget},
};

use crate::{library::filter::View, util::colors};

pub struct Sidebar {
    active: View,
}

impl Sidebar {
    pub fn new(active: View) -> Self {
        Self { active }
    }
}

impl Widget for Sidebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = View::ALL
            .iter()
            .enumerate()
            .map(|(i, view)| {
                let style = if *view == self.active {
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::TEXT)
                };
                ListItem::new(format!(" F{} {}", i + 1, view.title())).style(style)
            })
            .collect();

        List::new(items).render(area, buf);
    }
}
