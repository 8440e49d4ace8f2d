use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Block, Widget},
};

/// Seek bar with a played segment over a downloaded segment. Ratios outside
/// [0, 1] are clamped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlaybackGauge<'a> {
    block: Option<Block<'a>>,
    played_ratio: f64,
    buffered_ratio: f64,
    label: Option<Span<'a>>,
    played_style: Style,
    buffered_style: Style,
    remaining_style: Style,
}

impl<'a> PlaybackGauge<'a> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn ratios(mut self, played: f64, buffered: f64) -> Self {
        self.played_ratio = clamp_ratio(played);
        self.buffered_ratio = clamp_ratio(buffered).max(self.played_ratio);
        self
    }

    pub fn label<T>(mut self, label: T) -> Self
    where
        T: Into<Span<'a>>,
    {
        self.label = Some(label.into());
        self
    }

    pub fn played_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.played_style = style.into();
        self
    }

    pub fn buffered_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.buffered_style = style.into();
        self
    }

    pub fn remaining_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.remaining_style = style.into();
        self
    }
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn partial_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

impl Widget for PlaybackGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(ref block) = self.block {
            block.render(area, buf);
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        if inner.is_empty() {
            return;
        }

        let width = inner.width as f64;
        let played_pos = width * self.played_ratio;
        let buffered_pos = width * self.buffered_ratio;

        for y in inner.top()..inner.bottom() {
            for x in inner.left()..inner.right() {
                let pos = (x - inner.left()) as f64;

                let (symbol, style) = if pos < played_pos {
                    let symbol = if pos + 1.0 > played_pos {
                        partial_block(played_pos - pos)
                    } else {
                        symbols::block::FULL
                    };
                    (symbol, self.played_style)
                } else if pos < buffered_pos {
                    (symbols::shade::LIGHT, self.buffered_style)
                } else {
                    (" ", self.remaining_style)
                };

                buf[(x, y)].set_symbol(symbol).set_style(style);
            }
        }

        if let Some(label) = self.label {
            let label_width = (label.width() as u16).min(inner.width);
            let label_col = inner.left() + (inner.width - label_width) / 2;
            let label_row = inner.top() + inner.height / 2;
            for x in label_col..label_col + label_width {
                buf[(x, label_row)].set_symbol(" ");
            }
            buf.set_span(label_col, label_row, &label, label_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_are_clamped_and_ordered() {
        let gauge = PlaybackGauge::default().ratios(1.4, 0.2);
        assert_eq!(gauge.played_ratio, 1.0);
        assert_eq!(gauge.buffered_ratio, 1.0);

        let gauge = PlaybackGauge::default().ratios(f64::NAN, -3.0);
        assert_eq!(gauge.played_ratio, 0.0);
        assert_eq!(gauge.buffered_ratio, 0.0);
    }

    #[test]
    fn renders_played_segment() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        PlaybackGauge::default().ratios(0.5, 0.5).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), symbols::block::FULL);
        assert_eq!(buf[(4, 0)].symbol(), symbols::block::FULL);
        assert_eq!(buf[(5, 0)].symbol(), " ");
    }
}
