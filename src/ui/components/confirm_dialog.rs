use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use pinyin_drill::session::view::Confirmation;

use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

pub struct ConfirmDialog<'a> {
    pub confirmation: Confirmation,
    pub theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(confirmation: Confirmation, theme: &'a Theme) -> Self {
        Self {
            confirmation,
            theme,
        }
    }
}

/// Renders centred over whatever `area` already holds.
impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let dialog = centered_rect(48, 7, area);
        Clear.render(dialog, buf);

        let block = Block::bordered()
            .title(" Confirm ")
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let lines = vec![
            Line::from(Span::styled(
                self.confirmation.prompt(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[y] Yes  [n] No",
                Style::default().fg(colors.muted()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
