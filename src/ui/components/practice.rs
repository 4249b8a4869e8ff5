use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use pinyin_drill::session::view::{FeedbackKind, PracticeView, Screen};

use crate::ui::theme::Theme;

/// Glyph card, streak pips, feedback and the answer line.
pub struct PracticePanel<'a> {
    view: &'a PracticeView,
    screen: Screen,
    input: &'a str,
    theme: &'a Theme,
}

impl<'a> PracticePanel<'a> {
    pub fn new(view: &'a PracticeView, screen: Screen, input: &'a str, theme: &'a Theme) -> Self {
        Self {
            view,
            screen,
            input,
            theme,
        }
    }

    fn feedback_color(&self) -> Color {
        let colors = &self.theme.colors;
        match self.view.feedback.kind {
            FeedbackKind::Correct => colors.correct(),
            FeedbackKind::Incorrect => colors.incorrect(),
            FeedbackKind::Hint => colors.hint(),
            FeedbackKind::None => colors.muted(),
        }
    }
}

fn streak_pips(streak: u32, threshold: u32) -> String {
    let filled = streak.min(threshold) as usize;
    let empty = threshold as usize - filled;
    format!("{}{}", "●".repeat(filled), "○".repeat(empty))
}

impl Widget for PracticePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Characters {} ", self.view.chapter.range))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.screen == Screen::Complete {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Chapter complete!",
                    Style::default()
                        .fg(colors.correct())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "All {} characters mastered.",
                        self.view.chapter.total
                    ),
                    Style::default().fg(colors.fg()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        let glyph = self
            .view
            .item
            .as_ref()
            .map(|item| item.as_str())
            .unwrap_or("");
        let glyph_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                glyph,
                Style::default()
                    .fg(colors.glyph())
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        Paragraph::new(glyph_lines)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(
                streak_pips(self.view.streak, self.view.threshold),
                Style::default().fg(colors.accent()),
            ),
            Span::styled(
                format!("  {}/{}", self.view.streak, self.view.threshold),
                Style::default().fg(colors.muted()),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        Paragraph::new(Line::from(Span::styled(
            self.view.feedback.text.as_str(),
            Style::default()
                .fg(self.feedback_color())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[3], buf);

        let input_line = if self.input.is_empty() {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(colors.accent())),
                Span::styled(
                    self.view.placeholder,
                    Style::default()
                        .fg(colors.muted())
                        .add_modifier(Modifier::ITALIC),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(colors.accent())),
                Span::styled(self.input, Style::default().fg(colors.fg())),
                Span::styled("_", Style::default().fg(colors.muted())),
            ])
        };
        Paragraph::new(input_line)
            .alignment(Alignment::Center)
            .render(layout[4], buf);
    }
}
