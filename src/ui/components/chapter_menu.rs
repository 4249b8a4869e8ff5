use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use pinyin_drill::session::view::ChapterSummary;

use crate::ui::theme::Theme;

const BAR_WIDTH: usize = 20;

pub struct ChapterMenu<'a> {
    pub chapters: &'a [ChapterSummary],
    pub selected: usize,
    pub advanced_mode: bool,
    pub theme: &'a Theme,
}

impl<'a> ChapterMenu<'a> {
    pub fn new(
        chapters: &'a [ChapterSummary],
        selected: usize,
        advanced_mode: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            chapters,
            selected,
            advanced_mode,
            theme,
        }
    }
}

/// Scroll offset that keeps `selected` inside a window of `visible` rows.
fn scroll_offset(selected: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible - 1)
        .min(total - visible)
}

fn bar(ratio: f64) -> String {
    let filled = ((ratio * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

impl Widget for ChapterMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let mode_label = if self.advanced_mode {
            "Tone numbers required"
        } else {
            "Tones optional"
        };
        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "pinyin-drill",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(mode_label, Style::default().fg(colors.muted()))),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let list_area = layout[2];
        let visible = list_area.height as usize;
        let offset = scroll_offset(self.selected, visible, self.chapters.len());

        let lines: Vec<Line> = self
            .chapters
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, chapter)| {
                let is_selected = i == self.selected;
                let indicator = if is_selected { ">" } else { " " };
                let label_style = Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    });
                let bar_color = if chapter.completed {
                    colors.correct()
                } else {
                    colors.bar_filled()
                };
                let done = if chapter.completed { " ✓" } else { "" };

                Line::from(vec![
                    Span::styled(format!(" {indicator} {:<9}", chapter.range), label_style),
                    Span::styled(bar(chapter.ratio()), Style::default().fg(bar_color)),
                    Span::styled(
                        format!(" {:>3}/{} mastered", chapter.mastered_count, chapter.total),
                        Style::default().fg(colors.muted()),
                    ),
                    Span::styled(done, Style::default().fg(colors.correct())),
                ])
            })
            .collect();

        Paragraph::new(lines).render(list_area, buf);
    }
}
