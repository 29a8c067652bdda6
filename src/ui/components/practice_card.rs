use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::VocabularyEntry;
use crate::ui::theme::Theme;

/// A flashcard: the word up front, the rest once revealed.
pub struct PracticeCard<'a> {
    entry: &'a VocabularyEntry,
    revealed: bool,
    theme: &'a Theme,
}

impl<'a> PracticeCard<'a> {
    pub fn new(entry: &'a VocabularyEntry, revealed: bool, theme: &'a Theme) -> Self {
        Self {
            entry,
            revealed,
            theme,
        }
    }
}

impl Widget for PracticeCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let entry = self.entry;

        let block = Block::bordered()
            .title(format!(" {} \u{00b7} {} ", entry.category, entry.stage))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                entry.word.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if !self.revealed {
            lines.push(Line::from(Span::styled(
                "Press [Space] to reveal the definition",
                Style::default().fg(colors.muted()),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                entry.definition.as_str(),
                Style::default().fg(colors.fg()),
            )));
            if !entry.synonyms.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Synonyms: ", Style::default().fg(colors.muted())),
                    Span::styled(entry.synonyms.join(", "), Style::default().fg(colors.fg())),
                ]));
            }
            if !entry.usage_sentence.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("\u{201c}{}\u{201d}", entry.usage_sentence),
                    Style::default()
                        .fg(colors.fg())
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            if !entry.sub_category.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    entry.sub_category.as_str(),
                    Style::default().fg(colors.muted()),
                )));
            }
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
