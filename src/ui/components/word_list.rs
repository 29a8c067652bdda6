use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::word_list::{WordGroup, WordListQuery};
use crate::ui::theme::Theme;

pub struct WordListView<'a> {
    groups: &'a [WordGroup<'a>],
    query: &'a WordListQuery,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> WordListView<'a> {
    pub fn new(
        groups: &'a [WordGroup<'a>],
        query: &'a WordListQuery,
        scroll: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            groups,
            query,
            scroll,
            theme,
        }
    }

    /// Total rendered lines, used to bound scrolling.
    pub fn line_count(groups: &[WordGroup<'_>]) -> usize {
        groups.iter().map(|g| g.entries.len() + 2).sum()
    }
}

impl Widget for WordListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let filter_text = |value: Option<String>| value.unwrap_or_else(|| "All".to_string());
        let toolbar = Line::from(vec![
            Span::styled(" Group: ", Style::default().fg(colors.muted())),
            Span::styled(self.query.group_by.label(), Style::default().fg(colors.accent())),
            Span::styled("  Sort: ", Style::default().fg(colors.muted())),
            Span::styled(self.query.sort.label(), Style::default().fg(colors.accent())),
            Span::styled("  Category: ", Style::default().fg(colors.muted())),
            Span::styled(
                filter_text(self.query.category_filter.clone()),
                Style::default().fg(colors.accent()),
            ),
            Span::styled("  Starts with: ", Style::default().fg(colors.muted())),
            Span::styled(
                filter_text(self.query.starts_with_filter.map(String::from)),
                Style::default().fg(colors.accent()),
            ),
        ]);
        Paragraph::new(toolbar).render(layout[0], buf);

        let total: usize = self.groups.iter().map(|g| g.entries.len()).sum();
        let block = Block::bordered()
            .title(format!(" Words ({total}) "))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(layout[1]);
        block.render(layout[1], buf);

        if self.groups.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No words match the current filters. Press [x] to clear them.",
                Style::default().fg(colors.warning()),
            )))
            .render(inner, buf);
            return;
        }

        let word_w = (inner.width as usize / 4).clamp(12, 24);
        let mut lines: Vec<Line> = Vec::new();
        for group in self.groups {
            lines.push(Line::from(Span::styled(
                format!(" {} ({})", group.header, group.entries.len()),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            for entry in &group.entries {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("   {:<word_w$} ", entry.word),
                        Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:<5} ", entry.stage.as_str()),
                        Style::default().fg(colors.muted()),
                    ),
                    Span::styled(entry.definition.as_str(), Style::default().fg(colors.fg())),
                ]));
            }
            lines.push(Line::from(""));
        }

        let scroll = self.scroll.min(u16::MAX as usize) as u16;
        Paragraph::new(lines).scroll((scroll, 0)).render(inner, buf);
    }
}
