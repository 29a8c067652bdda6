use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::quiz::QuizSession;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// The active question: counter, countdown, definition and answer box.
pub struct QuestionView<'a> {
    session: &'a QuizSession,
    can_pronounce: bool,
    theme: &'a Theme,
}

impl<'a> QuestionView<'a> {
    pub fn new(session: &'a QuizSession, can_pronounce: bool, theme: &'a Theme) -> Self {
        Self {
            session,
            can_pronounce,
            theme,
        }
    }
}

impl Widget for QuestionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(item) = self.session.current_item() else {
            return;
        };

        let block = Block::bordered()
            .title(format!(
                " Question {} of {} ",
                self.session.current_index() + 1,
                self.session.total_questions()
            ))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let time_left = self.session.time_left_seconds();
        let max = self.session.max_time_seconds().max(1);
        let ratio = time_left as f64 / max as f64;
        ProgressBar::new("Time left", ratio, self.theme)
            .caption(format!("Time left: {time_left}s"))
            .render(layout[0], buf);

        let mut definition = vec![
            Line::from(Span::styled(
                "Definition",
                Style::default().fg(colors.muted()),
            )),
            Line::from(Span::styled(
                item.definition.clone(),
                Style::default().fg(colors.fg()),
            )),
        ];
        if !item.category.is_empty() {
            definition.push(Line::from(""));
            definition.push(Line::from(Span::styled(
                format!("{} \u{00b7} {}", item.category, item.stage),
                Style::default().fg(colors.muted()),
            )));
        }
        Paragraph::new(definition)
            .wrap(Wrap { trim: true })
            .render(layout[1], buf);

        let input = self.session.input().value();
        let input_block = Block::bordered()
            .title(" Spell the word ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.input_bg()));
        let input_inner = input_block.inner(layout[2]);
        input_block.render(layout[2], buf);
        Paragraph::new(Line::from(vec![
            Span::styled(
                input.to_string(),
                Style::default().fg(colors.input_fg()).bg(colors.input_bg()),
            ),
            Span::styled(
                " ",
                Style::default()
                    .bg(colors.accent())
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]))
        .render(input_inner, buf);

        let hint = if self.can_pronounce {
            " [Enter] Submit  [Ctrl+P/F2] Pronounce  [Esc] Cancel exercise"
        } else {
            " [Enter] Submit  [Esc] Cancel exercise"
        };
        Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(colors.muted()))))
            .render(layout[3], buf);
    }
}
