use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::report::ExerciseReport;
use crate::ui::theme::Theme;

pub struct ReportView<'a> {
    report: &'a ExerciseReport,
    selected: usize,
    can_pronounce: bool,
    theme: &'a Theme,
}

impl<'a> ReportView<'a> {
    pub fn new(
        report: &'a ExerciseReport,
        selected: usize,
        can_pronounce: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            report,
            selected,
            can_pronounce,
            theme,
        }
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('\u{2026}');
        cut
    }
}

impl Widget for ReportView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Exercise Report ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let score_color = if self.report.percent_correct >= 80 {
            colors.success()
        } else if self.report.percent_correct >= 50 {
            colors.warning()
        } else {
            colors.error()
        };
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!(
                    "{}/{} correct ({}%)",
                    self.report.correct_count, self.report.total_count, self.report.percent_correct
                ),
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.report.summary(), Style::default().fg(colors.fg()))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[0], buf);

        let word_w = (inner.width as usize).saturating_sub(20) / 2;
        let header = format!(
            "  {:>3}  {}  {}  Result",
            "#",
            fit("Word", word_w),
            fit("Your attempt", word_w)
        );
        Paragraph::new(Line::from(Span::styled(
            header,
            Style::default()
                .fg(colors.muted())
                .add_modifier(Modifier::UNDERLINED),
        )))
        .render(layout[1], buf);

        let visible = layout[2].height as usize;
        let start = self.selected.saturating_sub(visible.saturating_sub(1));
        let lines: Vec<Line> = self
            .report
            .rows
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(i, row)| {
                let is_selected = i == self.selected;
                let indicator = if is_selected { ">" } else { " " };
                let row_style = if is_selected {
                    Style::default().fg(colors.fg()).bg(colors.accent_dim())
                } else {
                    Style::default().fg(colors.fg())
                };
                let verdict_color = if row.correct {
                    colors.success()
                } else {
                    colors.error()
                };
                Line::from(vec![
                    Span::styled(format!("{indicator} {:>3}  ", i + 1), row_style),
                    Span::styled(format!("{}  ", fit(&row.word, word_w)), row_style),
                    Span::styled(format!("{}  ", fit(&row.attempt_text, word_w)), row_style),
                    Span::styled(row.verdict(), row_style.fg(verdict_color)),
                ])
            })
            .collect();
        Paragraph::new(lines).render(layout[2], buf);

        let mut hints = vec![
            Span::styled(" [r] Attempt another exercise  ", Style::default().fg(colors.accent())),
            Span::styled("[\u{2191}/\u{2193}] Select  ", Style::default().fg(colors.accent())),
        ];
        if self.can_pronounce {
            hints.push(Span::styled("[p] Pronounce  ", Style::default().fg(colors.accent())));
        }
        hints.push(Span::styled("[Esc] Home", Style::default().fg(colors.accent())));
        Paragraph::new(Line::from(hints)).render(layout[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::catalog::{Stage, VocabularyEntry};
    use crate::session::quiz::Attempt;

    fn attempt(word: &str, text: &str) -> Attempt {
        Attempt {
            item: VocabularyEntry {
                word: word.to_string(),
                definition: String::new(),
                synonyms: Vec::new(),
                usage_sentence: String::new(),
                category: "Science".to_string(),
                sub_category: String::new(),
                stage: Stage::General,
            },
            attempt_text: text.to_string(),
        }
    }

    fn rendered_rows(report: &ExerciseReport) -> Vec<String> {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ReportView::new(report, 0, false, &theme).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn attempts_render_literally() {
        let report = ExerciseReport::from_attempts(&[
            attempt("enzyme", ""),
            attempt("friction", "(blank)"),
        ]);
        let rows = rendered_rows(&report);
        let enzyme = rows.iter().find(|r| r.contains("enzyme")).unwrap();
        assert!(!enzyme.contains("(blank)"));
        let friction = rows.iter().find(|r| r.contains("friction")).unwrap();
        assert!(friction.contains("(blank)"));
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc\u{2026}");
        assert_eq!(fit("na\u{ef}ve", 5), "na\u{ef}ve");
    }
}
