use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::StageSelector;
use crate::session::wizard::{MAX_TIME_SECONDS, MIN_TIME_SECONDS, Wizard, WizardStep};
use crate::ui::theme::Theme;

/// Body of the active wizard step.
pub struct WizardSteps<'a> {
    wizard: &'a Wizard,
    theme: &'a Theme,
}

impl<'a> WizardSteps<'a> {
    pub fn new(wizard: &'a Wizard, theme: &'a Theme) -> Self {
        Self { wizard, theme }
    }

    fn choice_line(&self, label: &str, selected: bool) -> Line<'static> {
        let colors = &self.theme.colors;
        if selected {
            Line::from(Span::styled(
                format!("  > {label}"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(format!("    {label}"), Style::default().fg(colors.fg())))
        }
    }

    fn value_line(&self, value: String) -> Line<'static> {
        let colors = &self.theme.colors;
        Line::from(vec![
            Span::styled("  \u{25c0} ", Style::default().fg(colors.muted())),
            Span::styled(
                value,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" \u{25b6}", Style::default().fg(colors.muted())),
        ])
    }

    fn stage_lines(&self) -> Vec<Line<'static>> {
        let selected = self.wizard.state().selected_stage;
        let mut lines = vec![Line::from("")];
        for stage in StageSelector::ALL {
            let label = if stage == StageSelector::Mixed {
                format!("{stage} (all stages)")
            } else {
                stage.to_string()
            };
            lines.push(self.choice_line(&label, stage == selected));
        }
        lines
    }

    fn category_lines(&self, height: usize) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let categories = self.wizard.categories();
        let mut lines = vec![Line::from("")];
        if categories.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No categories for this stage. Go back and pick another stage.",
                Style::default().fg(colors.warning()),
            )));
            return lines;
        }

        let selected = self.wizard.state().selected_category.as_str();
        let selected_idx = categories.iter().position(|c| c == selected).unwrap_or(0);
        let visible = height.saturating_sub(1).max(1);
        let start = selected_idx.saturating_sub(visible.saturating_sub(1));
        for category in categories.iter().skip(start).take(visible) {
            lines.push(self.choice_line(category, category == selected));
        }
        lines
    }

    fn word_count_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let state = self.wizard.state();
        let pool = self.wizard.pool_size();
        let mut lines = vec![Line::from("")];
        if pool == 0 {
            lines.push(Line::from(Span::styled(
                "  No words match this stage and category.",
                Style::default().fg(colors.warning()),
            )));
            return lines;
        }
        lines.push(self.value_line(format!("{}", state.number_of_words)));
        lines.push(Line::from(Span::styled(
            format!("  1 to {} ({pool} available)", self.wizard.max_words()),
            Style::default().fg(colors.muted()),
        )));
        lines
    }

    fn time_limit_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        vec![
            Line::from(""),
            self.value_line(format!("{}s", self.wizard.state().max_time_seconds)),
            Line::from(Span::styled(
                format!("  {MIN_TIME_SECONDS}s to {MAX_TIME_SECONDS}s per word"),
                Style::default().fg(colors.muted()),
            )),
        ]
    }

    fn start_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let state = self.wizard.state();
        let summary = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<10}"), Style::default().fg(colors.muted())),
                Span::styled(value, Style::default().fg(colors.fg())),
            ])
        };
        let mut lines = vec![
            Line::from(""),
            summary("Stage", state.selected_stage.to_string()),
            summary("Category", state.selected_category.clone()),
            summary(
                "Words",
                format!("{}", state.number_of_words.min(self.wizard.pool_size())),
            ),
            summary("Time", format!("{}s per word", state.max_time_seconds)),
            Line::from(""),
        ];
        if self.wizard.can_start() {
            lines.push(Line::from(Span::styled(
                "  Press [Enter] to start the exercise",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "  Start is disabled: choose a category with at least one word.",
                Style::default().fg(colors.warning()),
            )));
        }
        lines
    }
}

impl Widget for WizardSteps<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let step = self.wizard.step();

        let block = Block::bordered()
            .title(format!(
                " Step {} of {}: {} ",
                step.number(),
                WizardStep::COUNT,
                step.name()
            ))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match step {
            WizardStep::Stage => self.stage_lines(),
            WizardStep::Category => self.category_lines(inner.height as usize),
            WizardStep::WordCount => self.word_count_lines(),
            WizardStep::TimeLimit => self.time_limit_lines(),
            WizardStep::Start => self.start_lines(),
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
