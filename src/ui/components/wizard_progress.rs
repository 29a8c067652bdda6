use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::wizard::{WizardState, WizardStep};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    InProgress,
    Upcoming,
}

impl StepStatus {
    pub fn of(step: WizardStep, current: WizardStep) -> Self {
        match step.number().cmp(&current.number()) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::InProgress,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StepStatus::Done => "Done",
            StepStatus::InProgress => "In progress",
            StepStatus::Upcoming => "Upcoming",
        }
    }
}

/// Step list beside the wizard: each step with its status and, once done,
/// the value chosen for it.
pub struct WizardProgress<'a> {
    state: &'a WizardState,
    theme: &'a Theme,
}

impl<'a> WizardProgress<'a> {
    pub fn new(state: &'a WizardState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn chosen_value(&self, step: WizardStep) -> Option<String> {
        match step {
            WizardStep::Stage => Some(self.state.selected_stage.to_string()),
            WizardStep::Category if !self.state.selected_category.is_empty() => {
                Some(self.state.selected_category.clone())
            }
            WizardStep::Category => None,
            WizardStep::WordCount => Some(format!("{} words", self.state.number_of_words)),
            WizardStep::TimeLimit => Some(format!("{}s per word", self.state.max_time_seconds)),
            WizardStep::Start => None,
        }
    }
}

impl Widget for WizardProgress<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for step in WizardStep::ALL {
            let status = StepStatus::of(step, self.state.current_step);
            let (marker, color) = match status {
                StepStatus::Done => ("\u{2713}", colors.success()),
                StepStatus::InProgress => ("\u{25b6}", colors.accent()),
                StepStatus::Upcoming => ("\u{00b7}", colors.muted()),
            };
            let name_style = if status == StepStatus::InProgress {
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} "), Style::default().fg(color)),
                Span::styled(format!("{}. {}", step.number(), step.name()), name_style),
            ]));

            let detail = match (status, self.chosen_value(step)) {
                (StepStatus::Done, Some(value)) => format!("     {} \u{00b7} {value}", status.label()),
                _ => format!("     {}", status.label()),
            };
            lines.push(Line::from(Span::styled(detail, Style::default().fg(colors.muted()))));

            if lines.len() as u16 >= inner.height {
                break;
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_relative_to_current_step() {
        let current = WizardStep::WordCount;
        assert_eq!(StepStatus::of(WizardStep::Stage, current), StepStatus::Done);
        assert_eq!(StepStatus::of(WizardStep::WordCount, current), StepStatus::InProgress);
        assert_eq!(StepStatus::of(WizardStep::Start, current), StepStatus::Upcoming);
    }
}
