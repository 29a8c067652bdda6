use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::Route;
use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: char,
    pub label: &'static str,
    pub description: &'static str,
    pub route: Route,
}

/// Home screen entries. Selection survives theme changes, so the theme is
/// passed in at render time.
pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: '1',
                    label: "Word List",
                    description: "Browse the vocabulary by category or first letter",
                    route: Route::WordList,
                },
                MenuItem {
                    key: '2',
                    label: "Practice",
                    description: "Flashcards: read a word, reveal its meaning",
                    route: Route::Practice,
                },
                MenuItem {
                    key: '3',
                    label: "Exercise",
                    description: "Timed spelling quiz with a scored report",
                    route: Route::Exercise,
                },
                MenuItem {
                    key: '?',
                    label: "Help",
                    description: "Keys and how the exercise works",
                    route: Route::Help,
                },
            ],
            selected: 0,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_route(&self) -> Route {
        self.items
            .get(self.selected)
            .map(|item| item.route)
            .unwrap_or(Route::Home)
    }

    pub fn route_for_key(&self, key: char) -> Option<Route> {
        self.items.iter().find(|item| item.key == key).map(|item| item.route)
    }
}

pub struct MenuView<'a> {
    menu: &'a Menu,
    theme: &'a Theme,
}

impl<'a> MenuView<'a> {
    pub fn new(menu: &'a Menu, theme: &'a Theme) -> Self {
        Self { menu, theme }
    }
}

impl Widget for MenuView<'_> {
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
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "maestra",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Vocabulary practice for KS3 and KS4",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.menu
                    .items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.menu.items.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("     {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(desc_text, Style::default().fg(colors.muted()))),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        let mut menu = Menu::new();
        menu.prev();
        assert_eq!(menu.selected_route(), Route::Help);
        menu.next();
        assert_eq!(menu.selected_route(), Route::WordList);
    }

    #[test]
    fn shortcut_keys_map_to_routes() {
        let menu = Menu::new();
        assert_eq!(menu.route_for_key('3'), Some(Route::Exercise));
        assert_eq!(menu.route_for_key('?'), Some(Route::Help));
        assert_eq!(menu.route_for_key('x'), None);
    }
}
