use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use maestra::app::{App, Route};
use maestra::catalog::Catalog;
use maestra::catalog::word_list;
use maestra::config::Config;
use maestra::event::{AppEvent, EventHandler};
use maestra::session::exercise::ExerciseMode;
use maestra::session::wizard::WizardStep;
use maestra::ui::components::menu::MenuView;
use maestra::ui::components::practice_card::PracticeCard;
use maestra::ui::components::progress_bar::ProgressBar;
use maestra::ui::components::question::QuestionView;
use maestra::ui::components::report::ReportView;
use maestra::ui::components::wizard_progress::WizardProgress;
use maestra::ui::components::wizard_steps::WizardSteps;
use maestra::ui::components::word_list::WordListView;
use maestra::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use maestra::ui::theme::Theme;
use maestra::{logging, speech};

#[derive(Parser)]
#[command(name = "maestra", version, about = "Terminal vocabulary tutor with timed spelling exercises")]
struct Cli {
    #[arg(short, long, help = "Theme name for this run (dark, light, or a user theme)")]
    theme: Option<String>,

    #[arg(short, long, help = "Load vocabulary from a JSON file instead of the bundled list")]
    catalog: Option<PathBuf>,

    #[arg(short, long, help = "Screen to open first: /, /word-list, /practice, /exercise, /help")]
    open: Option<String>,

    #[arg(long, help = "Disable text-to-speech")]
    no_speech: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.validate(&Theme::available_themes());
    logging::init(&config.log_path());
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config unreadable, using defaults");
    }

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("loading vocabulary from {}", path.display()))?,
        None => Catalog::bundled().context("loading bundled vocabulary")?,
    };

    let speaker = speech::speaker_for(
        config.speech_enabled && !cli.no_speech,
        config.speech_command.as_deref(),
    );
    let mut app = App::new(catalog, config, speaker, Config::config_path());

    if let Some(theme_name) = cli.theme
        && !app.use_theme(&theme_name)
    {
        tracing::warn!(theme = theme_name.as_str(), "unknown theme, keeping configured one");
    }
    if let Some(path) = cli.open {
        app.go_to(Route::from_path(&path));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick(now) => app.tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.route {
        Route::Home => handle_home_key(app, key),
        Route::WordList => handle_word_list_key(app, key),
        Route::Practice => handle_practice_key(app, key),
        Route::Exercise => handle_exercise_key(app, key),
        Route::Help => handle_help_key(app, key),
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            let route = app.menu.selected_route();
            app.go_to(route);
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('a') => app.toggle_auto_speak(),
        KeyCode::Char(ch) => {
            if let Some(route) = app.menu.route_for_key(ch) {
                app.go_to(route);
            }
        }
        _ => {}
    }
}

fn word_list_max_scroll(app: &App) -> usize {
    let groups = word_list::grouped(&app.catalog, &app.word_list);
    WordListView::line_count(&groups).saturating_sub(1)
}

fn handle_word_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.go_home(),
        KeyCode::Char('g') => app.word_list_toggle_group(),
        KeyCode::Char('s') => app.word_list_cycle_sort(),
        KeyCode::Char('c') => app.word_list_cycle_category(),
        KeyCode::Char('f') => app.word_list_cycle_letter(),
        KeyCode::Char('x') => app.word_list_clear_filters(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Down | KeyCode::Char('j') => {
            let max = word_list_max_scroll(app);
            app.word_list_scroll_by(1, max);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let max = word_list_max_scroll(app);
            app.word_list_scroll_by(-1, max);
        }
        KeyCode::PageDown => {
            let max = word_list_max_scroll(app);
            app.word_list_scroll_by(10, max);
        }
        KeyCode::PageUp => {
            let max = word_list_max_scroll(app);
            app.word_list_scroll_by(-10, max);
        }
        KeyCode::Home => app.word_list_scroll = 0,
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.go_home(),
        KeyCode::Char(' ') => app.reveal_card(),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Enter => app.next_card(),
        KeyCode::Char('p') => app.pronounce_card(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => app.go_home(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

fn handle_exercise_key(app: &mut App, key: KeyEvent) {
    match app.exercise_mode() {
        Some(ExerciseMode::Wizard) => handle_wizard_key(app, key),
        Some(ExerciseMode::InProgress) => handle_question_key(app, key),
        Some(ExerciseMode::Report) => handle_report_key(app, key),
        None => app.go_home(),
    }
}

fn handle_wizard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_home(),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => app.wizard_adjust(-1),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            app.wizard_adjust(1)
        }
        KeyCode::PageUp => app.wizard_adjust(-5),
        KeyCode::PageDown => app.wizard_adjust(5),
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('s') => app.wizard_advance(Instant::now()),
        KeyCode::Backspace | KeyCode::Char('b') => app.wizard_back(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

fn handle_question_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.cancel_exercise(),
        KeyCode::Enter => app.submit_answer(Instant::now()),
        KeyCode::Backspace => app.backspace(),
        KeyCode::F(2) => app.pronounce_current(),
        KeyCode::Char('p') if ctrl => app.pronounce_current(),
        KeyCode::Char(ch) if !ctrl => app.type_char(ch),
        _ => {}
    }
}

fn handle_report_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.attempt_another(),
        KeyCode::Down | KeyCode::Char('j') => app.report_select(1),
        KeyCode::Up | KeyCode::Char('k') => app.report_select(-1),
        KeyCode::Char('p') => app.pronounce_report_row(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Esc | KeyCode::Char('q') => app.go_home(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.route {
        Route::Home => render_home(frame, app),
        Route::WordList => render_word_list(frame, app),
        Route::Practice => render_practice(frame, app),
        Route::Exercise => render_exercise(frame, app),
        Route::Help => render_help(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" maestra \u{00b7} {} ", app.route.title()),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &[&str]) {
    let colors = &app.theme.colors;
    let mut lines: Vec<Line> = Vec::new();
    if let Some(notice) = &app.notice {
        lines.push(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(colors.warning()),
        )));
    }
    lines.extend(
        pack_hint_lines(hints, area.width as usize)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted())))),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn body_area(layout: &AppLayout) -> Rect {
    match layout.sidebar {
        Some(sidebar) => layout.main.union(sidebar),
        None => layout.main,
    }
}

fn render_home(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::with_footer(frame.area(), 2);

    let info = format!(
        " {} words | theme: {} | auto-speak: {} | speech: {}",
        app.catalog.len(),
        app.theme.name,
        if app.config.auto_speak { "on" } else { "off" },
        if app.can_pronounce() { "available" } else { "unavailable" },
    );
    render_header(frame, app, layout.header, &info);

    let menu_area = centered_rect(50, 80, body_area(&layout));
    frame.render_widget(MenuView::new(&app.menu, &app.theme), menu_area);

    render_footer(
        frame,
        app,
        layout.footer,
        &["[1-3/?] Open", "[Enter] Select", "[t] Theme", "[a] Auto-speak", "[q] Quit"],
    );
}

fn render_word_list(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::with_footer(frame.area(), 2);
    let groups = word_list::grouped(&app.catalog, &app.word_list);
    let shown: usize = groups.iter().map(|g| g.entries.len()).sum();

    render_header(
        frame,
        app,
        layout.header,
        &format!(" {shown} of {} words", app.catalog.len()),
    );
    frame.render_widget(
        WordListView::new(&groups, &app.word_list, app.word_list_scroll, &app.theme),
        body_area(&layout),
    );
    render_footer(
        frame,
        app,
        layout.footer,
        &[
            "[g] Group",
            "[s] Sort",
            "[c] Category",
            "[f] First letter",
            "[x] Clear filters",
            "[\u{2191}/\u{2193}] Scroll",
            "[Esc] Home",
        ],
    );
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::with_footer(frame.area(), 2);
    render_header(frame, app, layout.header, " Flashcards");

    let card_area = centered_rect(60, 70, body_area(&layout));
    match app.practice_entry() {
        Some(entry) => frame.render_widget(
            PracticeCard::new(entry, app.practice.revealed, &app.theme),
            card_area,
        ),
        None => frame.render_widget(
            Paragraph::new("No vocabulary loaded.")
                .style(Style::default().fg(app.theme.colors.warning())),
            card_area,
        ),
    }

    let pronounce = if app.can_pronounce() { "[p] Pronounce" } else { "" };
    render_footer(
        frame,
        app,
        layout.footer,
        &["[Space] Reveal", "[n] Next card", pronounce, "[Esc] Home"],
    );
}

fn render_exercise(frame: &mut ratatui::Frame, app: &App) {
    let Some(exercise) = app.exercise.as_ref() else {
        return;
    };
    let layout = AppLayout::with_footer(frame.area(), 2);

    match exercise.mode() {
        ExerciseMode::Wizard => {
            let wizard = exercise.wizard();
            let step = wizard.step();
            let info = format!(" Step {} of {}", step.number(), WizardStep::COUNT);
            render_header(frame, app, layout.header, &info);

            let show_progress = layout.tier.show_progress_bar(frame.area().height);
            let mut constraints = vec![Constraint::Min(6)];
            if show_progress {
                constraints.push(Constraint::Length(3));
            }
            let main = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(layout.main);

            frame.render_widget(WizardSteps::new(wizard, &app.theme), main[0]);
            if show_progress {
                let label = format!("Step {}: {}", step.number(), step.name());
                frame.render_widget(
                    ProgressBar::new(&label, wizard.progress(), &app.theme),
                    main[1],
                );
            }
            if let Some(sidebar) = layout.sidebar {
                frame.render_widget(WizardProgress::new(wizard.state(), &app.theme), sidebar);
            }

            let back = if wizard.can_go_back() { "[b] Back" } else { "" };
            let next = match step {
                WizardStep::Start if wizard.can_start() => "[Enter] Start",
                WizardStep::Start => "",
                _ if wizard.can_go_next() => "[Enter] Next",
                _ => "",
            };
            render_footer(
                frame,
                app,
                layout.footer,
                &["[\u{2190}/\u{2192}] Change", next, back, "[Esc] Home"],
            );
        }
        ExerciseMode::InProgress => {
            let Some(session) = exercise.session() else {
                return;
            };
            let info = format!(
                " {} answered of {}",
                session.attempts().len(),
                session.total_questions()
            );
            render_header(frame, app, layout.header, &info);
            let area = centered_rect(70, 70, body_area(&layout));
            frame.render_widget(QuestionView::new(session, app.can_pronounce(), &app.theme), area);
            render_footer(frame, app, layout.footer, &[]);
        }
        ExerciseMode::Report => {
            let Some(report) = exercise.report() else {
                return;
            };
            render_header(frame, app, layout.header, " Results");
            frame.render_widget(
                ReportView::new(report, app.report_selected, app.can_pronounce(), &app.theme),
                body_area(&layout),
            );
            render_footer(frame, app, layout.footer, &[]);
        }
    }
}

fn render_help(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::with_footer(frame.area(), 2);
    render_header(frame, app, layout.header, "");

    let area = centered_rect(70, 90, body_area(&layout));
    let block = Block::bordered()
        .title(" Help ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
    };
    let item = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(colors.fg())));

    let lines = vec![
        heading("Exercise"),
        item("  Pick a stage, a category, how many words and the time per word."),
        item("  Each question shows a definition: type the word and press Enter."),
        item("  When the time runs out, whatever you typed is submitted for you."),
        item("  Answers are marked ignoring case and surrounding spaces."),
        Line::from(""),
        heading("Exercise keys"),
        item("  \u{2190}/\u{2192}  change the current step's value   Enter  next step / start"),
        item("  b      previous step                       Esc    cancel and go home"),
        item("  Ctrl+P / F2  pronounce the current word"),
        item("  On the report: \u{2191}/\u{2193} select a row, p pronounce it, r start again"),
        Line::from(""),
        heading("Elsewhere"),
        item("  Word list: g group, s sort, c category, f first letter, x clear"),
        item("  Practice: Space reveal, n next card, p pronounce"),
        item("  t toggles the dark/light theme; a (on Home) toggles auto-speak"),
        Line::from(""),
        heading("Settings"),
        item("  Stored in the maestra folder of your config directory (config.toml)."),
        item("  Set RUST_LOG=info to write a log file."),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, frame.buffer_mut());

    render_footer(frame, app, layout.footer, &["[Esc] Home", "[t] Theme"]);
}
