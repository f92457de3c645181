mod app;
mod client;
mod config;
mod engine;
mod event;
mod sample;
mod session;
mod store;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use config::Config;
use engine::level::CefrLevel;
use event::{AppEvent, EventHandler};
use ui::components::progress_view::ProgressView;
use ui::components::reading_view::ReadingView;
use ui::components::word_panel::WordPanel;
use ui::layout::{AppLayout, centered_rect};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "wordahead",
    version,
    about = "Terminal adaptive reading assistant with vocabulary tracking"
)]
struct Cli {
    #[arg(help = "Text file to read")]
    file: Option<PathBuf>,

    #[arg(long, help = "Open the bundled sample document")]
    sample: bool,

    #[arg(short, long, help = "Starting CEFR level (A1-C2)")]
    level: Option<String>,

    #[arg(long, help = "Analyzer server base URL")]
    server: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

enum DocumentSource {
    Sample,
    Text(String, String),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(level) = cli.level {
        if CefrLevel::parse(&level).is_none() {
            bail!("unknown CEFR level '{level}' (expected one of A1, A2, B1, B2, C1, C2)");
        }
        config.default_level = level;
    }
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }

    let document = if cli.sample {
        DocumentSource::Sample
    } else if let Some(path) = cli.file {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        DocumentSource::Text(name, text)
    } else {
        bail!("pass a text file to read, or --sample for the bundled document");
    };

    let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, theme, events.sender());

    match document {
        DocumentSource::Sample => app.open_sample(),
        DocumentSource::Text(name, text) => app.open_text(&name, &text),
    }

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
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
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Analysis { seq, result } => app.on_analysis(seq, result),
            AppEvent::Translation { seq, result } => app.on_translation(seq, result),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Reading => handle_reading_key(app, key),
        AppScreen::Progress => handle_progress_key(app, key),
        AppScreen::Help => app.go_to_reading(),
    }
}

fn handle_reading_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => {
            if app.session.view.selected.is_some() {
                app.clear_selection();
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Left => app.cursor_prev(),
        KeyCode::Right => app.cursor_next(),
        KeyCode::Up => app.scroll = app.scroll.saturating_sub(1),
        KeyCode::Down => app.scroll = app.scroll.saturating_add(1),
        KeyCode::Enter => app.select_cursor_word(),
        KeyCode::Char('l') => app.mark_selected_learned(),
        KeyCode::Char('r') => app.add_selected_to_review(),
        KeyCode::Char('p') => app.go_to_progress(),
        KeyCode::Char('a') => app.reanalyze(),
        KeyCode::Char('?') => app.go_to_help(),
        _ => {}
    }
}

fn handle_progress_key(app: &mut App, key: KeyEvent) {
    if app.review_confirm_delete {
        match key.code {
            KeyCode::Char('y') => {
                app.remove_selected_review();
                app.review_confirm_delete = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => app.review_confirm_delete = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('p') => app.go_to_reading(),
        KeyCode::Char('j') | KeyCode::Down => app.review_next(),
        KeyCode::Char('k') | KeyCode::Up => app.review_prev(),
        KeyCode::Char('x') | KeyCode::Delete => {
            if !app.session.profile.review_list.is_empty() {
                app.review_confirm_delete = true;
            }
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);

    render_header(frame, app, layout.header);
    if let Some(legend_area) = layout.legend {
        render_legend(frame, app, legend_area);
    }

    match app.screen {
        AppScreen::Reading => {
            if app.session.analysis_loading {
                let loading = Paragraph::new(Line::from(Span::styled(
                    "Analyzing...",
                    Style::default().fg(colors.warning()),
                )))
                .block(Block::bordered().border_style(Style::default().fg(colors.border())));
                frame.render_widget(loading, layout.main);
            } else {
                let reading = ReadingView::new(
                    &app.session.tokens,
                    &app.session.profile,
                    app.cursor,
                    app.scroll,
                    app.theme,
                );
                frame.render_widget(reading, layout.main);
            }

            if let Some(sidebar_area) = layout.sidebar {
                let panel = WordPanel::new(&app.session.view, &app.session.profile, app.theme);
                frame.render_widget(panel, sidebar_area);
            } else if app.session.view.selected.is_some() {
                // No room for a sidebar: show details as a popup instead
                let popup = centered_rect(70, 60, area);
                frame.render_widget(ratatui::widgets::Clear, popup);
                let panel = WordPanel::new(&app.session.view, &app.session.profile, app.theme);
                frame.render_widget(panel, popup);
            }
        }
        AppScreen::Progress => {
            let progress = ProgressView::new(
                &app.session.profile,
                app.review_selected,
                app.review_confirm_delete,
                app.theme,
            );
            frame.render_widget(progress, layout.main);
        }
        AppScreen::Help => render_help(frame, app, layout.main),
    }

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let info = format!(
        " Level {} | {} learned | {} to review | {}",
        app.session.level.current(),
        app.session.profile.learned_words.len(),
        app.session.profile.review_list.len(),
        app.document_name,
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " wordahead ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.fade_2()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_legend(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let legend = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "Hard & Important",
            Style::default()
                .fg(colors.hard_important())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Hard", Style::default().fg(colors.hard())),
        Span::raw("  "),
        Span::styled(
            "Important",
            Style::default()
                .fg(colors.important())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Faded", Style::default().fg(colors.fade_1())),
    ]));
    frame.render_widget(legend, area);
}

fn render_help(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(
                format!("  {k:<12}"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(colors.fg())),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Reading",
            Style::default().fg(colors.fade_1()),
        )),
        key("←/→", "Move between words"),
        key("↑/↓", "Scroll the document"),
        key("Enter", "Translate the word under the cursor"),
        key("l", "Mark the selected word as learned"),
        key("r", "Save the selected word for review"),
        key("a", "Re-analyze the text at the current level"),
        key("Esc", "Close the word panel (or quit)"),
        Line::from(""),
        Line::from(Span::styled(
            "  Progress",
            Style::default().fg(colors.fade_1()),
        )),
        key("p", "Open or close the progress dashboard"),
        key("j/k", "Move through the study list"),
        key("x", "Remove the selected study-list entry"),
        Line::from(""),
        key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to return.",
            Style::default().fg(colors.accent_dim()),
        )),
    ];

    let block = Block::bordered()
        .title(" Help ")
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let status_line = match &app.status {
        Some(status) => Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(colors.warning()),
        )),
        None => Line::from(""),
    };

    let hints = match app.screen {
        AppScreen::Reading => {
            " [←/→] Move  [↑/↓] Scroll  [Enter] Translate  [l] Learned  [r] Review  [p] Progress  [?] Help  [q] Quit"
        }
        AppScreen::Progress => " [j/k] Move  [x] Remove  [p/Esc] Back  [q] Back",
        AppScreen::Help => " Press any key to return",
    };
    let hints_line = Line::from(Span::styled(
        hints,
        Style::default().fg(colors.accent_dim()),
    ));

    let footer = Paragraph::new(vec![status_line, hints_line]);
    frame.render_widget(footer, area);
}
