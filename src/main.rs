mod event;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};

use pinyin_drill::app::{App, Command};
use pinyin_drill::catalog::Catalog;
use pinyin_drill::config::Config;
use pinyin_drill::logging;
use pinyin_drill::lookup::PinyinLookup;
use pinyin_drill::session::view::{Screen, ViewModel};
use pinyin_drill::store::json_store::JsonStore;

use event::{AppEvent, EventHandler};
use ui::components::chapter_menu::ChapterMenu;
use ui::components::confirm_dialog::ConfirmDialog;
use ui::components::practice::PracticePanel;
use ui::components::progress_bar::ProgressBar;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "pinyin-drill",
    version,
    about = "Terminal pinyin drill with per-character mastery tracking"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Correct answers in a row needed to master a character")]
    threshold: Option<u32>,

    #[arg(short, long, help = "Number of characters per chapter")]
    chapter_size: Option<usize>,

    #[arg(short, long, help = "Require tone numbers (e.g. ma3)")]
    advanced: bool,

    #[arg(long, help = "Directory for progress and logs")]
    data_dir: Option<String>,
}

/// Front-end state the controller does not own.
struct UiState {
    view: ViewModel,
    input: String,
    selected: usize,
    should_quit: bool,
}

impl UiState {
    fn new(view: ViewModel) -> Self {
        Self {
            view,
            input: String::new(),
            selected: 0,
            should_quit: false,
        }
    }

    fn apply(&mut self, app: &mut App, command: Command) {
        self.view = app.dispatch(command);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let save_error = if config_error.is_none() && !Config::exists() {
        config.save().err()
    } else {
        None
    };

    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(threshold) = cli.threshold {
        config.mastery_threshold = threshold;
    }
    if let Some(size) = cli.chapter_size {
        config.chars_per_chapter = size;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    config.validate();

    let _log_guard = logging::init_file_logging(&config.data_path().join("logs"));
    if let Some(e) = config_error {
        warn!(error = %e, "config unreadable, using defaults");
    }
    if let Some(e) = save_error {
        warn!(error = %e, "failed to write default config");
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!(
            theme = %config.theme,
            available = ?Theme::available_themes(),
            "unknown theme, using default"
        );
        Theme::default()
    });

    let store = match JsonStore::with_base_dir(config.data_path()) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "progress will not be saved this session");
            None
        }
    };

    let catalog = Catalog::load(config.chars_per_chapter);
    let mut app = App::new(
        &config,
        catalog,
        Box::new(PinyinLookup),
        store,
        SmallRng::from_entropy(),
    );
    if cli.advanced && !app.advanced_mode() {
        app.dispatch(Command::ToggleMode);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));
    let mut ui_state = UiState::new(app.view());

    let result = run_app(&mut terminal, &mut app, &mut ui_state, &events, &theme);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }
    info!("exiting");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ui_state: &mut UiState,
    events: &EventHandler,
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, ui_state, theme))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, ui_state, key),
            AppEvent::Tick(elapsed) => {
                if app.advance_time(elapsed) {
                    ui_state.view = app.view();
                }
            }
            AppEvent::Resize => {}
        }

        if ui_state.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, ui_state: &mut UiState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        ui_state.should_quit = true;
        return;
    }

    // Confirmation dialog takes priority
    if ui_state.view.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') => ui_state.apply(app, Command::Confirm),
            KeyCode::Char('n') | KeyCode::Esc => ui_state.apply(app, Command::Cancel),
            _ => {}
        }
        if ui_state.view.screen == Screen::InProgress {
            ui_state.input.clear();
        }
        return;
    }

    match ui_state.view.screen {
        Screen::Menu => handle_menu_key(app, ui_state, key),
        Screen::InProgress => handle_practice_key(app, ui_state, key),
        Screen::Complete => handle_complete_key(app, ui_state, key),
    }
}

fn handle_menu_key(app: &mut App, ui_state: &mut UiState, key: KeyEvent) {
    let count = ui_state.view.chapters.len();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => ui_state.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => {
            ui_state.selected = ui_state.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if ui_state.selected + 1 < count {
                ui_state.selected += 1;
            }
        }
        KeyCode::Enter => {
            ui_state.input.clear();
            let index = ui_state.selected;
            ui_state.apply(app, Command::SelectChapter(index));
        }
        KeyCode::Char('a') => ui_state.apply(app, Command::ToggleMode),
        KeyCode::Char('r') => ui_state.apply(app, Command::ResetAll),
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, ui_state: &mut UiState, key: KeyEvent) {
    let advancing = ui_state
        .view
        .practice
        .as_ref()
        .is_some_and(|p| p.advancing);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('t') {
            ui_state.apply(app, Command::ToggleMode);
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            ui_state.input.clear();
            ui_state.apply(app, Command::Back);
        }
        KeyCode::Tab if !advancing => {
            ui_state.input.clear();
            ui_state.apply(app, Command::RequestHint);
        }
        KeyCode::Enter | KeyCode::Char(' ') if !advancing => {
            let answer = std::mem::take(&mut ui_state.input);
            ui_state.apply(app, Command::Submit(answer));
        }
        KeyCode::Backspace => {
            ui_state.input.pop();
        }
        KeyCode::Char(ch) if !advancing => ui_state.input.push(ch),
        _ => {}
    }
}

fn handle_complete_key(app: &mut App, ui_state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => ui_state.apply(app, Command::ResetChapter),
        KeyCode::Enter | KeyCode::Esc => ui_state.apply(app, Command::Back),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, ui_state: &UiState, theme: &Theme) {
    let area = frame.area();
    let colors = &theme.colors;
    let view = &ui_state.view;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let app_layout = AppLayout::new(area);

    let mode_text = if view.advanced_mode {
        " | Tone numbers required"
    } else {
        " | Tones optional"
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " pinyin-drill ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            mode_text,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let hints: &[&str] = match view.screen {
        Screen::Menu => &[
            "[↑/↓] Select",
            "[Enter] Start",
            "[a] Toggle tones",
            "[r] Reset all",
            "[q] Quit",
        ],
        Screen::InProgress => &[
            "[Enter] Submit",
            "[Tab] Hint",
            "[Ctrl-t] Toggle tones",
            "[Esc] Chapters",
        ],
        Screen::Complete => &["[r] Reset chapter", "[Enter] Chapters"],
    };

    match view.screen {
        Screen::Menu => {
            let menu_area = ui::layout::centered_rect(56, app_layout.main.height, app_layout.main);
            let menu = ChapterMenu::new(
                &view.chapters,
                ui_state.selected,
                view.advanced_mode,
                theme,
            );
            frame.render_widget(menu, menu_area);
        }
        Screen::InProgress | Screen::Complete => {
            if let Some(practice) = &view.practice {
                let main_layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(5), Constraint::Length(3)])
                    .split(app_layout.main);

                let panel = PracticePanel::new(practice, view.screen, &ui_state.input, theme);
                frame.render_widget(panel, main_layout[0]);

                let progress = ProgressBar::new(
                    "Mastered",
                    practice.chapter.mastered_count,
                    practice.chapter.total,
                    theme,
                );
                frame.render_widget(progress, main_layout[1]);
            }
        }
    }

    let footer_lines: Vec<Line> = pack_hint_lines(hints, app_layout.footer.width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), app_layout.footer);

    if let Some(confirmation) = view.confirm {
        frame.render_widget(ConfirmDialog::new(confirmation, theme), area);
    }
}
