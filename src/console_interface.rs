use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use sokoban_engine::core::UNDO_LIMIT;
use sokoban_engine::{
    BlockReason, Direction, Level, SessionEvent, SokobanError, UserAction, render_level_to_string,
};
use std::io;

pub struct GameRenderState<'a> {
    pub level: &'a Level,
    pub status: Option<String>,
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        let level = state.level;
        let title = format!(
            "Sokoban | Level {} | Steps {} | Undo {}/{} | Boxes {}/{}",
            level.number(),
            level.step_count(),
            level.undo_used(),
            UNDO_LIMIT,
            level.count_boxes_on_targets(),
            level.boxes().len(),
        );
        let game_paragraph = Paragraph::new(render_level_to_string(level))
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[0]);

        let status = state.status.clone().unwrap_or_default();
        let status_paragraph = Paragraph::new(status)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(status_paragraph, chunks[1]);

        let instructions = "WASD/Arrows move | U undo | R restart level | N next | P previous | Ctrl+S/F2 save | Q quit";
        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

/// One line summarizing what the last command did.
pub fn describe_events(events: &[SessionEvent]) -> Option<String> {
    let parts: Vec<String> = events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::Moved(_) => None,
            SessionEvent::Blocked(BlockReason::BoxBlocked) => Some("The box won't budge".into()),
            SessionEvent::Blocked(_) => None,
            SessionEvent::LevelCompleted { level, steps } => {
                Some(format!("Level {level} complete in {steps} steps!"))
            }
            SessionEvent::LevelStarted { level } => Some(format!("Level {level}")),
            SessionEvent::GameCompleted => Some("All levels solved!".into()),
            SessionEvent::Undone { used, remaining } => {
                Some(format!("Undo {used}/{UNDO_LIMIT}, {remaining} left"))
            }
            SessionEvent::Reloaded { level } => Some(format!("Level {level} restarted")),
            SessionEvent::AdvanceFailed { level, reason } => {
                Some(format!("Level {level} unavailable: {reason}"))
            }
            SessionEvent::SaveFailed(err) => Some(format!("Warning: {err}")),
            SessionEvent::FellBackToNewGame(err) => {
                Some(format!("No usable save ({err}), new game started"))
            }
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

pub fn describe_error(err: &SokobanError) -> String {
    match err {
        SokobanError::NothingToUndo => "You haven't moved yet".into(),
        SokobanError::UndoBudgetExhausted(limit) => {
            format!("All {limit} undos used. Press R to restart the level")
        }
        other => format!("Error: {other}"),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleInput {
    UserAction(UserAction),
    Undo,
    Reload,
    NextLevel,
    PreviousLevel,
    Save,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input() -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(map_key(code, modifiers));
        }
    }
    Ok(ConsoleInput::Timeout)
}

/// Maps a key press to a console command. Save is Ctrl+S or F2; `s` in either case moves down.
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> ConsoleInput {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('s') | KeyCode::Char('S') => ConsoleInput::Save,
            _ => ConsoleInput::Unknown,
        };
    }
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Up))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Down))
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Left))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Right))
        }
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Backspace => ConsoleInput::Undo,
        KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Reload,
        KeyCode::Char('n') | KeyCode::Char('N') => ConsoleInput::NextLevel,
        KeyCode::Char('p') | KeyCode::Char('P') => ConsoleInput::PreviousLevel,
        KeyCode::F(2) => ConsoleInput::Save,
        _ => ConsoleInput::Unknown,
    }
}
