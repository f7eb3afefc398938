// Terminal Sokoban on top of the level engine.
// Controls: W/A/S/D or arrow keys to move, U undo, R restart level, N/P next/previous level,
// Ctrl+S or F2 save, Q quit. Progress is saved after every move.

mod console_interface;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sokoban_engine::config::{DEFAULT_LEVELS_DIR, DEFAULT_LOG_PATH, DEFAULT_SAVE_PATH};
use sokoban_engine::{GameConfig, Session, SessionEvent};

use crate::console_interface::ConsoleInput::*;
use crate::console_interface::{
    GameRenderState, cleanup_terminal, describe_error, describe_events, handle_input,
    render_game, setup_terminal,
};

#[derive(Parser, Debug)]
#[command(name = "sokoban", version, about = "Push every box onto a target")]
struct Args {
    /// Directory with <n>.map level files
    #[arg(long, default_value = DEFAULT_LEVELS_DIR)]
    levels: PathBuf,

    /// Save file location
    #[arg(long, default_value = DEFAULT_SAVE_PATH)]
    save: PathBuf,

    /// Log file location (filter with RUST_LOG)
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Discard any save and start from level 1
    #[arg(long)]
    new_game: bool,

    /// Jump to this level after starting
    #[arg(long)]
    level: Option<i64>,
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        GameConfig {
            levels_dir: args.levels,
            save_path: args.save,
            log_path: args.log_file,
            new_game: args.new_game,
            start_level: args.level,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: GameConfig = Args::parse().into();
    init_logging(&config)?;
    info!("Starting Sokoban v{}", sokoban_engine::VERSION);

    let mut session = Session::from_config(&config)?;
    let mut events = if config.new_game || !session.has_save() {
        session.new_game()?
    } else {
        session.continue_game()?
    };
    if let Some(level) = config.start_level {
        events.extend(session.jump_to(level)?);
    }

    let mut terminal = setup_terminal()?;
    let result = run_interactive(&mut session, &mut terminal, &events);
    cleanup_terminal()?;
    if let Err(err) = &result {
        error!("game loop failed: {err}");
    }
    info!("Game loop ended");
    result
}

fn init_logging(config: &GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create(&config.log_path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn run_interactive(
    session: &mut Session,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    startup_events: &[SessionEvent],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut status = describe_events(startup_events);
    render_game(terminal, &GameRenderState {
        level: session.level(),
        status: status.clone(),
    })?;

    loop {
        let result = match handle_input()? {
            Quit => break,
            Timeout | Unknown => continue,
            UserAction(sokoban_engine::UserAction::Move(direction)) => {
                session.apply_direction(direction)
            }
            Undo => session.undo(),
            Reload => session.reload(),
            NextLevel => session.next_level(),
            PreviousLevel => session.previous_level(),
            Save => session.save().map(|()| Vec::new()),
        };

        status = match result {
            Ok(events) => describe_events(&events),
            Err(err) => Some(describe_error(&err)),
        };
        render_game(terminal, &GameRenderState {
            level: session.level(),
            status: status.clone(),
        })?;
    }

    Ok(())
}
