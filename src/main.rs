mod animation;
mod body;
mod canvas;
mod cipher;
mod config;
mod error;
mod events;
mod food;
mod game;
mod geometry;
mod highscore;
mod logging;
mod menu;
mod snake;
mod state;
mod term;

use std::env;
use std::path::Path;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::{Settings, CONFIG_FILE, SCORE_KEY_ENV};
use error::GameError;
use game::SnakeGame;
use geometry::{bound_factor, Field};
use highscore::HighScoreStore;
use term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

// Room for the pause menu plus a margin
const MIN_COLS: TermInt = 60;
const MIN_ROWS: TermInt = 15;

fn main() -> Result<(), GameError> {
    let settings = Settings::load(Path::new(CONFIG_FILE))?;
    logging::init(&settings.log_file)?;

    info!("====> Game session started");
    let result = run(settings);
    if let Err(e) = &result {
        error!("{}", e);
    }
    info!(" <==== Game session ended");

    result
}

fn run(settings: Settings) -> Result<(), GameError> {
    let mut term = TermManager::new(settings.stats_height)?;
    let (cols, rows) = term.get_terminal_size();
    info!("Resolution: {} x {}", cols, rows);

    if cols < MIN_COLS || rows < MIN_ROWS {
        info!("Recommended resolution is 60x25");
        return Err(GameError::TerminalTooSmall { cols, rows, min_cols: MIN_COLS, min_rows: MIN_ROWS });
    }

    let key = settings.resolve_score_key(env::var(SCORE_KEY_ENV).ok())?;

    term.setup()?;

    let field = Field::for_terminal(cols, rows, settings.stats_height);
    let bound = bound_factor(cols, rows, settings.score_point_value, settings.speed_factor);
    info!("Score bound factor: {}", bound);

    let store = HighScoreStore::new(settings.score_file.clone(), key);
    info!("High scores are kept in {}", store.path().display());

    // The terminal is restored when the game (and the TermManager it owns) is dropped
    let mut game = SnakeGame::new(settings, field, bound, store, term, StdRng::from_entropy())?;
    game.play()
}
