use std::io;

use thiserror::Error;

/// Failures of the high score store. They never stop a running game.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("High score file is too short: {0} bytes")]
    TooShort(usize),

    #[error("Invalid cipher key length: expected 32 bytes, got {0}")]
    InvalidKey(usize),

    #[error("Could not encode high scores: {0}")]
    Encode(bincode::Error),

    #[error("Corrupt high score file: {0}")]
    Decode(bincode::Error),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Too small game window ({cols}x{rows}), at least {min_cols}x{min_rows} is needed")]
    TerminalTooSmall { cols: u16, rows: u16, min_cols: u16, min_rows: u16 },

    #[error("Could not open the {0} window")]
    Window(String),

    #[error("No free cell left on the board")]
    NoFreeCell,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
