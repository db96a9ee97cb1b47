use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("terminal is {width}x{height} but the game needs at least {needed_width}x{needed_height}")]
    TerminalTooSmall {
        width: TermInt,
        height: TermInt,
        needed_width: TermInt,
        needed_height: TermInt,
    },
}
