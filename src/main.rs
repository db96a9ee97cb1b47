mod config;
mod direction;
mod error;
mod food;
mod game;
mod geometry;
mod logger;
mod score;
mod term;
mod worm;

use std::process::ExitCode;

use clap::Parser;

use config::{Args, Config};
use error::GameError;
use game::{Session, TerminationReason};
use term::{TermInput, TermManager};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("worm: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), GameError> {
    let args = Args::parse();
    let config = Config::load(&args)?;
    logger::init_logger(config.log_file.as_deref())?;
    log!("Starting with {:?}", config);

    let mut session = Session::new(&config);

    // One extra row below the display for the score
    let (width, height) = config.display_size();
    let mut term = TermManager::new((width, height.saturating_add(1)));
    let mut input = TermInput;

    // The terminal is restored before any outcome or error is reported
    let outcome = term.setup().and_then(|_| session.run(&mut term, &mut input));
    term.restore()?;
    log!("Terminal restored");

    let score = session.score();
    match outcome? {
        TerminationReason::UserQuit => println!("{}", score),
        TerminationReason::WallCollision | TerminationReason::SelfCollision => {
            println!("You lose.");
            println!("Your final score: {}", score.value());
        }
    }

    Ok(())
}
