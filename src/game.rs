use std::{thread::sleep, time::{Duration, Instant}};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::direction::{Direction::{self, *}, Steering};
use crate::error::GameError;
use crate::food::Food;
use crate::geometry::BoardGeometry;
use crate::log;
use crate::score::Score;
use crate::term::{Color, InputEvent, InputSource, Key, Surface};
use crate::worm::Worm;

const INITIAL_DIRECTION: Direction = Right;

const BACKGROUND_COLOR: Color = Color::Black;
const WORM_COLOR: Color = Color::White;
const FOOD_COLOR: Color = Color::Red;
const SCORE_COLOR: Color = Color::White;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    WallCollision,
    SelfCollision,
    UserQuit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Terminated(TerminationReason),
}

/// Everything one game owns: board, worm, food, score and steering.
pub struct Session {
    geometry: BoardGeometry,
    worm: Worm,
    food: Food,
    score: Score,
    steering: Steering,
    tick_interval: Duration,
    rng: StdRng,
    state: GameState,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let geometry = BoardGeometry::new(config.board_size(), config.display_size());
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let worm = Worm::spawn(geometry.center(), config.initial_length);
        let food = Food::spawn(&geometry, &mut rng);

        Session {
            geometry,
            worm,
            food,
            score: Score::default(),
            steering: Steering::new(INITIAL_DIRECTION),
            tick_interval: Duration::from_secs(1) / config.ticks_per_second.max(1),
            rng,
            state: GameState::Running,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Runs ticks at the configured rate until the game ends.
    pub fn run<S: Surface, I: InputSource>(&mut self, surface: &mut S, input: &mut I) -> Result<TerminationReason, GameError> {
        loop {
            let start = Instant::now();

            if let GameState::Terminated(reason) = self.step(surface, input)? {
                return Ok(reason);
            }

            sleep(tick_sleep(self.tick_interval, start.elapsed()));
        }
    }

    /// One tick without the throttle: input, collision checks, movement,
    /// food, then a full redraw. Nothing is moved or drawn once the session
    /// has terminated.
    pub fn step<S: Surface, I: InputSource>(&mut self, surface: &mut S, input: &mut I) -> Result<GameState, GameError> {
        let events = input.poll_events()?;
        self.handle_input(events);

        if let GameState::Terminated(_) = self.update() {
            return Ok(self.state);
        }

        self.render(surface)?;
        Ok(self.state)
    }

    pub fn handle_input(&mut self, events: Vec<InputEvent>) {
        for ev in events {
            if self.state != GameState::Running {
                return;
            }

            match ev {
                InputEvent::Quit | InputEvent::Key(Key::Escape) => {
                    self.terminate(TerminationReason::UserQuit);
                }
                InputEvent::Key(Key::Up) => { self.steering.request(Up); }
                InputEvent::Key(Key::Down) => { self.steering.request(Down); }
                InputEvent::Key(Key::Left) => { self.steering.request(Left); }
                InputEvent::Key(Key::Right) => { self.steering.request(Right); }
            }
        }
    }

    pub fn update(&mut self) -> GameState {
        if self.state != GameState::Running {
            return self.state;
        }

        let direction = self.steering.latch();

        // Collisions are judged on the position the worm came to rest in last tick
        if self.worm.hit_self() {
            return self.terminate(TerminationReason::SelfCollision);
        }
        if self.worm.hit_wall(&self.geometry) {
            return self.terminate(TerminationReason::WallCollision);
        }

        self.worm.move_by(direction.offset());
        self.eat_food();

        self.state
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), GameError> {
        surface.clear(BACKGROUND_COLOR)?;

        for cell in self.worm.positions() {
            if let Some(rect) = self.geometry.cell_rect(cell) {
                surface.fill_rect(rect, WORM_COLOR)?;
            }
        }

        if let Some(rect) = self.geometry.cell_rect(self.food.position()) {
            surface.fill_rect(rect, FOOD_COLOR)?;
        }

        surface.draw_text((0, self.geometry.status_row()), &self.score.to_string(), SCORE_COLOR)?;
        surface.present()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn eat_food(&mut self) {
        if !self.worm.head_on(self.food.position()) {
            return;
        }

        self.food.relocate(&self.geometry, &mut self.rng);
        self.worm.add_segment();
        let score = self.score.increase();

        let food = self.food.position();
        log!("Ate food: score {}, length {}, next food at ({}, {})", score, self.worm.len(), food.col, food.row);
    }

    fn terminate(&mut self, reason: TerminationReason) -> GameState {
        self.state = GameState::Terminated(reason);
        let head = self.worm.head();
        log!(
            "Game over: {:?} with head at ({}, {}) heading {:?}, score {}",
            reason, head.col, head.row, self.steering.committed(), self.score.value()
        );
        self.state
    }
}

/// Time left in the tick budget. An overrun yields zero so the next tick
/// starts immediately.
pub fn tick_sleep(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}
