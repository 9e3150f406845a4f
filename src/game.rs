use std::thread::sleep;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{error, info, warn};
use rand::rngs::StdRng;

use crate::canvas::{Frontend, Key};
use crate::config::Settings;
use crate::error::Result;
use crate::events::GameEvent;
use crate::geometry::{Direction, Field};
use crate::highscore::{HighScore, HighScoreStore, DEFAULT_PLAYER_NAME};
use crate::menu::{Menu, MenuResponse};
use crate::state::GameState;

const HELP_TITLE: &str = "Help";
const ABOUT_TITLE: &str = "About";
const HIGH_SCORE_TITLE: &str = "High scores";

const HELP_TEXT: &[&str] = &["Controls:", "'W' 'S' 'A' 'D' for direction change", "'P' or 'Esc' for pause/menu"];
const ABOUT_TEXT: &[&str] = &["A terminal snake game.", "Eat the food, mind the walls", "and your own tail.", "", "Have fun!"];

/// Score for one food item. `bound_factor` is always below
/// `score_point_value * speed_factor`, so the increment stays positive.
pub fn food_score(score_point_value: u32, speed_factor: u32, old_length: usize, bound_factor: u32) -> u32 {
    let length = u32::try_from(old_length).unwrap_or(u32::MAX);
    score_point_value.saturating_mul(speed_factor).saturating_add(length).saturating_sub(bound_factor)
}

/// Fixed-rate clock: `wait` returns once per period, catching up without
/// bursting if a tick ran long.
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(ticks_per_second: u32) -> Self {
        Ticker { period: Duration::from_secs(1) / ticks_per_second.max(1), next: Instant::now() }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn wait(&mut self) {
        self.next += self.period;
        let now = Instant::now();
        if self.next > now {
            sleep(self.next - now);
        } else {
            self.next = now;
        }
    }
}

pub struct SnakeGame<F: Frontend> {
    settings: Settings,
    field: Field,
    bound_factor: u32,
    state: GameState,
    menu: Menu,
    store: HighScoreStore,
    frontend: F,
    rng: StdRng,
}

impl<F: Frontend> SnakeGame<F> {
    pub fn new(
        settings: Settings,
        field: Field,
        bound_factor: u32,
        store: HighScoreStore,
        frontend: F,
        mut rng: StdRng,
    ) -> Result<Self> {
        let state = GameState::new(&field, settings.initial_length, settings.food_attempts, &mut rng)?;
        Ok(SnakeGame { settings, field, bound_factor, state, menu: Menu::new(), store, frontend, rng })
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs ticks until the session ends, then shows game over and saves the score.
    pub fn play(&mut self) -> Result<()> {
        info!("Starting new game...");
        self.frontend.clear_field()?;

        let mut ticker = Ticker::new(self.settings.speed_factor);
        info!("Tick period: {:?}", ticker.period());
        while self.state.running {
            ticker.wait();
            self.step()?;
        }

        self.finish();
        Ok(())
    }

    /// One tick: input, update, render, then at most one event.
    pub fn step(&mut self) -> Result<()> {
        if self.state.paused {
            return self.step_menu();
        }

        if let Some(key) = self.frontend.poll_key() {
            self.handle_key(key)?;
            if self.state.paused {
                return Ok(());
            }
        }

        self.state.update_objects(&self.field, self.settings.food_attempts, &mut self.rng, &mut self.frontend);
        self.state.draw_objects(&mut self.frontend);
        self.frontend.draw_stats(self.state.snake.len(), self.state.score)?;
        self.frontend.flush()?;

        self.handle_events()
    }

    fn step_menu(&mut self) -> Result<()> {
        let key = match self.frontend.poll_key() {
            Some(key) => key,
            None => return Ok(()),
        };

        match self.menu.handle_key(key, &mut self.state.events) {
            MenuResponse::Dismiss => {
                self.state.paused = false;
                self.frontend.hide_menu()?;
                self.frontend.flush()?;
                // The chosen option runs before the snake moves again
                self.handle_events()
            }
            MenuResponse::Stay => {
                self.frontend.draw_menu(&self.menu)?;
                self.frontend.flush()
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> Result<()> {
        let dir = match key {
            Key::Char('w') | Key::Up => Direction::Up,
            Key::Char('s') | Key::Down => Direction::Down,
            Key::Char('a') => Direction::Left,
            Key::Char('d') => Direction::Right,
            Key::Char('p') | Key::Esc => {
                self.state.paused = true;
                self.menu.reset();
                self.frontend.draw_menu(&self.menu)?;
                return self.frontend.flush();
            }
            Key::Interrupt => {
                self.state.events.post(GameEvent::Exit);
                return Ok(());
            }
            _ => return Ok(()),
        };

        self.state.snake.set_direction(dir);
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        let event = match self.state.events.take() {
            Some(event) => event,
            None => return Ok(()),
        };
        info!("Event occurred: {}", event);

        match event {
            GameEvent::FoodEaten { old_length } => {
                let increment = food_score(
                    self.settings.score_point_value,
                    self.settings.speed_factor,
                    old_length,
                    self.bound_factor,
                );
                self.state.score = self.state.score.saturating_add(increment);
                info!("Score increased. Current score: {}", self.state.score);
            }
            GameEvent::Collision | GameEvent::Exit => self.state.running = false,
            GameEvent::NewGame => self.new_game()?,
            GameEvent::Help => self.show_text(HELP_TITLE, HELP_TEXT),
            GameEvent::About => self.show_text(ABOUT_TITLE, ABOUT_TEXT),
            GameEvent::HighScore => self.show_high_scores(),
        }
        Ok(())
    }

    fn new_game(&mut self) -> Result<()> {
        info!("Starting new game...");
        self.state = GameState::new(&self.field, self.settings.initial_length, self.settings.food_attempts, &mut self.rng)?;
        self.frontend.clear_field()
    }

    fn show_text(&mut self, title: &str, text: &[&str]) {
        let lines: Vec<String> = text.iter().map(|l| l.to_string()).collect();
        self.show_window(title, &lines);
    }

    fn show_high_scores(&mut self) {
        let scores = self.store.load().unwrap_or_else(|e| {
            warn!("Error loading high scores: {}", e);
            Default::default()
        });

        let lines: Vec<String> = scores.top(self.settings.max_listed_scores).iter().map(|s| s.to_string()).collect();
        self.show_window(HIGH_SCORE_TITLE, &lines);
    }

    fn show_window(&mut self, title: &str, lines: &[String]) {
        if let Err(e) = self.frontend.show_info(title, lines) {
            warn!("Skipping {} window: {}", title, e);
        }
    }

    fn finish(&mut self) {
        if let Err(e) = self.frontend.show_game_over() {
            warn!("Skipping game over window: {}", e);
        }

        if self.state.score == 0 {
            return;
        }

        let player_name = match self.frontend.prompt_player_name() {
            Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
            Ok(_) => DEFAULT_PLAYER_NAME.to_string(),
            Err(e) => {
                warn!("Error getting player name: {}", e);
                DEFAULT_PLAYER_NAME.to_string()
            }
        };
        info!("Player name is: {}", player_name);

        let entry = HighScore { timestamp: Utc::now(), score: self.state.score, player_name };
        if let Err(e) = self.store.save(entry) {
            error!("Error saving high score: {}", e);
        }
    }
}
