use log::{info, warn};
use rand::Rng;

use crate::canvas::{Canvas, Drawable};
use crate::error::GameError;
use crate::events::{EventBus, GameEvent};
use crate::food::{place_food, Food};
use crate::geometry::{Direction, Field};
use crate::snake::{MoveOutcome, Snake};

/// Everything that belongs to one game. Replaced wholesale on "new game".
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub running: bool,
    pub paused: bool,
    pub events: EventBus,
    board_full: bool,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(field: &Field, initial_length: usize, food_attempts: usize, rng: &mut R) -> Result<Self, GameError> {
        let head = field.center();
        // The body trails to the right of the head and must stay inside the field
        let room = (field.col_limit() - head.col).max(1) as usize;
        let length = if initial_length > room {
            warn!("Initial length {} does not fit the field, using {}", initial_length, room);
            room
        } else {
            initial_length
        };

        let snake = Snake::new(head, length, Direction::Left);
        let food = place_food(field, snake.body(), rng, food_attempts).ok_or(GameError::NoFreeCell)?;
        Ok(Self::with_parts(snake, Food::new(food)))
    }

    pub fn with_parts(snake: Snake, food: Food) -> Self {
        GameState { snake, food, score: 0, running: true, paused: false, events: EventBus::new(), board_full: false }
    }

    #[cfg(test)]
    pub fn board_full(&self) -> bool {
        self.board_full
    }

    /// Advances the snake, then the food, posting whatever events come out of it.
    pub fn update_objects<R: Rng + ?Sized>(
        &mut self,
        field: &Field,
        food_attempts: usize,
        rng: &mut R,
        canvas: &mut dyn Canvas,
    ) {
        if self.board_full {
            self.events.post(GameEvent::Exit);
            return;
        }

        match self.snake.move_step(field, self.food.position(), canvas) {
            MoveOutcome::Crashed { at } => {
                info!("Snake crashed at {:?}", at);
                self.events.post(GameEvent::Collision);
            }
            MoveOutcome::Ate { old_length, .. } => {
                match place_food(field, self.snake.body(), rng, food_attempts) {
                    Some(pos) => self.food = Food::new(pos),
                    None => {
                        info!("No free cell left for food, the board is full");
                        self.board_full = true;
                    }
                }
                self.events.post(GameEvent::FoodEaten { old_length });
            }
            MoveOutcome::Moved { .. } | MoveOutcome::Idle => {}
        }

        self.food.update();
    }

    pub fn draw_objects(&self, canvas: &mut dyn Canvas) {
        for obj in self.objects() {
            obj.draw(canvas);
        }
    }

    fn objects(&self) -> Vec<&dyn Drawable> {
        let mut objects: Vec<&dyn Drawable> = vec![&self.snake];
        if !self.board_full {
            objects.push(&self.food);
        }
        objects
    }
}
