use std::fmt;

use log::warn;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Collision,
    Exit,
    /// Carries the body length before the snake grew, which the score formula needs.
    FoodEaten { old_length: usize },
    NewGame,
    Help,
    HighScore,
    About,
}

impl GameEvent {
    /// Ending the session beats everything, then resetting it, then scoring, then info windows.
    fn priority(self) -> u8 {
        match self {
            GameEvent::Collision | GameEvent::Exit => 3,
            GameEvent::NewGame => 2,
            GameEvent::FoodEaten { .. } => 1,
            GameEvent::Help | GameEvent::HighScore | GameEvent::About => 0,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            GameEvent::Collision => "collision",
            GameEvent::Exit => "exit",
            GameEvent::FoodEaten { .. } => "foodEaten",
            GameEvent::NewGame => "newGame",
            GameEvent::Help => "help",
            GameEvent::HighScore => "highScore",
            GameEvent::About => "about",
        };
        f.write_str(tag)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PostOutcome {
    Queued,
    /// The slot was taken by an event of lower or equal priority, which was thrown away.
    Displaced(GameEvent),
    /// The slot holds a more important event; the posted one was thrown away.
    Dropped(GameEvent),
}

/// Single-slot event queue. Posting never blocks: on overflow the more
/// important event survives and the other one is reported and logged.
#[derive(Debug, Default)]
pub struct EventBus {
    slot: Option<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus { slot: None }
    }

    pub fn post(&mut self, event: GameEvent) -> PostOutcome {
        match self.slot {
            None => {
                self.slot = Some(event);
                PostOutcome::Queued
            }
            Some(parked) if event.priority() >= parked.priority() => {
                warn!("Event {} displaced pending event {}", event, parked);
                self.slot = Some(event);
                PostOutcome::Displaced(parked)
            }
            Some(parked) => {
                warn!("Event {} dropped, {} is still pending", event, parked);
                PostOutcome::Dropped(event)
            }
        }
    }

    pub fn take(&mut self) -> Option<GameEvent> {
        self.slot.take()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
