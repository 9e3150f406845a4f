use log::info;

use crate::canvas::Key;
use crate::events::{EventBus, GameEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Continue,
    Post(GameEvent),
}

#[derive(Clone, Debug)]
pub struct MenuItem {
    pub title: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn label(&self) -> String {
        format!("{}\t{}", self.title, self.description)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuResponse {
    Stay,
    Dismiss,
}

pub const MENU_TITLE: &str = "Main Menu";

/// Pause menu. While open it gets every key; it only talks to the game by
/// posting events on the bus.
#[derive(Clone, Debug)]
pub struct Menu {
    items: Vec<MenuItem>,
    cursor: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        let items = vec![
            MenuItem { title: "Continue", description: " -- Resume current game", action: MenuAction::Continue },
            MenuItem { title: "New Game", description: " -- Begin new game", action: MenuAction::Post(GameEvent::NewGame) },
            MenuItem { title: "Help", description: " -- See the gameplay help", action: MenuAction::Post(GameEvent::Help) },
            MenuItem {
                title: "High Score",
                description: " -- See the leadership table",
                action: MenuAction::Post(GameEvent::HighScore),
            },
            MenuItem { title: "About", description: " -- Info about creator", action: MenuAction::Post(GameEvent::About) },
            MenuItem {
                title: "Exit",
                description: " -- Save score and close the game",
                action: MenuAction::Post(GameEvent::Exit),
            },
        ];
        Menu { items, cursor: 0 }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn handle_key(&mut self, key: Key, bus: &mut EventBus) -> MenuResponse {
        match key {
            Key::Down => {
                self.cursor = if self.cursor + 1 == self.items.len() { 0 } else { self.cursor + 1 };
                MenuResponse::Stay
            }
            Key::Up => {
                self.cursor = if self.cursor == 0 { self.items.len() - 1 } else { self.cursor - 1 };
                MenuResponse::Stay
            }
            Key::Enter => self.confirm(bus),
            Key::Esc | Key::Char('p') => MenuResponse::Dismiss,
            Key::Interrupt => {
                bus.post(GameEvent::Exit);
                MenuResponse::Dismiss
            }
            Key::Char(_) => MenuResponse::Stay,
        }
    }

    fn confirm(&self, bus: &mut EventBus) -> MenuResponse {
        let item = &self.items[self.cursor];
        info!("{} menu option selected", item.title);

        if let MenuAction::Post(event) = item.action {
            bus.post(event);
        }
        MenuResponse::Dismiss
    }
}
