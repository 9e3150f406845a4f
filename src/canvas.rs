use crate::error::GameError;
use crate::geometry::Point;
use crate::menu::Menu;

pub const EMPTY_GLYPH: char = ' ';

/// Anything that can put glyphs on the playfield.
pub trait Canvas {
    fn put(&mut self, at: Point, glyph: char);

    fn erase(&mut self, at: Point) {
        self.put(at, EMPTY_GLYPH);
    }
}

pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Enter,
    Esc,
    Interrupt,
}

/// Everything the game needs from the terminal besides raw glyph writes.
pub trait Frontend: Canvas {
    /// Next pending key, without blocking.
    fn poll_key(&mut self) -> Option<Key>;

    fn flush(&mut self) -> Result<(), GameError>;

    fn clear_field(&mut self) -> Result<(), GameError>;

    fn draw_stats(&mut self, length: usize, score: u32) -> Result<(), GameError>;

    fn draw_menu(&mut self, menu: &Menu) -> Result<(), GameError>;

    fn hide_menu(&mut self) -> Result<(), GameError>;

    /// Shows a titled info box and waits until it is closed with `q`.
    fn show_info(&mut self, title: &str, lines: &[String]) -> Result<(), GameError>;

    fn show_game_over(&mut self) -> Result<(), GameError>;

    fn prompt_player_name(&mut self) -> Result<String, GameError>;
}
