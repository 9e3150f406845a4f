use crate::canvas::{Canvas, Frontend, Key};
use crate::error::{GameError, Result};
use crate::geometry::Point;
use crate::menu::{Menu, MENU_TITLE};
use crate::{Coords, TermInt};

use std::io::{stdout, Stdout, Write};
use std::thread::sleep;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use log::warn;

const MENU_MARK: &str = " => ";
const MENU_MARK_EMPTY: &str = "    ";
const CLOSE_HINT: &str = "Press 'q' to close";
const NAME_PROMPT: &str = "Enter your name: ";
const NAME_TITLE: &str = "Player name";
const MAX_NAME_LEN: usize = 12;
const GAME_OVER_PAUSE: Duration = Duration::from_millis(2000);

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stats_height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    overlay: Option<Overlay>,
    active: bool,
}

/// Screen area covered by the open message box.
struct Overlay {
    left: TermInt,
    top: TermInt,
    width: TermInt,
    height: TermInt,
}

impl Overlay {
    /// The saved screen content under the box, one string per row.
    fn covered_rows(&self, screen: &[char], screen_width: TermInt) -> Vec<(Coords, String)> {
        (self.top..self.top + self.height)
            .map(|y| {
                let start = screen_width as usize * y as usize + self.left as usize;
                let row = screen[start..start + self.width as usize].iter().collect();
                ((self.left, y), row)
            })
            .collect()
    }
}

impl TermManager {
    pub fn new(stats_height: TermInt) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stats_height, stdout: stdout(), screen, overlay: None, active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.active = true;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(ev);
                }
            }
        }
    }

    fn draw_borders(&mut self, top_left: Coords, width: TermInt, height: TermInt) {
        let (x0, y0) = top_left;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x { '+' } else { '-' };
            self.print_at((x, y0), ch);
            self.print_at((x, end_y), ch);
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|');
            self.print_at((end_x, y), '|');
        }
    }

    fn show_message(&mut self, title: Option<&str>, lines: &[String]) -> Result<()> {
        self.hide_message()?;

        let mut body: Vec<String> = Vec::new();
        if let Some(title) = title {
            body.push(title.to_string());
            body.push(String::new());
        }
        body.extend(lines.iter().map(|l| l.replace('\t', "  ")));

        let content_width = body.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let msg_width = (content_width + 4) as TermInt;
        let msg_height = (body.len() + 2) as TermInt;

        if msg_width > self.width || msg_height > self.height {
            return Err(GameError::Window(title.unwrap_or("message").to_string()));
        }

        let top_left = ((self.width - msg_width) / 2, (self.height - msg_height) / 2);
        let edge = format!("+{}+", "-".repeat(msg_width as usize - 2));

        self.print_line_no_save((top_left.0, top_left.1), &edge);
        self.print_line_no_save((top_left.0, top_left.1 + msg_height - 1), &edge);

        for (i, line) in body.iter().enumerate() {
            let padded = if title.is_some() && i == 0 {
                format!("| {: ^width$} |", line, width = content_width)
            } else {
                format!("| {: <width$} |", line, width = content_width)
            };
            self.print_line_no_save((top_left.0, top_left.1 + 1 + i as TermInt), &padded);
        }

        self.overlay = Some(Overlay { left: top_left.0, top: top_left.1, width: msg_width, height: msg_height });
        self.flush_stdout()
    }

    fn hide_message(&mut self) -> Result<()> {
        let overlay = match self.overlay.take() {
            Some(overlay) => overlay,
            None => return Ok(()),
        };

        for (pos, row) in overlay.covered_rows(&self.screen, self.width) {
            self.print_line_no_save(pos, &row);
        }

        self.flush_stdout()
    }

    fn print_at(&mut self, pos: Coords, ch: char) {
        if pos.0 >= self.width || pos.1 >= self.height {
            return;
        }
        self.print_at_no_save(pos, ch);
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
    }

    fn print_str_at(&mut self, pos: Coords, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch);
        }
    }

    // Message boxes skip the screen buffer so hiding them can restore what was underneath
    fn print_at_no_save(&mut self, pos: Coords, ch: char) {
        if let Err(e) = queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)) {
            warn!("Error printing at {:?}: {}", pos, e);
        }
    }

    fn print_line_no_save(&mut self, pos: Coords, line: &str) {
        if let Err(e) = queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(line)) {
            warn!("Error printing at {:?}: {}", pos, e);
        }
    }

    fn flush_stdout(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    /// Field cells sit inside the game window, below the stats bar.
    fn field_to_screen(&self, at: Point) -> Option<Coords> {
        let x = 1 + at.col;
        let y = self.stats_height as i32 + at.row;
        if x < 0 || y < 0 {
            return None;
        }
        Some((x as TermInt, y as TermInt))
    }

    fn wait_for_close(&self) -> Result<()> {
        loop {
            let ev = self.read_key_blocking()?;
            if matches!(ev.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                return Ok(());
            }
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Error restoring the terminal: {}", e);
        }
    }
}

impl Canvas for TermManager {
    fn put(&mut self, at: Point, glyph: char) {
        if let Some(pos) = self.field_to_screen(at) {
            self.print_at(pos, glyph);
        }
    }
}

impl Frontend for TermManager {
    fn poll_key(&mut self) -> Option<Key> {
        loop {
            match poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    warn!("Error polling input: {}", e);
                    return None;
                }
            }

            match read() {
                Ok(Event::Key(ev)) => {
                    if let Some(key) = to_key(&ev) {
                        return Some(key);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Error reading input: {}", e);
                    return None;
                }
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_stdout()
    }

    fn clear_field(&mut self) -> Result<()> {
        self.overlay = None;
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];

        let stats_height = self.stats_height;
        if stats_height >= 2 {
            self.draw_borders((1, 0), self.width - 2, stats_height);
        }
        self.draw_borders((1, stats_height), self.width - 2, self.height - stats_height);
        self.flush_stdout()
    }

    fn draw_stats(&mut self, length: usize, score: u32) -> Result<()> {
        if self.stats_height < 3 {
            return Ok(());
        }

        let text = format!("length: {}  score: {}", length, score);
        let padded = format!("{: <width$}", text, width = self.width as usize - 4);
        self.print_str_at((2, 1), &padded);
        Ok(())
    }

    fn draw_menu(&mut self, menu: &Menu) -> Result<()> {
        let lines: Vec<String> = menu
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mark = if i == menu.cursor() { MENU_MARK } else { MENU_MARK_EMPTY };
                format!("{}{}", mark, item.label())
            })
            .collect();

        self.show_message(Some(MENU_TITLE), &lines)
    }

    fn hide_menu(&mut self) -> Result<()> {
        self.hide_message()
    }

    fn show_info(&mut self, title: &str, lines: &[String]) -> Result<()> {
        let mut body = lines.to_vec();
        body.push(String::new());
        body.push(CLOSE_HINT.to_string());

        self.show_message(Some(title), &body)?;
        let closed = self.wait_for_close();
        self.hide_message()?;
        closed
    }

    fn show_game_over(&mut self) -> Result<()> {
        self.show_message(None, &["Game Over".to_string()])?;
        sleep(GAME_OVER_PAUSE);
        self.hide_message()
    }

    fn prompt_player_name(&mut self) -> Result<String> {
        let mut name = String::new();

        loop {
            let line = format!("{}{: <width$}", NAME_PROMPT, format!("{}_", name), width = MAX_NAME_LEN + 1);
            self.show_message(Some(NAME_TITLE), &[line])?;

            let ev = self.read_key_blocking()?;
            match ev.code {
                KeyCode::Enter => break,
                KeyCode::Esc => {
                    name.clear();
                    break;
                }
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => {
                    name.clear();
                    break;
                }
                KeyCode::Char(c) if !c.is_control() && name.chars().count() < MAX_NAME_LEN => name.push(c),
                _ => {}
            }
        }

        self.hide_message()?;
        Ok(name)
    }
}

fn to_key(ev: &KeyEvent) -> Option<Key> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Interrupt),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Char('a')),
        KeyCode::Right => Some(Key::Char('d')),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn overlay_restores_covered_rows() {
        let screen: Vec<char> = "abcdefghijklmnop".chars().collect();
        let overlay = Overlay { left: 1, top: 1, width: 2, height: 2 };
        assert_eq!(overlay.covered_rows(&screen, 4), vec![((1, 1), "fg".to_string()), ((1, 2), "jk".to_string())]);
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers, kind: KeyEventKind::Press, state: KeyEventState::NONE }
    }

    #[test]
    fn maps_keys() {
        assert_eq!(to_key(&key(KeyCode::Char('W'), KeyModifiers::SHIFT)), Some(Key::Char('w')));
        assert_eq!(to_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Key::Interrupt));
        assert_eq!(to_key(&key(KeyCode::Left, KeyModifiers::NONE)), Some(Key::Char('a')));
        assert_eq!(to_key(&key(KeyCode::Up, KeyModifiers::NONE)), Some(Key::Up));
        assert_eq!(to_key(&key(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Esc));
        assert_eq!(to_key(&key(KeyCode::Tab, KeyModifiers::NONE)), None);

        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(to_key(&release), None);
    }
}
