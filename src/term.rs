use crate::{Coords, TermInt};
use crate::error::GameError;
use crate::geometry::PixelRect;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Red,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// The player closed the game (Ctrl+C, the terminal's window close)
    Quit,
}

/// Drawing target with a fixed pixel size.
pub trait Surface {
    fn clear(&mut self, color: Color) -> Result<(), GameError>;
    fn fill_rect(&mut self, rect: PixelRect, color: Color) -> Result<(), GameError>;
    fn draw_text(&mut self, pos: Coords, text: &str, color: Color) -> Result<(), GameError>;
    fn present(&mut self) -> Result<(), GameError>;
}

/// Non-blocking source of player input. Returns every event pending since
/// the previous call and drops anything that is not a recognised key.
pub trait InputSource {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, GameError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pixel {
    ch: char,
    fg: Color,
    bg: Color,
}

/// Terminal surface where one pixel is one character cell. Frames are
/// composed in memory and `present` only rewrites the pixels that changed
/// since the previous frame.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    frame: Vec<Pixel>,
    shown: Vec<Option<Pixel>>,
    active: bool,
}

pub struct TermInput;

impl TermManager {
    pub fn new(size: Coords) -> Self {
        let (width, height) = size;
        let blank = Pixel::blank(Color::Black);
        let len = width as usize * height as usize;

        TermManager {
            width,
            height,
            stdout: stdout(),
            frame: vec![blank; len],
            shown: vec![None; len],
            active: false,
        }
    }

    pub fn setup(&mut self) -> Result<(), GameError> {
        let (width, height) = terminal::size()?;
        if width < self.width || height < self.height {
            return Err(GameError::TerminalTooSmall {
                width,
                height,
                needed_width: self.width,
                needed_height: self.height,
            });
        }

        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )?;

        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )?;

        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, x: TermInt, y: TermInt) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.width as usize * y as usize + x as usize)
        } else {
            None
        }
    }
}

impl Surface for TermManager {
    fn clear(&mut self, color: Color) -> Result<(), GameError> {
        self.frame.fill(Pixel::blank(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) -> Result<(), GameError> {
        for y in rect.y..rect.y.saturating_add(rect.height) {
            for x in rect.x..rect.x.saturating_add(rect.width) {
                if let Some(i) = self.index(x, y) {
                    self.frame[i] = Pixel::blank(color);
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, pos: Coords, text: &str, color: Color) -> Result<(), GameError> {
        for (x_diff, ch) in text.chars().enumerate() {
            let x = pos.0.saturating_add(x_diff as TermInt);
            if let Some(i) = self.index(x, pos.1) {
                self.frame[i] = Pixel { ch, fg: color, bg: self.frame[i].bg };
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = self.width as usize * y as usize + x as usize;
                let px = self.frame[i];
                if self.shown[i] == Some(px) {
                    continue;
                }

                queue!(
                    self.stdout,
                    cursor::MoveTo(x, y),
                    style::SetForegroundColor(px.fg.into()),
                    style::SetBackgroundColor(px.bg.into()),
                    style::Print(px.ch)
                )?;
                self.shown[i] = Some(px);
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl InputSource for TermInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, GameError> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.extend(translate_key(&ev));
            }
        }

        Ok(events)
    }
}

impl Pixel {
    fn blank(bg: Color) -> Self {
        Pixel { ch: ' ', fg: Color::White, bg }
    }
}

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => style::Color::Black,
            Color::White => style::Color::White,
            Color::Red => style::Color::Red,
        }
    }
}

fn translate_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }

    let key = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Key::Up,
        KeyCode::Char('a') | KeyCode::Left => Key::Left,
        KeyCode::Char('s') | KeyCode::Down => Key::Down,
        KeyCode::Char('d') | KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };

    Some(InputEvent::Key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_translate_arrows_and_wasd() {
        assert_eq!(translate_key(&press(KeyCode::Up)), Some(InputEvent::Key(Key::Up)));
        assert_eq!(translate_key(&press(KeyCode::Char('a'))), Some(InputEvent::Key(Key::Left)));
        assert_eq!(translate_key(&press(KeyCode::Char('s'))), Some(InputEvent::Key(Key::Down)));
        assert_eq!(translate_key(&press(KeyCode::Right)), Some(InputEvent::Key(Key::Right)));
        assert_eq!(translate_key(&press(KeyCode::Esc)), Some(InputEvent::Key(Key::Escape)));
    }

    #[test]
    fn test_translate_ctrl_c_is_quit() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(&ev), Some(InputEvent::Quit));
        assert_eq!(translate_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_translate_ignores_releases_and_other_keys() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );

        assert_eq!(translate_key(&release), None);
        assert_eq!(translate_key(&press(KeyCode::Enter)), None);
        assert_eq!(translate_key(&press(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_frame_composition_clips_to_surface() {
        let mut term = TermManager::new((4, 2));
        term.clear(Color::Black).unwrap();
        term.fill_rect(PixelRect { x: 2, y: 1, width: 4, height: 4 }, Color::Red).unwrap();
        term.draw_text((1, 0), "Score", Color::White).unwrap();

        assert_eq!(term.frame[term.index(3, 1).unwrap()], Pixel::blank(Color::Red));
        assert_eq!(term.frame[term.index(1, 1).unwrap()], Pixel::blank(Color::Black));
        assert_eq!(term.frame[term.index(1, 0).unwrap()].ch, 'S');
        assert_eq!(term.frame[term.index(3, 0).unwrap()].ch, 'o');
        assert_eq!(term.index(4, 0), None);
    }
}
