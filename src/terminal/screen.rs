//! crossterm-backed screen.
//!
//! Drawing commands are queued into a buffer and only reach the terminal on
//! [`Screen::render`], so a `clear` followed by a wait does not blank the
//! display until the next frame is ready.

use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{queue, QueueableCommand};

use super::error::TerminalError;
use super::font::BigFont;
use super::prompt::{apply_key, LineInput, PromptAction, INPUT_WIDTH};
use super::Screen;

// ============================================================================
// Layout
// ============================================================================

/// Position of a block of text centered on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Column of the first character of every line.
    pub x: u16,
    /// Row of the first line.
    pub y: u16,
}

/// Centers `text` in a `cols` x `rows` area.
///
/// # Errors
///
/// Returns `TerminalError::Overflow` if the text is wider or taller than
/// the area.
pub fn center(text: &str, cols: u16, rows: u16) -> Result<Layout, TerminalError> {
    let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let height = text.lines().count();

    if width > usize::from(cols) || height > usize::from(rows) {
        return Err(TerminalError::Overflow {
            width,
            height,
            cols,
            rows,
        });
    }

    // Both fit in u16 after the bounds check above.
    Ok(Layout {
        x: (cols - width as u16) / 2,
        y: (rows - height as u16) / 2,
    })
}

// ============================================================================
// TerminalScreen
// ============================================================================

/// The real terminal, written through a buffered stdout.
pub struct TerminalScreen {
    out: BufWriter<Stdout>,
    font: BigFont,
}

impl TerminalScreen {
    /// Creates a screen writing to stdout.
    ///
    /// Terminal modes are managed separately by `TerminalSession`.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Font` if the display font cannot be loaded.
    pub fn new() -> Result<Self, TerminalError> {
        Ok(Self {
            out: BufWriter::new(io::stdout()),
            font: BigFont::standard()?,
        })
    }

    /// Queues `text` centered on the screen without flushing.
    fn queue_centered(&mut self, text: &str) -> Result<(), TerminalError> {
        let (cols, rows) = terminal::size()?;
        let layout = center(text, cols, rows)?;

        for (offset, line) in text.lines().enumerate() {
            queue!(
                self.out,
                MoveTo(layout.x, layout.y + offset as u16),
                Print(line)
            )?;
        }
        Ok(())
    }

    /// Draws the boxed input field with the current buffer.
    fn draw_prompt(&mut self, buffer: &str) -> Result<(), TerminalError> {
        let horizontal = "─".repeat(INPUT_WIDTH + 2);
        let field = format!("{:<width$}", format!("{}_", buffer), width = INPUT_WIDTH);
        let boxed = format!(
            "┌{horizontal}┐\n│ {field} │\n└{horizontal}┘",
            horizontal = horizontal,
            field = field
        );

        self.out.queue(Clear(ClearType::All))?;
        self.queue_centered(&boxed)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self) -> Result<(), TerminalError> {
        self.out.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn render(&mut self, label: &str) -> Result<(), TerminalError> {
        let art = self.font.render(label);
        let result = self.queue_centered(&art);
        // Flush whatever was queued, including a pending clear.
        self.out.flush()?;
        result
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>, TerminalError> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

impl LineInput for TerminalScreen {
    fn read_line(&mut self) -> Result<String, TerminalError> {
        let mut buffer = String::new();
        self.draw_prompt(&buffer)?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match apply_key(&mut buffer, key) {
                PromptAction::Continue => self.draw_prompt(&buffer)?,
                PromptAction::Submit => return Ok(buffer),
                PromptAction::Abort => return Err(TerminalError::Aborted),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_single_line() {
        let layout = center("abcd", 10, 5).unwrap();
        assert_eq!(layout, Layout { x: 3, y: 2 });
    }

    #[test]
    fn test_center_uses_widest_line() {
        let layout = center("ab\nabcdef\nabc", 10, 9).unwrap();
        assert_eq!(layout, Layout { x: 2, y: 3 });
    }

    #[test]
    fn test_center_counts_chars_not_bytes() {
        let layout = center("███", 5, 1).unwrap();
        assert_eq!(layout, Layout { x: 1, y: 0 });
    }

    #[test]
    fn test_center_exact_fit() {
        let layout = center("abc\nabc", 3, 2).unwrap();
        assert_eq!(layout, Layout { x: 0, y: 0 });
    }

    #[test]
    fn test_center_too_wide() {
        let err = center("abcdef", 5, 10).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn test_center_too_tall() {
        let art = BigFont::standard().unwrap().render("1s");
        let err = center(&art, 80, 2).unwrap_err();
        match err {
            TerminalError::Overflow { height, rows, .. } => {
                assert_eq!(height, art.lines().count());
                assert_eq!(rows, 2);
            }
            other => panic!("Expected Overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_center_empty_text() {
        let layout = center("", 10, 10).unwrap();
        assert_eq!(layout, Layout { x: 5, y: 5 });
    }
}
