//! TerminalRenderer: flushes framebuffers to the real terminal.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written; `None` forces a full redraw
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo everything [`enter`](Self::enter) did
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Forget the last frame, e.g. after a terminal resize
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Write the cells of `frame` that differ from the last frame shown
    pub fn draw(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        match &self.shown {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_changes(Some(prev), frame, &mut self.buf)?;
            }
            _ => {
                self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
                encode_changes(None, frame, &mut self.buf)?;
            }
        }
        self.flush()?;

        match &mut self.shown {
            Some(prev) => prev.clone_from(frame),
            None => self.shown = Some(frame.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the runs of glyphs in `next` that differ from `prev` into `out`.
///
/// With no previous frame every row is one run.
pub fn encode_changes(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut style: Option<Style> = None;

    for y in 0..next.height() {
        let mut x = 0;
        while x < next.width() {
            if !changed(prev, next, x, y) {
                x += 1;
                continue;
            }
            out.queue(cursor::MoveTo(x, y))?;
            while x < next.width() && changed(prev, next, x, y) {
                let glyph = next.get(x, y).unwrap_or_default();
                if style != Some(glyph.style) {
                    apply_style(out, glyph.style)?;
                    style = Some(glyph.style);
                }
                out.queue(Print(glyph.ch))?;
                x += 1;
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn changed(prev: Option<&FrameBuffer>, next: &FrameBuffer, x: u16, y: u16) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    prev.get(x, y) != next.get(x, y)
}

fn apply_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(term_color(style.fg)))?;
    out.queue(SetBackgroundColor(term_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(out: &[u8]) -> String {
        String::from_utf8_lossy(out).into_owned()
    }

    #[test]
    fn test_full_encode_prints_every_glyph() {
        let mut frame = FrameBuffer::new(3, 2);
        frame.put_str(0, 0, "abc", Style::default());
        frame.put_str(0, 1, "def", Style::default());

        let mut out = Vec::new();
        encode_changes(None, &frame, &mut out).unwrap();

        let text = printed(&out);
        for ch in "abcdef".chars() {
            assert!(text.contains(ch), "missing {ch}");
        }
    }

    #[test]
    fn test_unchanged_frame_prints_nothing() {
        let mut frame = FrameBuffer::new(4, 1);
        frame.put_str(0, 0, "wxyz", Style::default());

        let mut out = Vec::new();
        encode_changes(Some(&frame.clone()), &frame, &mut out).unwrap();

        assert!(!printed(&out).contains('w'));
    }

    #[test]
    fn test_diff_prints_only_changed_run() {
        let prev = FrameBuffer::new(5, 1);
        let mut next = FrameBuffer::new(5, 1);
        next.put_str(1, 0, "XYZ", Style::default());

        let mut out = Vec::new();
        encode_changes(Some(&prev), &next, &mut out).unwrap();

        let text = printed(&out);
        assert!(text.contains("XYZ"));
        // Cursor jumps to column 2 (1-based) of row 1
        assert!(text.contains("\x1b[1;2H"));
    }

    #[test]
    fn test_style_change_emits_color() {
        let mut frame = FrameBuffer::new(1, 1);
        frame.set(0, 0, 'q', Style::new(Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)));

        let mut out = Vec::new();
        encode_changes(None, &frame, &mut out).unwrap();

        let text = printed(&out);
        assert!(text.contains("38;2;1;2;3"));
        assert!(text.contains("48;2;4;5;6"));
    }
}
