//! Character framebuffer.

use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite a translucent game color over `under`
    pub fn blend(color: Color, under: Rgb) -> Self {
        let a = color.a.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (top as f32 * a + bottom as f32 * (1.0 - a)).round() as u8
        };
        Self {
            r: mix(color.r, under.r),
            g: mix(color.g, under.g),
            b: mix(color.b, under.b),
        }
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions, keeping the allocation where possible. Contents are reset.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(width as usize * height as usize, Glyph::default());
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Write one glyph; out-of-range writes are dropped
    pub fn set(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = Glyph { ch, style };
        }
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::default());
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(i) else { break };
            let Some(cx) = x.checked_add(dx) else { break };
            self.set(cx, y, ch, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, style: Style) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x.saturating_add(dx), y.saturating_add(dy), ' ', style);
            }
        }
    }

    /// Characters of one row as text
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}
