//! Rendering layer: all terminal output lives here.
//!
//! The canvas is painted with half-block characters, two logical pixel rows
//! per terminal row, each pixel repeated `scale` times in both directions.
//! No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use freefall::canvas::{Canvas, Shade};
use freefall::settings::{Palette, Rgb, MAX_SCALE};

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Largest integer scale at which a `width` x `height` canvas fits in a
/// terminal of `cols` x `rows` cells.
pub fn fit_scale(width: i32, height: i32, cols: u16, rows: u16) -> u16 {
    let mut scale = 1u16;
    loop {
        let next = scale + 1;
        let need_cols = width * next as i32;
        let need_rows = (height * next as i32 + 1) / 2;
        if need_cols > cols as i32 || need_rows > rows as i32 {
            return scale;
        }
        scale = next;
    }
}

pub struct Display {
    scale: u16,
    palette: Palette,
    /// Scale of the previous frame; a change forces a full clear.
    last_scale: Option<u16>,
}

impl Display {
    pub fn new(scale: u16, palette: Palette) -> Self {
        Self {
            scale: scale.clamp(1, MAX_SCALE),
            palette,
            last_scale: None,
        }
    }

    /// Render one complete frame.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        canvas: &Canvas,
        fullscreen: bool,
    ) -> std::io::Result<()> {
        let scale = if fullscreen {
            let (cols, rows) = terminal::size()?;
            fit_scale(canvas.width(), canvas.height(), cols, rows)
        } else {
            self.scale
        };
        if self.last_scale != Some(scale) {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.last_scale = Some(scale);
        }

        self.draw_pixels(out, canvas, scale)?;
        self.draw_labels(out, canvas, scale)?;

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }

    fn shade_color(&self, shade: Shade) -> Rgb {
        match shade {
            Shade::Light => self.palette.light(),
            Shade::Dark => self.palette.dark(),
        }
    }

    fn draw_pixels<W: Write>(&self, out: &mut W, canvas: &Canvas, scale: u16) -> std::io::Result<()> {
        let s = scale as i32;
        let cols = canvas.width() * s;
        let rows = (canvas.height() * s + 1) / 2;

        let mut prev_fg: Option<Rgb> = None;
        let mut prev_bg: Option<Rgb> = None;

        for row in 0..rows {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..cols {
                let top = self.shade_color(canvas.get(col / s, (row * 2) / s));
                let bot = self.shade_color(canvas.get(col / s, (row * 2 + 1) / s));

                if prev_bg != Some(bot) {
                    out.queue(style::SetBackgroundColor(to_color(bot)))?;
                    prev_bg = Some(bot);
                }
                if top == bot {
                    out.queue(Print(' '))?;
                    continue;
                }
                if prev_fg != Some(top) {
                    out.queue(style::SetForegroundColor(to_color(top)))?;
                    prev_fg = Some(top);
                }
                out.queue(Print('\u{2580}'))?; // ▀
            }
        }
        Ok(())
    }

    fn draw_labels<W: Write>(&self, out: &mut W, canvas: &Canvas, scale: u16) -> std::io::Result<()> {
        out.queue(style::SetForegroundColor(to_color(self.palette.dark())))?;
        out.queue(style::SetBackgroundColor(to_color(self.palette.light())))?;
        let s = i32::from(scale);
        for label in canvas.labels() {
            let col = label.at.x.saturating_mul(s);
            let row = label.at.y.saturating_mul(s) / 2;
            // Off-screen labels are skipped rather than wrapped.
            let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
                continue;
            };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(&label.text))?;
        }
        Ok(())
    }
}
