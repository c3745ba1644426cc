use crate::field::{BACKGROUND, BAND_HEIGHT, FIELD_WIDTH};
use crate::render::canvas::{Canvas, Rgb, Vec2};
use crate::render::legend::{LEGEND_ROWS, Span};
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate},
};
use std::io::{self, Write};

/// Upper half block: foreground paints the upper pixel of a cell, background
/// the lower one, giving two vertical framebuffer pixels per terminal cell.
const HALF_BLOCK: char = '▀';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

impl Cell {
    const fn blank() -> Self {
        // '\0' never matches a composed cell, forcing a full first paint
        Self { ch: '\0', fg: Rgb::new(0, 0, 0), bg: Rgb::new(0, 0, 0) }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Diff-based terminal presenter: converts the framebuffer to half-block
/// cells, paints the legend band, overlays text spans, and emits only the
/// cell runs that changed since the previous frame.
pub(crate) struct Presenter {
    cols: u16,
    band_rows: u16,
    prev: Vec<Cell>,
}

impl Presenter {
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        let band_rows = rows.saturating_sub(LEGEND_ROWS).max(1);
        let total = cols as usize * (band_rows + LEGEND_ROWS) as usize;
        Self { cols, band_rows, prev: vec![Cell::blank(); total] }
    }

    pub(crate) fn band_rows(&self) -> u16 {
        self.band_rows
    }

    /// Framebuffer resolution backing the animation band.
    pub(crate) fn device_size(&self) -> (usize, usize) {
        (self.cols as usize, self.band_rows as usize * 2)
    }

    /// Map a mouse cell position to logical canvas units. Legend rows map
    /// below the animation band so they can never hover a thread.
    pub(crate) fn pointer_to_logical(cols: u16, band_rows: u16, cell: (u16, u16)) -> Vec2 {
        let (col, row) = cell;
        let x = (col as f32 + 0.5) * FIELD_WIDTH / cols as f32;
        if row >= band_rows {
            return Vec2::new(x, BAND_HEIGHT + 1.0);
        }
        let y = (row as f32 + 0.5) * BAND_HEIGHT / band_rows as f32;
        Vec2::new(x, y)
    }

    /// Paint the whole screen with the backdrop and reset the diff state.
    pub(crate) fn clear_all(&mut self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, BeginSynchronizedUpdate)?;
        let rows = self.band_rows + LEGEND_ROWS;
        for row in 0..rows {
            queue!(
                out,
                cursor::MoveTo(0, row),
                SetBackgroundColor(to_color(BACKGROUND)),
                Print(" ".repeat(self.cols as usize)),
                ResetColor
            )?;
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()?;
        for cell in self.prev.iter_mut() {
            *cell = Cell::blank();
        }
        Ok(())
    }

    pub(crate) fn draw(&mut self, out: &mut impl Write, canvas: &Canvas, spans: &[Span]) -> io::Result<()> {
        let frame = self.compose(canvas, spans);
        queue!(out, BeginSynchronizedUpdate)?;

        let cols = self.cols as usize;
        let rows = (self.band_rows + LEGEND_ROWS) as usize;
        for row in 0..rows {
            let offset = row * cols;
            let mut col = 0;
            while col < cols {
                let i = offset + col;
                let cell = frame[i];
                if cell == self.prev[i] {
                    col += 1;
                    continue;
                }

                // Extend the run while cells changed and colors match
                let mut end = col + 1;
                while end < cols {
                    let j = offset + end;
                    let next = frame[j];
                    if next == self.prev[j] || next.fg != cell.fg || next.bg != cell.bg {
                        break;
                    }
                    end += 1;
                }

                queue!(
                    out,
                    cursor::MoveTo(col as u16, row as u16),
                    SetForegroundColor(to_color(cell.fg)),
                    SetBackgroundColor(to_color(cell.bg)),
                )?;
                for c in col..end {
                    let j = offset + c;
                    queue!(out, Print(frame[j].ch))?;
                    self.prev[j] = frame[j];
                }
                col = end;
            }
        }

        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()
    }

    fn compose(&self, canvas: &Canvas, spans: &[Span]) -> Vec<Cell> {
        let cols = self.cols as usize;
        let rows = (self.band_rows + LEGEND_ROWS) as usize;
        let mut frame = vec![
            Cell { ch: ' ', fg: Rgb::new(255, 255, 255), bg: BACKGROUND };
            cols * rows
        ];

        for row in 0..self.band_rows as usize {
            for col in 0..cols {
                frame[row * cols + col] = Cell {
                    ch: HALF_BLOCK,
                    fg: canvas.pixel(col, row * 2),
                    bg: canvas.pixel(col, row * 2 + 1),
                };
            }
        }

        for span in spans {
            let row = span.row as usize;
            if row >= rows {
                continue;
            }
            for (i, ch) in span.text.chars().enumerate() {
                let col = span.col as usize + i;
                if col >= cols {
                    break;
                }
                frame[row * cols + col] = Cell { ch, fg: span.fg, bg: span.bg };
            }
        }

        frame
    }
}
