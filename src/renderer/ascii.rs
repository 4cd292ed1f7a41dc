//! Character-grid renderer
//!
//! One cell per particle centre, y axis pointing up. Kings are drawn in
//! upper case, anchors (the neutral colour) as `#`. A census line follows
//! each frame.

use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::sim::{Census, Color, Particle};

use super::Renderer;

pub struct AsciiRenderer<W: Write> {
    out: W,
    size: usize,
    pace: bool,
    neutral: Color,
    frame: u64,
    grid: Vec<char>,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, size: usize, pace: bool, neutral: Color) -> Self {
        let size = size.max(2);
        Self {
            out,
            size,
            pace,
            neutral,
            frame: 0,
            grid: vec![' '; size * size],
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Grid cell for a position in the unit square
    fn cell(&self, x: f64, y: f64) -> usize {
        let last = (self.size - 1) as f64;
        let col = (x * self.size as f64).floor().clamp(0.0, last) as usize;
        let row = ((1.0 - y) * self.size as f64).floor().clamp(0.0, last) as usize;
        row * self.size + col
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn draw(&mut self, particles: &[Particle]) -> Result<()> {
        self.grid.fill(' ');
        for p in particles {
            let glyph = if p.color == self.neutral {
                '#'
            } else if p.is_king() {
                p.color.glyph().to_ascii_uppercase()
            } else {
                p.color.glyph()
            };
            let cell = self.cell(p.pos.x, p.pos.y);
            // kings stay visible when sharing a cell
            if !self.grid[cell].is_ascii_uppercase() {
                self.grid[cell] = glyph;
            }
        }

        self.frame += 1;
        let border: String = "-".repeat(self.size);
        writeln!(self.out, "frame {}", self.frame)?;
        writeln!(self.out, "+{}+", border)?;
        for row in self.grid.chunks(self.size) {
            let line: String = row.iter().collect();
            writeln!(self.out, "|{}|", line)?;
        }
        writeln!(self.out, "+{}+", border)?;
        writeln!(self.out, "{}", Census::take(particles))?;
        Ok(())
    }

    fn present(&mut self, period_millis: u64) -> Result<()> {
        self.out.flush()?;
        if self.pace && period_millis > 0 {
            std::thread::sleep(Duration::from_millis(period_millis));
        }
        Ok(())
    }
}
