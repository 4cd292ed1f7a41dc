//! One JSON object per frame, newline separated

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::sim::{Color, Particle};

use super::Renderer;

#[derive(Debug, Serialize)]
struct FrameParticle {
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
    king: bool,
}

#[derive(Debug, Serialize)]
struct Frame {
    frame: u64,
    particles: Vec<FrameParticle>,
}

pub struct JsonLinesRenderer<W: Write> {
    out: W,
    frame: u64,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frame: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn draw(&mut self, particles: &[Particle]) -> Result<()> {
        self.frame += 1;
        let frame = Frame {
            frame: self.frame,
            particles: particles
                .iter()
                .map(|p| FrameParticle {
                    x: p.pos.x,
                    y: p.pos.y,
                    radius: p.radius(),
                    color: p.color,
                    king: p.is_king(),
                })
                .collect(),
        };
        serde_json::to_writer(&mut self.out, &frame)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn present(&mut self, _period_millis: u64) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
