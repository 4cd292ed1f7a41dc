//! Frame output
//!
//! The engine hands every particle to a `Renderer` at each tick event, then
//! asks it to present the frame. Rendering never feeds back into the
//! simulation.

pub mod ascii;
pub mod json_lines;

pub use ascii::AsciiRenderer;
pub use json_lines::JsonLinesRenderer;

use std::io;

use crate::error::Result;
use crate::settings::{RendererKind, Settings};
use crate::sim::Particle;

/// Draws particles at tick boundaries
pub trait Renderer {
    /// Draw all particles at their current position, radius and colour
    fn draw(&mut self, particles: &[Particle]) -> Result<()>;

    /// Show the drawn frame and pace for `period_millis`
    fn present(&mut self, period_millis: u64) -> Result<()>;
}

/// Headless renderer
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _particles: &[Particle]) -> Result<()> {
        Ok(())
    }

    fn present(&mut self, _period_millis: u64) -> Result<()> {
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn draw(&mut self, particles: &[Particle]) -> Result<()> {
        (**self).draw(particles)
    }

    fn present(&mut self, period_millis: u64) -> Result<()> {
        (**self).present(period_millis)
    }
}

/// Build the renderer named in the settings, writing to stdout
pub fn from_settings(settings: &Settings) -> Box<dyn Renderer> {
    match settings.renderer {
        RendererKind::None => Box::new(NullRenderer),
        RendererKind::Ascii => Box::new(AsciiRenderer::new(
            io::stdout(),
            settings.grid_size,
            settings.pace,
            settings.neutral_color,
        )),
        RendererKind::JsonLines => Box::new(JsonLinesRenderer::new(io::stdout())),
    }
}
