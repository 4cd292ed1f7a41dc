//! Team colours
//!
//! A colour is a small value tag; two particles are on the same team exactly
//! when their colours compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A team tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u8);

impl Color {
    /// Default tag for anchor particles
    pub const NEUTRAL: Color = Color(0);
    pub const BLUE: Color = Color(1);
    pub const RED: Color = Color(2);
    pub const GREEN: Color = Color(3);
    pub const YELLOW: Color = Color(4);
    pub const CYAN: Color = Color(5);
    pub const MAGENTA: Color = Color(6);
    pub const ORANGE: Color = Color(7);
    pub const PURPLE: Color = Color(8);

    /// Colour of player `index` (0-based)
    pub const fn player(index: usize) -> Color {
        Color(index as u8 + 1)
    }

    pub fn name(&self) -> String {
        match *self {
            Color::NEUTRAL => "black".to_string(),
            Color::BLUE => "blue".to_string(),
            Color::RED => "red".to_string(),
            Color::GREEN => "green".to_string(),
            Color::YELLOW => "yellow".to_string(),
            Color::CYAN => "cyan".to_string(),
            Color::MAGENTA => "magenta".to_string(),
            Color::ORANGE => "orange".to_string(),
            Color::PURPLE => "purple".to_string(),
            Color(n) => format!("team-{}", n),
        }
    }

    /// Single lower-case glyph used by the ASCII renderer. Tags past the
    /// player palette share `?`.
    pub fn glyph(&self) -> char {
        match *self {
            Color::NEUTRAL => '#',
            Color::BLUE => 'b',
            Color::RED => 'r',
            Color::GREEN => 'g',
            Color::YELLOW => 'y',
            Color::CYAN => 'c',
            Color::MAGENTA => 'm',
            Color::ORANGE => 'o',
            Color::PURPLE => 'p',
            Color(_) => '?',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
