//! Node colours and the injectable sources that hand them out.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// RGB colour; `u8` channels keep every component within 0..=255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Supplies one colour per constructed node.
pub trait ColourSource: fmt::Debug {
    fn next_colour(&mut self) -> Colour;
}

/// Uniformly random colours from a small, optionally seeded RNG.
#[derive(Debug)]
pub struct RandomColours {
    rng: SmallRng,
}

impl RandomColours {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_thread_rng() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Seeded when a seed is configured, otherwise random per run.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_thread_rng, Self::seeded)
    }
}

impl ColourSource for RandomColours {
    fn next_colour(&mut self) -> Colour {
        Colour::new(self.rng.random(), self.rng.random(), self.rng.random())
    }
}

/// Cycles through a fixed palette.
#[derive(Debug, Clone)]
pub struct FixedColours {
    palette: Vec<Colour>,
    next: usize,
}

impl FixedColours {
    pub fn new(palette: Vec<Colour>) -> Self {
        Self { palette, next: 0 }
    }

    pub fn single(colour: Colour) -> Self {
        Self::new(vec![colour])
    }
}

impl Default for FixedColours {
    fn default() -> Self {
        Self::single(Colour::new(128, 128, 128))
    }
}

impl ColourSource for FixedColours {
    fn next_colour(&mut self) -> Colour {
        if self.palette.is_empty() {
            return Colour::default();
        }
        let colour = self.palette[self.next % self.palette.len()];
        self.next = self.next.wrapping_add(1);
        colour
    }
}
