//! Random tie-break draws, injectable so tests can fix them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of tie-break values in `[0, 1)`.
pub trait TieBreak {
    fn draw(&mut self) -> f64;
}

/// Draws from the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadDraw;

impl TieBreak for ThreadDraw {
    fn draw(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible draws from a seeded RNG.
#[derive(Clone, Debug)]
pub struct SeededDraw {
    inner: StdRng,
}

impl SeededDraw {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl TieBreak for SeededDraw {
    fn draw(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Replays a fixed list of draws, then yields 0.0.
#[derive(Clone, Debug)]
pub struct FixedDraws {
    values: std::vec::IntoIter<f64>,
}

impl FixedDraws {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }
}

impl TieBreak for FixedDraws {
    fn draw(&mut self) -> f64 {
        self.values.next().unwrap_or(0.0)
    }
}
