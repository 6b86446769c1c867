//! Position-seeded noise and sinusoidal fields
//!
//! [`CellRng`] is a cheap deterministic value stream keyed by seed and grid
//! position. It is not a statistically strong generator; its exact
//! recurrence is part of the reproducibility contract of seeded maps.

/// Per-cell value stream seeded from a global seed and a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRng {
    state: f64,
}

impl CellRng {
    /// Initialize the stream for one cell
    ///
    /// The state starts at `seed + x * 12345 + y * 67890`.
    pub fn new(seed: u64, x: usize, y: usize) -> Self {
        Self {
            state: seed as f64 + x as f64 * 12345.0 + y as f64 * 67890.0,
        }
    }

    /// Next value in `[0, 1)`
    ///
    /// Each step replaces the state with `sin(state) * 10000` and returns
    /// its fractional part.
    pub fn next_value(&mut self) -> f64 {
        self.state = self.state.sin() * 10000.0;
        self.state - self.state.floor()
    }

    /// Draw an index into a collection of `len` items, `None` when empty
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_value() * len as f64).floor() as usize;
        Some(index.min(len - 1))
    }
}

/// Two-octave field used by the nature strategy, in `[-2, 2]`
pub fn nature_field(x: usize, y: usize) -> f64 {
    let (x, y) = (x as f64, y as f64);
    (x * 0.1).sin() * (y * 0.1).cos() + (x * 0.05).sin() * (y * 0.05).cos()
}

/// Interference pattern used by the abstract strategy, in `[-2, 2]`
pub fn abstract_field(x: usize, y: usize) -> f64 {
    let (xf, yf) = (x as f64, y as f64);
    let pattern1 = (xf * 0.2).sin() * (yf * 0.2).cos();
    let pattern2 = ((xf + yf) * 0.15).sin();
    pattern1 + pattern2
}
