//! Unit tests mirroring the `src/` tree

mod analysis;
mod math;
