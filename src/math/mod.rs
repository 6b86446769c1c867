//! Deterministic value streams and seeded randomness

/// Position-seeded sine noise and analytic fields
pub mod noise;
/// Seeded random selection for structural layouts
pub mod random;
