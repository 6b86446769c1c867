/// City layout of walled blocks separated by streets
pub mod city;
/// Composition entry point, disciplines and strategy dispatch
pub mod composer;
/// Rooms and corridors carved out of solid rock
pub mod dungeon;
/// Service facade over extraction, composition and storage
pub mod executor;
/// Noise-field terrain for natural environments
pub mod nature;
/// Sinusoidal pattern for abstract environments
pub mod pattern;
/// Per-cell decisions driven by a position-seeded value stream
pub mod seeded;
