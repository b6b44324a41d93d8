// Adapters layer: concrete implementations for external systems.

pub mod finder;

pub use finder::WalkdirFinder;
