// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{MathError, MathResult, Vector};
