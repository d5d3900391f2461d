//! Grid geometry derived from the stability bound

pub mod stability;

// Re-export main types
pub use stability::{GridGeometry, MIN_NODES};
