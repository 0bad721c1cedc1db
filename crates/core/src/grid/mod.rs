//! Grid storage for generated cities

pub mod city_grid;

// Re-export main types
pub use city_grid::*;
