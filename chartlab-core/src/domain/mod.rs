//! Domain types for ChartLab

pub mod bar;
pub mod point;

pub use bar::{closes, is_ordered, Bar};
pub use point::{field, EnrichedPoint};
