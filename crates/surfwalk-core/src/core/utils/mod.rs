pub mod geometry;
pub mod radii;
