pub mod geometry;
pub mod id;
