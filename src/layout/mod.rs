pub mod canvas;
pub mod geometry;
pub mod kind;
