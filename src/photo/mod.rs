pub mod crop;
pub mod render;
