pub mod composite;
pub mod encode;
pub mod pipeline;
pub mod settings;
