pub mod geometry;
pub mod layout;
pub mod memo;
pub mod render;
pub mod romaji;
pub mod settings;
pub mod unicode;
pub mod viewport;
